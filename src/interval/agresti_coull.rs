//! Agresti-Coull interval for a single proportion
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::{confidence_percent, Interval};
use crate::config::{check_alpha, z_critical};
use crate::result::{Result, ValidationError};
use crate::table::ContingencyTable;
use std::fmt;

/// [Agresti-Coull interval](https://en.wikipedia.org/wiki/Binomial_proportion_confidence_interval#Agresti%E2%80%93Coull_interval)
/// for a binomial proportion.
///
/// Adds `z²/2` successes and `z²/2` failures before applying the Wald
/// formula, which keeps the coverage close to nominal for small `n` and for
/// proportions near 0 or 1. Bounds are clipped to `[0, 1]`.
///
/// # Example
///
/// ```
/// use proportions::interval::AgrestiCoull;
///
/// let ci = AgrestiCoull::from_counts(0, 10, 0.05).unwrap();
///
/// // No successes, but the interval still has width
/// assert_eq!(ci.interval().lower(), 0.0);
/// assert!((ci.interval().upper() - 0.320_887_305_750_545_7).abs() < 1E-6);
/// assert_eq!(ci.observed(), Some(0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct AgrestiCoull {
    successes: u64,
    trials: u64,
    alpha: f64,
    z: f64,
    n_tilde: f64,
    p_tilde: f64,
    interval: Interval,
    group_label: String,
    category_label: String,
}

/// Agresti-Coull interval for the share of category `success` within
/// group `group` of `table`
///
/// # Errors
///
/// `InvalidIndex` if `group` or `success` is out of range.
pub fn agresti_coull(
    table: &ContingencyTable,
    group: usize,
    success: usize,
    alpha: f64,
) -> Result<AgrestiCoull> {
    table.check_row(group)?;
    table.check_col(success)?;

    let successes = table.counts()[group][success];
    let trials = table.row_totals()[group];

    let mut ci = AgrestiCoull::from_counts(successes, trials, alpha)?;
    ci.group_label = table.group_labels()[group].clone();
    ci.category_label = table.category_labels()[success].clone();
    Ok(ci)
}

impl AgrestiCoull {
    /// Interval for `successes` out of `trials` at level `1 - alpha`
    ///
    /// # Errors
    ///
    /// `Validation` if `alpha` is not in (0, 1) or there are more
    /// successes than trials.
    pub fn from_counts(successes: u64, trials: u64, alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        if successes > trials {
            return Err(
                ValidationError::SuccessesExceedTrials { successes, trials }.into()
            );
        }

        let z = z_critical(alpha);
        let (n_tilde, p_tilde, interval) = if z.is_finite() {
            let z2 = z * z;
            let n_tilde = trials as f64 + z2;
            let p_tilde = (successes as f64 + z2 / 2.0) / n_tilde;
            let half_width = z * (p_tilde * (1.0 - p_tilde) / n_tilde).sqrt();
            (n_tilde, p_tilde, Interval::clipped(p_tilde, half_width, 0.0, 1.0))
        } else {
            // 1 - α/2 rounds to 1 for α below ~1e-16. Take the z → ∞ limit:
            // the pseudo-counts swamp the data.
            (f64::INFINITY, 0.5, Interval::clipped(0.5, z, 0.0, 1.0))
        };

        log::debug!(
            "Agresti-Coull {}/{} at alpha = {}: p̃ = {}, {}",
            successes,
            trials,
            alpha,
            p_tilde,
            interval
        );

        Ok(AgrestiCoull {
            successes,
            trials,
            alpha,
            z,
            n_tilde,
            p_tilde,
            interval,
            group_label: String::from("Group"),
            category_label: String::from("success"),
        })
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// `x / n`; `None` when there are no trials
    pub fn observed(&self) -> Option<f64> {
        if self.trials == 0 {
            None
        } else {
            Some(self.successes as f64 / self.trials as f64)
        }
    }

    /// Adjusted center, `(x + z²/2) / ñ`
    pub fn p_tilde(&self) -> f64 {
        self.p_tilde
    }

    /// Adjusted sample size, `n + z²`
    pub fn n_tilde(&self) -> f64 {
        self.n_tilde
    }

    /// Critical value, Φ⁻¹(1 - α/2)
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn group_label(&self) -> &str {
        &self.group_label
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }
}

impl fmt::Display for AgrestiCoull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Agresti-Coull interval for P({} | {})",
            self.category_label, self.group_label
        )?;
        match self.observed() {
            Some(p) => writeln!(
                f,
                "  Observed: {}/{} = {:.4}",
                self.successes, self.trials, p
            )?,
            None => writeln!(f, "  Observed: no trials")?,
        }
        writeln!(
            f,
            "  Adjusted estimate: {:.4} (ñ = {:.2})",
            self.p_tilde, self.n_tilde
        )?;
        write!(
            f,
            "  {} CI: {}",
            confidence_percent(self.alpha),
            self.interval
        )
    }
}
