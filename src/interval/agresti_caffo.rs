//! Agresti-Caffo interval for a difference of two proportions
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::{confidence_percent, Interval};
use crate::config::{check_alpha, z_critical};
use crate::recommend::Method;
use crate::result::{AnalysisError, Result, ValidationError};
use crate::table::ContingencyTable;
use std::fmt;

/// Agresti-Caffo interval for `p₁ - p₂`
///
/// Adds one success and one failure to each group, then applies the Wald
/// interval for a difference of proportions. Bounds are clipped to
/// `[-1, 1]`.
///
/// # Example
///
/// ```
/// use proportions::interval::AgrestiCaffo;
///
/// // 3 of 15 vaccinated vs 11 of 15 unvaccinated fell ill
/// let ci = AgrestiCaffo::from_counts(3, 15, 11, 15, 0.05).unwrap();
///
/// assert!((ci.difference() + 0.470_588_235_294_117_6).abs() < 1E-12);
/// assert!(ci.interval().upper() < 0.0);
/// assert!(!ci.includes_zero());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct AgrestiCaffo {
    successes: [u64; 2],
    trials: [u64; 2],
    alpha: f64,
    z: f64,
    p_tilde: [f64; 2],
    se: f64,
    interval: Interval,
    group_labels: [String; 2],
    category_label: String,
}

/// Agresti-Caffo interval for the difference in the share of category
/// `success` between two groups of `table`
///
/// With `pair = None` the table must have exactly two rows; otherwise
/// `pair = Some((i, j))` compares rows `i` and `j`. Every column other than
/// `success` counts as a failure.
///
/// # Errors
///
/// - `UnsupportedTableShape` if `pair` is `None` and the table does not have
///   exactly two rows, or if `pair` names the same row twice
/// - `InvalidIndex` if a row or the success column is out of range
pub fn agresti_caffo(
    table: &ContingencyTable,
    pair: Option<(usize, usize)>,
    success: usize,
    alpha: f64,
) -> Result<AgrestiCaffo> {
    let (i, j) = match pair {
        None if table.n_rows() == 2 => (0, 1),
        None => {
            return Err(AnalysisError::UnsupportedTableShape {
                method: Method::AgrestiCaffo,
                n_rows: table.n_rows(),
                n_cols: table.n_cols(),
            })
        }
        Some((i, j)) => {
            table.check_row(i)?;
            table.check_row(j)?;
            if i == j {
                return Err(AnalysisError::UnsupportedTableShape {
                    method: Method::AgrestiCaffo,
                    n_rows: 1,
                    n_cols: table.n_cols(),
                });
            }
            (i, j)
        }
    };
    table.check_col(success)?;

    let counts = table.counts();
    let totals = table.row_totals();
    let mut ci = AgrestiCaffo::from_counts(
        counts[i][success],
        totals[i],
        counts[j][success],
        totals[j],
        alpha,
    )?;
    ci.group_labels = [
        table.group_labels()[i].clone(),
        table.group_labels()[j].clone(),
    ];
    ci.category_label = table.category_labels()[success].clone();
    Ok(ci)
}

impl AgrestiCaffo {
    /// Interval for `x1/n1 - x2/n2` at level `1 - alpha`
    ///
    /// # Errors
    ///
    /// `Validation` if `alpha` is not in (0, 1) or a group has more
    /// successes than trials.
    pub fn from_counts(
        x1: u64,
        n1: u64,
        x2: u64,
        n2: u64,
        alpha: f64,
    ) -> Result<Self> {
        check_alpha(alpha)?;
        for (successes, trials) in [(x1, n1), (x2, n2)] {
            if successes > trials {
                return Err(ValidationError::SuccessesExceedTrials {
                    successes,
                    trials,
                }
                .into());
            }
        }

        let z = z_critical(alpha);
        let adjust = |x: u64, n: u64| (x as f64 + 1.0) / (n as f64 + 2.0);
        let p_tilde = [adjust(x1, n1), adjust(x2, n2)];
        let var = |p: f64, n: u64| p * (1.0 - p) / (n as f64 + 2.0);
        let se = (var(p_tilde[0], n1) + var(p_tilde[1], n2)).sqrt();
        let interval =
            Interval::clipped(p_tilde[0] - p_tilde[1], z * se, -1.0, 1.0);

        log::debug!(
            "Agresti-Caffo {}/{} vs {}/{} at alpha = {}: {}",
            x1,
            n1,
            x2,
            n2,
            alpha,
            interval
        );

        Ok(AgrestiCaffo {
            successes: [x1, x2],
            trials: [n1, n2],
            alpha,
            z,
            p_tilde,
            se,
            interval,
            group_labels: [String::from("Group 1"), String::from("Group 2")],
            category_label: String::from("success"),
        })
    }

    pub fn successes(&self) -> [u64; 2] {
        self.successes
    }

    pub fn trials(&self) -> [u64; 2] {
        self.trials
    }

    /// Observed proportions `x / n`; `None` for an empty group
    pub fn observed(&self) -> [Option<f64>; 2] {
        let prop = |x: u64, n: u64| {
            if n == 0 {
                None
            } else {
                Some(x as f64 / n as f64)
            }
        };
        [
            prop(self.successes[0], self.trials[0]),
            prop(self.successes[1], self.trials[1]),
        ]
    }

    /// Observed difference `x1/n1 - x2/n2`; `None` if either group is empty
    pub fn observed_difference(&self) -> Option<f64> {
        match self.observed() {
            [Some(p1), Some(p2)] => Some(p1 - p2),
            _ => None,
        }
    }

    /// Adjusted proportions `(x + 1) / (n + 2)`
    pub fn p_tilde(&self) -> [f64; 2] {
        self.p_tilde
    }

    /// Adjusted difference, the center of the interval
    pub fn difference(&self) -> f64 {
        self.p_tilde[0] - self.p_tilde[1]
    }

    /// Standard error of the adjusted difference
    pub fn se(&self) -> f64 {
        self.se
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

    /// Whether the interval is consistent with equal proportions
    pub fn includes_zero(&self) -> bool {
        self.interval.contains(0.0)
    }

    pub fn group_labels(&self) -> &[String; 2] {
        &self.group_labels
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    /// Plain-language reading of the interval
    pub fn conclusion(&self) -> String {
        let [g1, g2] = &self.group_labels;
        let level = confidence_percent(self.alpha);
        if self.includes_zero() {
            format!(
                "The {} interval includes 0: no significant difference in the \
                 proportion of {} between {} and {}",
                level, self.category_label, g1, g2
            )
        } else if self.interval.lower() > 0.0 {
            format!(
                "{} has a higher proportion of {} than {} \
                 ({} interval excludes 0)",
                g1, self.category_label, g2, level
            )
        } else {
            format!(
                "{} has a lower proportion of {} than {} \
                 ({} interval excludes 0)",
                g1, self.category_label, g2, level
            )
        }
    }
}

impl fmt::Display for AgrestiCaffo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [g1, g2] = &self.group_labels;
        writeln!(
            f,
            "Agresti-Caffo interval for P({cat} | {}) - P({cat} | {})",
            g1,
            g2,
            cat = self.category_label
        )?;
        for (k, label) in self.group_labels.iter().enumerate() {
            match self.observed()[k] {
                Some(p) => writeln!(
                    f,
                    "  {}: {}/{} = {:.4} (adjusted {:.4})",
                    label, self.successes[k], self.trials[k], p, self.p_tilde[k]
                )?,
                None => writeln!(
                    f,
                    "  {}: no trials (adjusted {:.4})",
                    label, self.p_tilde[k]
                )?,
            }
        }
        writeln!(f, "  Adjusted difference: {:.4}", self.difference())?;
        writeln!(
            f,
            "  {} CI: {}",
            confidence_percent(self.alpha),
            self.interval
        )?;
        write!(f, "  Conclusion: {}", self.conclusion())
    }
}
