//! Hypothesis tests on contingency tables
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

mod chi_square;
mod fisher;

pub use chi_square::{chi_square_independence, ChiSquareIndependence};
pub use fisher::{fisher_exact, FisherExact};

/// Outcome of a test at a given significance level
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Decision {
    /// p < α
    Reject,
    /// p ≥ α
    FailToReject,
}

impl Decision {
    /// Compare a p-value with the significance level
    ///
    /// ```
    /// # use proportions::htest::Decision;
    /// assert_eq!(Decision::from_p_value(0.01, 0.05), Decision::Reject);
    /// assert_eq!(Decision::from_p_value(0.05, 0.05), Decision::FailToReject);
    /// ```
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Decision::Reject
        } else {
            Decision::FailToReject
        }
    }

    #[inline]
    pub fn is_reject(&self) -> bool {
        matches!(self, Decision::Reject)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Reject => write!(f, "reject H0"),
            Decision::FailToReject => write!(f, "fail to reject H0"),
        }
    }
}

/// Advisory conditions attached to a valid result
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Warning {
    /// Some expected counts fall below the threshold, so the χ²
    /// approximation may be poor
    LowExpectedCounts {
        n_low: usize,
        n_cells: usize,
        min_expected: f64,
        threshold: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LowExpectedCounts {
                n_low,
                n_cells,
                min_expected,
                threshold,
            } => write!(
                f,
                "{} of {} expected counts are below {} (minimum {:.2}); \
                 the chi-square approximation may be unreliable",
                n_low, n_cells, threshold, min_expected
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_is_strict() {
        assert!(Decision::from_p_value(0.049, 0.05).is_reject());
        assert!(!Decision::from_p_value(0.05, 0.05).is_reject());
        assert!(!Decision::from_p_value(f64::NAN, 0.05).is_reject());
    }

    #[test]
    fn warning_display() {
        let warning = Warning::LowExpectedCounts {
            n_low: 2,
            n_cells: 4,
            min_expected: 2.470_588,
            threshold: 5.0,
        };
        assert_eq!(
            warning.to_string(),
            "2 of 4 expected counts are below 5 (minimum 2.47); \
             the chi-square approximation may be unreliable"
        );
    }
}
