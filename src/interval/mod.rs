//! Confidence intervals for proportions
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::misc::clip;
use std::fmt;

mod agresti_caffo;
mod agresti_coull;

pub use agresti_caffo::{agresti_caffo, AgrestiCaffo};
pub use agresti_coull::{agresti_coull, AgrestiCoull};

/// A closed interval `[lower, upper]`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// `center ± half_width`, clipped to `[min, max]`
    pub(crate) fn clipped(
        center: f64,
        half_width: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Interval {
            lower: clip(center - half_width, min, max),
            upper: clip(center + half_width, min, max),
        }
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `x` lies in the closed interval
    ///
    /// ```
    /// # use proportions::interval::AgrestiCaffo;
    /// let ci = AgrestiCaffo::from_counts(12, 20, 6, 20, 0.05).unwrap();
    /// assert!(ci.interval().contains(0.0));
    /// assert!(!ci.interval().contains(0.6));
    /// ```
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}

/// `1 - alpha` as a percentage, e.g. `95%` or `97.5%`
pub(crate) fn confidence_percent(alpha: f64) -> String {
    format!("{}%", ((1.0 - alpha) * 1000.0).round() / 10.0)
}
