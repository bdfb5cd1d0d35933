//! Analysis configuration
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ALPHA, MIN_EXPECTED_COUNT};
use crate::dist::Gaussian;
use crate::result::ValidationError;
use crate::traits::InverseCdf;
use std::fmt;
use std::str::FromStr;

/// Alternative hypothesis for Fisher's exact test
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "kebab-case"))]
pub enum Alternative {
    /// The odds ratio differs from one
    #[default]
    TwoSided,
    /// The odds ratio is less than one
    Less,
    /// The odds ratio is greater than one
    Greater,
}

impl Alternative {
    pub fn as_str(&self) -> &str {
        match self {
            Alternative::TwoSided => "two-sided",
            Alternative::Less => "less",
            Alternative::Greater => "greater",
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAlternativeError(String);

impl std::error::Error for ParseAlternativeError {}

impl fmt::Display for ParseAlternativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid alternative '{}', expected one of two-sided, less, greater",
            self.0
        )
    }
}

impl FromStr for Alternative {
    type Err = ParseAlternativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two-sided" | "two_sided" => Ok(Alternative::TwoSided),
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            _ => Err(ParseAlternativeError(s.to_owned())),
        }
    }
}

/// Knobs shared by every analysis on a table
///
/// # Example
///
/// ```
/// use proportions::{AnalysisConfig, Alternative};
///
/// let config = AnalysisConfig::new(0.01)
///     .unwrap()
///     .with_alternative(Alternative::Less);
///
/// assert_eq!(config.alpha(), 0.01);
/// assert!((config.confidence_level() - 0.99).abs() < 1E-12);
/// assert!(AnalysisConfig::new(1.5).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "AnalysisConfigParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "AnalysisConfigParameters"))]
pub struct AnalysisConfig {
    /// Significance level in (0, 1)
    alpha: f64,
    /// Alternative hypothesis for Fisher's exact test
    alternative: Alternative,
    /// Apply Yates' continuity correction to 2×2 χ² tests
    yates_correction: bool,
    /// Expected counts below this value raise a warning
    min_expected_count: f64,
    /// Column treated as "success" by the full analysis
    success_category: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            alpha: DEFAULT_ALPHA,
            alternative: Alternative::TwoSided,
            yates_correction: false,
            min_expected_count: MIN_EXPECTED_COUNT,
            success_category: 0,
        }
    }
}

/// Unvalidated mirror of [`AnalysisConfig`]; missing fields take their
/// defaults when deserialized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(default))]
pub struct AnalysisConfigParameters {
    pub alpha: f64,
    pub alternative: Alternative,
    pub yates_correction: bool,
    pub min_expected_count: f64,
    pub success_category: usize,
}

impl Default for AnalysisConfigParameters {
    fn default() -> Self {
        AnalysisConfig::default().into()
    }
}

impl TryFrom<AnalysisConfigParameters> for AnalysisConfig {
    type Error = ValidationError;

    fn try_from(params: AnalysisConfigParameters) -> Result<Self, Self::Error> {
        Ok(AnalysisConfig::new(params.alpha)?
            .with_alternative(params.alternative)
            .with_yates_correction(params.yates_correction)
            .with_min_expected_count(params.min_expected_count)?
            .with_success_category(params.success_category))
    }
}

impl From<AnalysisConfig> for AnalysisConfigParameters {
    fn from(config: AnalysisConfig) -> Self {
        AnalysisConfigParameters {
            alpha: config.alpha,
            alternative: config.alternative,
            yates_correction: config.yates_correction,
            min_expected_count: config.min_expected_count,
            success_category: config.success_category,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with significance level `alpha`
    pub fn new(alpha: f64) -> Result<Self, ValidationError> {
        let mut config = AnalysisConfig::default();
        config.set_alpha(alpha)?;
        Ok(config)
    }

    /// Significance level
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Set the significance level
    ///
    /// ```rust
    /// # use proportions::AnalysisConfig;
    /// let mut config = AnalysisConfig::default();
    /// assert!(config.set_alpha(0.1).is_ok());
    /// assert!(config.set_alpha(0.0).is_err());
    /// assert!(config.set_alpha(1.0).is_err());
    /// assert!(config.set_alpha(f64::NAN).is_err());
    /// assert_eq!(config.alpha(), 0.1);
    /// ```
    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), ValidationError> {
        check_alpha(alpha)?;
        self.alpha = alpha;
        Ok(())
    }

    /// `1 - alpha`
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    /// Two-sided standard normal critical value, Φ⁻¹(1 - α/2)
    pub fn z_critical(&self) -> f64 {
        z_critical(self.alpha)
    }

    #[inline]
    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    #[must_use]
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    #[inline]
    pub fn yates_correction(&self) -> bool {
        self.yates_correction
    }

    #[must_use]
    pub fn with_yates_correction(mut self, yates_correction: bool) -> Self {
        self.yates_correction = yates_correction;
        self
    }

    #[inline]
    pub fn min_expected_count(&self) -> f64 {
        self.min_expected_count
    }

    /// Set the expected count below which the χ² test warns
    ///
    /// ```rust
    /// # use proportions::AnalysisConfig;
    /// let config = AnalysisConfig::default().with_min_expected_count(1.0);
    /// assert_eq!(config.unwrap().min_expected_count(), 1.0);
    ///
    /// assert!(AnalysisConfig::default().with_min_expected_count(-1.0).is_err());
    /// assert!(AnalysisConfig::default().with_min_expected_count(f64::NAN).is_err());
    /// ```
    pub fn with_min_expected_count(
        mut self,
        min_expected_count: f64,
    ) -> Result<Self, ValidationError> {
        check_min_expected_count(min_expected_count)?;
        self.min_expected_count = min_expected_count;
        Ok(self)
    }

    #[inline]
    pub fn success_category(&self) -> usize {
        self.success_category
    }

    #[must_use]
    pub fn with_success_category(mut self, success_category: usize) -> Self {
        self.success_category = success_category;
        self
    }
}

/// Error unless `alpha` lies in (0, 1)
pub(crate) fn check_alpha(alpha: f64) -> Result<(), ValidationError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::AlphaOutOfRange { alpha })
    }
}

/// Error unless `threshold` is finite and non-negative
fn check_min_expected_count(threshold: f64) -> Result<(), ValidationError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::MinExpectedCountOutOfRange { threshold })
    }
}

/// Two-sided standard normal critical value, Φ⁻¹(1 - α/2)
pub(crate) fn z_critical(alpha: f64) -> f64 {
    Gaussian::standard().quantile(1.0 - alpha / 2.0)
}
