//! Gaussian/Normal distribution over x in (-∞, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use special::Error as _;
use std::f64::consts::SQRT_2;
use std::fmt;

use crate::consts::HALF_LN_2PI;
use crate::impl_display;
use crate::traits::{Cdf, HasDensity, InverseCdf, Support};

/// Gaussian / [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution),
/// N(μ, σ) over real values.
///
/// The standard normal supplies the critical values for the confidence
/// intervals in [`crate::interval`].
///
/// # Example
///
/// ```
/// use proportions::dist::Gaussian;
/// use proportions::traits::*;
///
/// let g = Gaussian::standard();
/// let z: f64 = g.quantile(0.975);
///
/// assert!((z - 1.959_963_984_540_054).abs() < 1E-6);
/// assert!((g.cdf(&z) - 0.975).abs() < 1E-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Gaussian {
    /// Mean
    mu: f64,
    /// Standard deviation
    sigma: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GaussianError {
    /// The mu parameter is infinite or NaN
    MuNotFinite { mu: f64 },
    /// The sigma parameter is less than or equal to zero
    SigmaTooLow { sigma: f64 },
    /// The sigma parameter is infinite or NaN
    SigmaNotFinite { sigma: f64 },
}

impl Gaussian {
    /// Create a new Gaussian distribution
    ///
    /// # Arguments
    /// - mu: mean
    /// - sigma: standard deviation
    pub fn new(mu: f64, sigma: f64) -> Result<Self, GaussianError> {
        if !mu.is_finite() {
            Err(GaussianError::MuNotFinite { mu })
        } else if sigma <= 0.0 {
            Err(GaussianError::SigmaTooLow { sigma })
        } else if !sigma.is_finite() {
            Err(GaussianError::SigmaNotFinite { sigma })
        } else {
            Ok(Gaussian { mu, sigma })
        }
    }

    /// Creates a new Gaussian without checking whether the parameters are
    /// valid.
    #[inline]
    #[must_use]
    pub fn new_unchecked(mu: f64, sigma: f64) -> Self {
        Gaussian { mu, sigma }
    }

    /// Standard normal
    ///
    /// # Example
    ///
    /// ```rust
    /// # use proportions::dist::Gaussian;
    /// let gauss = Gaussian::standard();
    ///
    /// assert_eq!(gauss, Gaussian::new(0.0, 1.0).unwrap());
    /// ```
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Gaussian {
            mu: 0.0,
            sigma: 1.0,
        }
    }

    /// Get mu parameter
    #[inline]
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Get sigma parameter
    #[inline]
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Gaussian::standard()
    }
}

impl From<&Gaussian> for String {
    fn from(gauss: &Gaussian) -> String {
        format!("N(μ: {}, σ: {})", gauss.mu, gauss.sigma)
    }
}

impl_display!(Gaussian);

impl HasDensity<f64> for Gaussian {
    fn ln_f(&self, x: &f64) -> f64 {
        let k = (x - self.mu) / self.sigma;
        (0.5 * k).mul_add(-k, -self.sigma.ln()) - HALF_LN_2PI
    }
}

impl Support<f64> for Gaussian {
    fn supports(&self, x: &f64) -> bool {
        x.is_finite()
    }
}

impl Cdf<f64> for Gaussian {
    fn cdf(&self, x: &f64) -> f64 {
        let errf = ((x - self.mu) / (self.sigma * SQRT_2)).error();
        0.5 * (1.0 + errf)
    }
}

impl InverseCdf<f64> for Gaussian {
    fn invcdf(&self, p: f64) -> f64 {
        assert!((0.0..=1.0).contains(&p), "P out of range");

        if p == 0.0 {
            return f64::NEG_INFINITY;
        } else if p == 1.0 {
            return f64::INFINITY;
        }

        (self.sigma * SQRT_2)
            .mul_add(2.0_f64.mul_add(p, -1.0).inv_error(), self.mu)
    }
}

impl std::error::Error for GaussianError {}

impl fmt::Display for GaussianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => write!(f, "non-finite mu: {mu}"),
            Self::SigmaTooLow { sigma } => {
                write!(f, "sigma ({sigma}) must be greater than zero")
            }
            Self::SigmaNotFinite { sigma } => {
                write!(f, "non-finite sigma: {sigma}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;

    const TOL: f64 = 1E-12;
    const QUANTILE_TOL: f64 = 1E-9;

    test_basic_impls!(Gaussian, Gaussian::new(1.2, 3.4).unwrap());

    #[test]
    fn new() {
        let gauss = Gaussian::new(1.2, 3.0).unwrap();
        assert::close(gauss.mu, 1.2, TOL);
        assert::close(gauss.sigma, 3.0, TOL);
    }

    #[test]
    fn new_should_reject_bad_parameters() {
        assert!(Gaussian::new(f64::NAN, 1.0).is_err());
        assert_eq!(
            Gaussian::new(0.0, 0.0),
            Err(GaussianError::SigmaTooLow { sigma: 0.0 })
        );
        assert!(Gaussian::new(0.0, -1.0).is_err());
        assert!(Gaussian::new(0.0, f64::INFINITY).is_err());
        assert!(Gaussian::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn standard_ln_f_at_zero() {
        let gauss = Gaussian::standard();
        assert::close(gauss.ln_f(&0.0_f64), -0.918_938_533_204_672_7, TOL);
    }

    #[test]
    fn standard_cdf_at_zero_is_half() {
        assert::close(Gaussian::standard().cdf(&0.0), 0.5, TOL);
    }

    #[test]
    fn two_sided_critical_values() {
        let g = Gaussian::standard();
        assert::close(g.quantile(0.975), 1.959_963_984_540_054, QUANTILE_TOL);
        assert::close(g.quantile(0.995), 2.575_829_303_548_900_5, QUANTILE_TOL);
        assert::close(g.quantile(0.95), 1.644_853_626_951_472_8, QUANTILE_TOL);
    }

    #[test]
    fn quantile_inverts_cdf() {
        let g = Gaussian::new(-1.0, 2.5).unwrap();
        for p in [0.01, 0.2, 0.5, 0.8, 0.99] {
            assert::close(g.cdf(&g.quantile(p)), p, QUANTILE_TOL);
        }
    }

    #[test]
    fn quantile_at_the_edges() {
        let g = Gaussian::standard();
        assert_eq!(g.quantile(0.0), f64::NEG_INFINITY);
        assert_eq!(g.quantile(1.0), f64::INFINITY);
        assert_eq!(g.quantile(0.5), 0.0);
    }
}
