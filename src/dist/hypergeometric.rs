//! Hypergeometric distribution
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::misc::{ln_binom, logsumexp};
use crate::traits::*;
use std::fmt;
use std::ops::RangeInclusive;

/// [Hypergeometric distribution](https://en.wikipedia.org/wiki/Hypergeometric_distribution):
/// the number of marked items in `draws` draws, without replacement, from a
/// population of `population` items of which `successes` are marked.
///
/// Conditioning a 2×2 contingency table on its margins makes the top-left
/// cell hypergeometric, which is what Fisher's exact test enumerates.
///
/// # Example
///
/// ```
/// use proportions::dist::Hypergeometric;
/// use proportions::traits::*;
///
/// let hg = Hypergeometric::new(20, 7, 12).unwrap();
/// let total: f64 = hg.support().map(|k| hg.f(&k)).sum();
///
/// assert!((total - 1.0).abs() < 1E-12);
/// assert_eq!(hg.cdf(&7_u64), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Hypergeometric {
    /// Population size, N
    population: u64,
    /// Number of marked items in the population, K
    successes: u64,
    /// Number of draws, n
    draws: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum HypergeometricError {
    /// More marked items than there are items
    SuccessesExceedPopulation { successes: u64, population: u64 },
    /// More draws than there are items
    DrawsExceedPopulation { draws: u64, population: u64 },
}

impl Hypergeometric {
    /// Create a new Hypergeometric distribution
    ///
    /// # Arguments
    /// - population: total number of items, N
    /// - successes: number of marked items, K ≤ N
    /// - draws: number of items drawn, n ≤ N
    pub fn new(
        population: u64,
        successes: u64,
        draws: u64,
    ) -> Result<Self, HypergeometricError> {
        if successes > population {
            Err(HypergeometricError::SuccessesExceedPopulation {
                successes,
                population,
            })
        } else if draws > population {
            Err(HypergeometricError::DrawsExceedPopulation { draws, population })
        } else {
            Ok(Hypergeometric {
                population,
                successes,
                draws,
            })
        }
    }

    /// Creates a new Hypergeometric without checking whether the parameters
    /// are valid.
    #[inline]
    pub fn new_unchecked(population: u64, successes: u64, draws: u64) -> Self {
        Hypergeometric {
            population,
            successes,
            draws,
        }
    }

    /// Population size, N
    #[inline]
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Marked items in the population, K
    #[inline]
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of draws, n
    #[inline]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// The values with non-zero probability,
    /// `max(0, n + K - N)..=min(K, n)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use proportions::dist::Hypergeometric;
    /// let hg = Hypergeometric::new(10, 8, 5).unwrap();
    /// assert_eq!(hg.support(), 3..=5);
    /// ```
    #[inline]
    pub fn support(&self) -> RangeInclusive<u64> {
        let lower = self
            .draws
            .saturating_sub(self.population - self.successes);
        let upper = self.successes.min(self.draws);
        lower..=upper
    }

    fn ln_f_u64(&self, k: u64) -> f64 {
        if !self.support().contains(&k) {
            return f64::NEG_INFINITY;
        }
        let nf = self.population as f64;
        let kf = self.successes as f64;
        let df = self.draws as f64;
        let x = k as f64;
        ln_binom(kf, x) + ln_binom(nf - kf, df - x) - ln_binom(nf, df)
    }

    /// Sum the mass over `range` in log space
    fn mass(&self, range: RangeInclusive<u64>) -> f64 {
        let ln_fs: Vec<f64> = range.map(|k| self.ln_f_u64(k)).collect();
        logsumexp(&ln_fs).exp().min(1.0)
    }

    fn cdf_u64(&self, k: u64) -> f64 {
        let support = self.support();
        if k < *support.start() {
            0.0
        } else if k >= *support.end() {
            1.0
        } else {
            self.mass(*support.start()..=k)
        }
    }

    fn sf_u64(&self, k: u64) -> f64 {
        let support = self.support();
        if k >= *support.end() {
            0.0
        } else if k < *support.start() {
            1.0
        } else {
            self.mass(k + 1..=*support.end())
        }
    }
}

impl From<&Hypergeometric> for String {
    fn from(hg: &Hypergeometric) -> String {
        format!(
            "Hypergeometric(N: {}, K: {}, n: {})",
            hg.population, hg.successes, hg.draws
        )
    }
}

impl_display!(Hypergeometric);

macro_rules! impl_int_traits {
    ($kind:ty) => {
        impl HasDensity<$kind> for Hypergeometric {
            fn ln_f(&self, k: &$kind) -> f64 {
                self.ln_f_u64(*k as u64)
            }
        }

        impl Support<$kind> for Hypergeometric {
            fn supports(&self, k: &$kind) -> bool {
                self.support().contains(&(*k as u64))
            }
        }

        impl Cdf<$kind> for Hypergeometric {
            fn cdf(&self, k: &$kind) -> f64 {
                self.cdf_u64(*k as u64)
            }

            // Summed directly so the upper tail keeps its precision
            fn sf(&self, k: &$kind) -> f64 {
                self.sf_u64(*k as u64)
            }
        }

    };
}

impl_int_traits!(u32);
impl_int_traits!(u64);
impl_int_traits!(usize);

impl std::error::Error for HypergeometricError {}

impl fmt::Display for HypergeometricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuccessesExceedPopulation {
                successes,
                population,
            } => write!(
                f,
                "successes ({}) exceed the population size ({})",
                successes, population
            ),
            Self::DrawsExceedPopulation { draws, population } => write!(
                f,
                "draws ({}) exceed the population size ({})",
                draws, population
            ),
        }
    }
}
