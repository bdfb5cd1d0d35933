//! Probability distributions
mod chi_squared;
mod gaussian;
mod hypergeometric;

pub use chi_squared::{ChiSquared, ChiSquaredError};
pub use gaussian::{Gaussian, GaussianError};
pub use hypergeometric::{Hypergeometric, HypergeometricError};
