//! Numeric utilities
mod func;

pub(crate) use func::clip;
pub use func::{ln_binom, logsumexp};
