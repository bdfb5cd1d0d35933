//! Comparing proportions across groups with small samples.
//!
//! The entry point is [`ProportionComparison`], which wraps a validated
//! [`ContingencyTable`] and an [`AnalysisConfig`]:
//!
//! - [Fisher's exact test](htest::fisher_exact) for 2×2 tables
//! - the [χ² test of independence](htest::chi_square_independence) for r×c
//!   tables, with an expected-count check
//! - the [Agresti-Coull interval](interval::AgrestiCoull) for one proportion
//! - the [Agresti-Caffo interval](interval::AgrestiCaffo) for a difference
//!   of two proportions
//! - a [method comparison](recommend::MethodComparison) and a combined
//!   [report](report::Report)
//!
//! # Example
//!
//! ```
//! use proportions::prelude::*;
//!
//! let cmp = ProportionComparison::from_rows(&[[9, 1], [2, 5]]).unwrap();
//!
//! let recommendation = cmp.compare_methods();
//! assert_eq!(recommendation.recommended(), Some(Method::FisherExact));
//!
//! let fisher = cmp.fisher_exact(Alternative::TwoSided).unwrap();
//! assert_eq!(fisher.decision(), Decision::Reject);
//!
//! // The χ² test still runs, with a warning about low expected counts
//! let chi2 = cmp.chi_square().unwrap();
//! assert!(!chi2.warnings().is_empty());
//!
//! println!("{}", cmp.full_analysis());
//! ```
//!
//! Nothing is logged unless the caller installs a [`log`] implementation.
//! Results are reported at `debug` level and low expected counts at `warn`
//! level.
// Test the README
use doc_comment::doctest;
doctest!("../README.md");

/// Implements `Display` through `impl From<&T> for String`
#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}

pub mod comparison;
pub mod config;
pub mod consts;
pub mod dist;
pub mod htest;
pub mod interval;
pub mod misc;
pub mod prelude;
pub mod recommend;
pub mod report;
pub mod result;
pub mod table;
pub mod traits;


pub use comparison::ProportionComparison;
pub use config::{Alternative, AnalysisConfig};
pub use recommend::Method;
pub use result::{AnalysisError, Result, ValidationError};
pub use table::ContingencyTable;
