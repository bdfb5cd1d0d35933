//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::comparison::ProportionComparison;
#[doc(no_inline)]
pub use crate::config::{Alternative, AnalysisConfig};
#[doc(no_inline)]
pub use crate::htest::{ChiSquareIndependence, Decision, FisherExact, Warning};
#[doc(no_inline)]
pub use crate::interval::{AgrestiCaffo, AgrestiCoull, Interval};
#[doc(no_inline)]
pub use crate::recommend::{Method, MethodComparison};
#[doc(no_inline)]
pub use crate::report::Report;
#[doc(no_inline)]
pub use crate::result::{AnalysisError, Axis, ValidationError};
#[doc(no_inline)]
pub use crate::table::ContingencyTable;
