//! Error types
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::recommend::Method;
use std::fmt;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// A table axis
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Groups
    Row,
    /// Categories
    Column,
}

impl Axis {
    pub fn as_str(&self) -> &str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Malformed table, labels, or configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ValidationError {
    /// The table has no rows or no columns
    EmptyTable,
    /// Fewer than two groups
    TooFewRows { n_rows: usize },
    /// Fewer than two categories
    TooFewColumns { n_cols: usize },
    /// A row does not have the same length as the first row
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A count is below zero
    NegativeCount { row: usize, col: usize, count: i128 },
    /// A count does not fit in a `u64`
    CountTooLarge { row: usize, col: usize },
    /// A row or column total (`Some`), or the grand total (`None`), does
    /// not fit in a `u64`
    TotalTooLarge { axis: Option<(Axis, usize)> },
    /// A count has a fractional part, or is not finite
    NonIntegerCount { row: usize, col: usize, value: f64 },
    /// The number of group labels differs from the number of rows
    GroupLabelCount { expected: usize, found: usize },
    /// The number of category labels differs from the number of columns
    CategoryLabelCount { expected: usize, found: usize },
    /// The significance level is not in (0, 1)
    AlphaOutOfRange { alpha: f64 },
    /// The low expected count threshold is negative or not finite
    MinExpectedCountOutOfRange { threshold: f64 },
    /// More successes than trials
    SuccessesExceedTrials { successes: u64, trials: u64 },
}

impl std::error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => write!(f, "the contingency table is empty"),
            Self::TooFewRows { n_rows } => write!(
                f,
                "the table needs at least 2 rows (groups) but has {}",
                n_rows
            ),
            Self::TooFewColumns { n_cols } => write!(
                f,
                "the table needs at least 2 columns (categories) but has {}",
                n_cols
            ),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} entries but the table has {} columns",
                row, found, expected
            ),
            Self::NegativeCount { row, col, count } => write!(
                f,
                "count at ({}, {}) is negative: {}",
                row, col, count
            ),
            Self::CountTooLarge { row, col } => {
                write!(f, "count at ({}, {}) is too large", row, col)
            }
            Self::TotalTooLarge { axis: Some((axis, index)) } => write!(
                f,
                "the total of {} {} is too large",
                axis, index
            ),
            Self::TotalTooLarge { axis: None } => {
                write!(f, "the grand total of the table is too large")
            }
            Self::NonIntegerCount { row, col, value } => write!(
                f,
                "count at ({}, {}) is not a whole number: {}",
                row, col, value
            ),
            Self::GroupLabelCount { expected, found } => write!(
                f,
                "expected {} group labels but received {}",
                expected, found
            ),
            Self::CategoryLabelCount { expected, found } => write!(
                f,
                "expected {} category labels but received {}",
                expected, found
            ),
            Self::AlphaOutOfRange { alpha } => {
                write!(f, "alpha ({}) must be in (0, 1)", alpha)
            }
            Self::MinExpectedCountOutOfRange { threshold } => write!(
                f,
                "the minimum expected count ({}) must be finite and \
                 non-negative",
                threshold
            ),
            Self::SuccessesExceedTrials { successes, trials } => write!(
                f,
                "successes ({}) exceed the number of trials ({})",
                successes, trials
            ),
        }
    }
}

/// Everything that can go wrong while analyzing a table
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum AnalysisError {
    /// Malformed table, labels or configuration
    Validation(ValidationError),
    /// The method does not apply to a table (or group selection) of this
    /// shape
    UnsupportedTableShape {
        method: Method,
        n_rows: usize,
        n_cols: usize,
    },
    /// A group or category index is out of range
    InvalidIndex { axis: Axis, index: usize, len: usize },
    /// A row or column sums to zero, so expected counts are undefined
    DegenerateTable { axis: Axis, index: usize },
}

impl AnalysisError {
    /// Short, stable name of the error kind
    pub fn kind(&self) -> &str {
        match self {
            Self::Validation(_) => "validation error",
            Self::UnsupportedTableShape { .. } => "unsupported table shape",
            Self::InvalidIndex { .. } => "invalid index",
            Self::DegenerateTable { .. } => "degenerate table",
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        AnalysisError::Validation(err)
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid input: {}", err),
            Self::UnsupportedTableShape {
                method,
                n_rows,
                n_cols,
            } => write!(
                f,
                "{} requires {}, got {}×{}",
                method,
                method.shape_requirement(),
                n_rows,
                n_cols
            ),
            Self::InvalidIndex { axis, index, len } => write!(
                f,
                "{} index {} is out of range for {} {}s",
                axis, index, len, axis
            ),
            Self::DegenerateTable { axis, index } => write!(
                f,
                "{} {} sums to zero; expected counts are undefined",
                axis, index
            ),
        }
    }
}
