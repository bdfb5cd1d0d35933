//! Contingency tables
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::result::{AnalysisError, Axis, Result, ValidationError};
use itertools::Itertools;
use num_traits::PrimInt;
use std::fmt;
use std::iter::once;

const TOTAL_LABEL: &str = "Total";

/// An r×c table of non-negative counts. Rows are groups, columns are
/// categories.
///
/// Invariants, checked at construction: the table is rectangular, has at
/// least two rows and two columns, and every count is a non-negative whole
/// number. Labels, when given, match the table's dimensions.
///
/// # Example
///
/// ```
/// use proportions::ContingencyTable;
///
/// let table = ContingencyTable::new(&[[12, 8], [6, 14]])
///     .unwrap()
///     .with_group_labels(["Control", "Treatment"])
///     .unwrap();
///
/// assert_eq!(table.shape(), (2, 2));
/// assert_eq!(table.row_totals(), &[20, 20]);
/// assert_eq!(table.col_totals(), &[18, 22]);
/// assert_eq!(table.total(), 40);
/// assert_eq!(table.group_label(1), Some("Treatment"));
/// assert_eq!(table.category_label(0), Some("Category 1"));
/// ```
///
/// Malformed input is rejected
///
/// ```
/// # use proportions::{ContingencyTable, ValidationError};
/// let jagged = ContingencyTable::new(&[vec![1, 2], vec![3]]);
/// assert_eq!(
///     jagged,
///     Err(ValidationError::RaggedRow { row: 1, expected: 2, found: 1 })
/// );
///
/// let negative = ContingencyTable::new(&[[-1, 2], [3, 4]]);
/// assert!(negative.is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "ContingencyTableParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "ContingencyTableParameters"))]
pub struct ContingencyTable {
    counts: Vec<Vec<u64>>,
    row_totals: Vec<u64>,
    col_totals: Vec<u64>,
    total: u64,
    group_labels: Vec<String>,
    category_labels: Vec<String>,
}

/// Unvalidated mirror of [`ContingencyTable`]. Missing labels take their
/// positional defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct ContingencyTableParameters {
    pub counts: Vec<Vec<u64>>,
    #[cfg_attr(feature = "serde1", serde(default))]
    pub group_labels: Option<Vec<String>>,
    #[cfg_attr(feature = "serde1", serde(default))]
    pub category_labels: Option<Vec<String>>,
}

impl TryFrom<ContingencyTableParameters> for ContingencyTable {
    type Error = ValidationError;

    fn try_from(
        params: ContingencyTableParameters,
    ) -> std::result::Result<Self, Self::Error> {
        let mut table = ContingencyTable::new(&params.counts)?;
        if let Some(labels) = params.group_labels {
            table = table.with_group_labels(labels)?;
        }
        if let Some(labels) = params.category_labels {
            table = table.with_category_labels(labels)?;
        }
        Ok(table)
    }
}

impl From<ContingencyTable> for ContingencyTableParameters {
    fn from(table: ContingencyTable) -> Self {
        ContingencyTableParameters {
            counts: table.counts,
            group_labels: Some(table.group_labels),
            category_labels: Some(table.category_labels),
        }
    }
}

/// Check that the rows form a rectangle of at least 2×2 and return the
/// number of columns
fn validate_shape<R, T>(rows: &[R]) -> std::result::Result<usize, ValidationError>
where
    R: AsRef<[T]>,
{
    let n_cols = match rows.first() {
        Some(row) if !row.as_ref().is_empty() => row.as_ref().len(),
        _ => return Err(ValidationError::EmptyTable),
    };

    if let Some((row, found)) = rows
        .iter()
        .map(|row| row.as_ref().len())
        .enumerate()
        .find(|(_, len)| *len != n_cols)
    {
        return Err(ValidationError::RaggedRow {
            row,
            expected: n_cols,
            found,
        });
    }

    if rows.len() < 2 {
        Err(ValidationError::TooFewRows { n_rows: rows.len() })
    } else if n_cols < 2 {
        Err(ValidationError::TooFewColumns { n_cols })
    } else {
        Ok(n_cols)
    }
}

fn default_labels(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|ix| format!("{} {}", prefix, ix)).collect()
}

/// Lay out a labeled grid of pre-formatted cells with right-aligned columns
pub(crate) fn render_grid(
    row_labels: &[&str],
    col_labels: &[&str],
    cells: &[Vec<String>],
) -> String {
    let label_width = row_labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = col_labels
        .iter()
        .enumerate()
        .map(|(j, header)| {
            cells
                .iter()
                .map(|row| row[j].chars().count())
                .chain(once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |label: &str, entries: &mut dyn Iterator<Item = &str>| {
        let body = entries
            .zip(widths.iter())
            .map(|(entry, &w)| format!("{:>w$}", entry, w = w))
            .join("  ");
        format!("{:<lw$}  {}", label, body, lw = label_width)
    };

    once(line("", &mut col_labels.iter().copied()))
        .chain(
            row_labels
                .iter()
                .zip(cells.iter())
                .map(|(label, row)| line(label, &mut row.iter().map(String::as_str))),
        )
        .join("\n")
}

fn checked_total<I>(
    mut counts: I,
    axis: Axis,
    index: usize,
) -> std::result::Result<u64, ValidationError>
where
    I: Iterator<Item = u64>,
{
    counts
        .try_fold(0_u64, |acc, x| acc.checked_add(x))
        .ok_or(ValidationError::TotalTooLarge {
            axis: Some((axis, index)),
        })
}

impl ContingencyTable {
    /// Build a table from rows of integer counts with positional labels
    /// (`Group 1…`, `Category 1…`).
    pub fn new<R, T>(rows: &[R]) -> std::result::Result<Self, ValidationError>
    where
        R: AsRef<[T]>,
        T: PrimInt,
    {
        validate_shape(rows)?;

        let counts = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| {
                        if x < T::zero() {
                            Err(ValidationError::NegativeCount {
                                row: i,
                                col: j,
                                count: x.to_i128().unwrap_or(i128::MIN),
                            })
                        } else {
                            x.to_u64().ok_or(ValidationError::CountTooLarge {
                                row: i,
                                col: j,
                            })
                        }
                    })
                    .collect::<std::result::Result<Vec<u64>, _>>()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::from_counts(counts)
    }

    /// Build a table from floating point counts. Every value must be a
    /// finite, non-negative whole number.
    ///
    /// ```
    /// # use proportions::{ContingencyTable, ValidationError};
    /// let table = ContingencyTable::from_float_rows(&[[3.0, 12.0], [11.0, 4.0]]);
    /// assert!(table.is_ok());
    ///
    /// let table = ContingencyTable::from_float_rows(&[[3.5, 12.0], [11.0, 4.0]]);
    /// assert_eq!(
    ///     table,
    ///     Err(ValidationError::NonIntegerCount { row: 0, col: 0, value: 3.5 })
    /// );
    /// ```
    pub fn from_float_rows<R>(
        rows: &[R],
    ) -> std::result::Result<Self, ValidationError>
    where
        R: AsRef<[f64]>,
    {
        validate_shape(rows)?;

        let counts = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(j, &value)| {
                        if !value.is_finite() || value.fract() != 0.0 {
                            Err(ValidationError::NonIntegerCount {
                                row: i,
                                col: j,
                                value,
                            })
                        } else if value < 0.0 {
                            Err(ValidationError::NegativeCount {
                                row: i,
                                col: j,
                                count: value as i128,
                            })
                        } else if value >= u64::MAX as f64 {
                            Err(ValidationError::CountTooLarge { row: i, col: j })
                        } else {
                            Ok(value as u64)
                        }
                    })
                    .collect::<std::result::Result<Vec<u64>, _>>()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::from_counts(counts)
    }

    /// Counts must already be rectangular and at least 2×2. Fails when a
    /// margin does not fit in a `u64`.
    fn from_counts(
        counts: Vec<Vec<u64>>,
    ) -> std::result::Result<Self, ValidationError> {
        let n_cols = counts[0].len();
        let row_totals = counts
            .iter()
            .enumerate()
            .map(|(i, row)| checked_total(row.iter().copied(), Axis::Row, i))
            .collect::<std::result::Result<Vec<u64>, _>>()?;
        let col_totals = (0..n_cols)
            .map(|j| {
                checked_total(counts.iter().map(|row| row[j]), Axis::Column, j)
            })
            .collect::<std::result::Result<Vec<u64>, _>>()?;
        let total = row_totals
            .iter()
            .try_fold(0_u64, |acc, &t| acc.checked_add(t))
            .ok_or(ValidationError::TotalTooLarge { axis: None })?;

        Ok(ContingencyTable {
            group_labels: default_labels("Group", counts.len()),
            category_labels: default_labels("Category", n_cols),
            counts,
            row_totals,
            col_totals,
            total,
        })
    }

    /// Replace the group (row) labels
    pub fn with_group_labels<I, S>(
        mut self,
        labels: I,
    ) -> std::result::Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.n_rows() {
            return Err(ValidationError::GroupLabelCount {
                expected: self.n_rows(),
                found: labels.len(),
            });
        }
        self.group_labels = labels;
        Ok(self)
    }

    /// Replace the category (column) labels
    pub fn with_category_labels<I, S>(
        mut self,
        labels: I,
    ) -> std::result::Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.n_cols() {
            return Err(ValidationError::CategoryLabelCount {
                expected: self.n_cols(),
                found: labels.len(),
            });
        }
        self.category_labels = labels;
        Ok(self)
    }

    /// Number of groups
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.counts.len()
    }

    /// Number of categories
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.col_totals.len()
    }

    /// `(rows, columns)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    #[inline]
    pub fn is_2x2(&self) -> bool {
        self.shape() == (2, 2)
    }

    /// The count in cell `(row, col)`
    pub fn count(&self, row: usize, col: usize) -> Option<u64> {
        self.counts.get(row).and_then(|r| r.get(col)).copied()
    }

    /// The counts of one group
    pub fn row(&self, row: usize) -> Option<&[u64]> {
        self.counts.get(row).map(Vec::as_slice)
    }

    /// All counts, row-major
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    #[inline]
    pub fn row_totals(&self) -> &[u64] {
        &self.row_totals
    }

    #[inline]
    pub fn col_totals(&self) -> &[u64] {
        &self.col_totals
    }

    /// Grand total, N
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn group_labels(&self) -> &[String] {
        &self.group_labels
    }

    pub fn category_labels(&self) -> &[String] {
        &self.category_labels
    }

    pub fn group_label(&self, row: usize) -> Option<&str> {
        self.group_labels.get(row).map(String::as_str)
    }

    pub fn category_label(&self, col: usize) -> Option<&str> {
        self.category_labels.get(col).map(String::as_str)
    }

    /// Error unless `index` addresses a row
    pub(crate) fn check_row(&self, index: usize) -> Result<()> {
        if index < self.n_rows() {
            Ok(())
        } else {
            Err(AnalysisError::InvalidIndex {
                axis: Axis::Row,
                index,
                len: self.n_rows(),
            })
        }
    }

    /// Error unless `index` addresses a column
    pub(crate) fn check_col(&self, index: usize) -> Result<()> {
        if index < self.n_cols() {
            Ok(())
        } else {
            Err(AnalysisError::InvalidIndex {
                axis: Axis::Column,
                index,
                len: self.n_cols(),
            })
        }
    }

    /// The first row or column that sums to zero, if any
    pub fn zero_margin(&self) -> Option<(Axis, usize)> {
        let zero_row = self
            .row_totals
            .iter()
            .position(|&t| t == 0)
            .map(|ix| (Axis::Row, ix));
        zero_row.or_else(|| {
            self.col_totals
                .iter()
                .position(|&t| t == 0)
                .map(|ix| (Axis::Column, ix))
        })
    }

    /// Counts expected under independence, `R_i · C_j / N`
    ///
    /// # Errors
    ///
    /// `DegenerateTable` if any row or column sums to zero.
    ///
    /// ```
    /// # use proportions::ContingencyTable;
    /// let table = ContingencyTable::new(&[[12, 8], [6, 14]]).unwrap();
    /// let expected = table.expected_counts().unwrap();
    /// assert_eq!(expected, vec![vec![9.0, 11.0], vec![9.0, 11.0]]);
    ///
    /// let degenerate = ContingencyTable::new(&[[0, 0], [6, 14]]).unwrap();
    /// assert!(degenerate.expected_counts().is_err());
    /// ```
    pub fn expected_counts(&self) -> Result<Vec<Vec<f64>>> {
        if let Some((axis, index)) = self.zero_margin() {
            return Err(AnalysisError::DegenerateTable { axis, index });
        }

        let n = self.total as f64;
        Ok(self
            .row_totals
            .iter()
            .map(|&r| {
                self.col_totals
                    .iter()
                    .map(|&c| r as f64 * c as f64 / n)
                    .collect()
            })
            .collect())
    }
}

impl TryFrom<Vec<Vec<i64>>> for ContingencyTable {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<i64>>) -> std::result::Result<Self, Self::Error> {
        ContingencyTable::new(&rows)
    }
}

impl<const R: usize, const C: usize> TryFrom<[[i64; C]; R]> for ContingencyTable {
    type Error = ValidationError;

    fn try_from(rows: [[i64; C]; R]) -> std::result::Result<Self, Self::Error> {
        ContingencyTable::new(&rows)
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_labels: Vec<&str> = self
            .group_labels
            .iter()
            .map(String::as_str)
            .chain(once(TOTAL_LABEL))
            .collect();
        let col_labels: Vec<&str> = self
            .category_labels
            .iter()
            .map(String::as_str)
            .chain(once(TOTAL_LABEL))
            .collect();

        let totals_row = self.col_totals.iter().chain(once(&self.total));
        let cells: Vec<Vec<String>> = self
            .counts
            .iter()
            .zip(self.row_totals.iter())
            .map(|(row, total)| {
                row.iter().chain(once(total)).map(u64::to_string).collect()
            })
            .chain(once(totals_row.map(u64::to_string).collect()))
            .collect();

        write!(f, "{}", render_grid(&row_labels, &col_labels, &cells))
    }
}
