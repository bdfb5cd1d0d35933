//! Choosing between the exact and asymptotic tests
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::config::{Alternative, AnalysisConfig};
use crate::consts::SMALL_SAMPLE_SIZE;
use crate::htest::{
    chi_square_independence, fisher_exact, ChiSquareIndependence, Decision,
    FisherExact,
};
use crate::result::{AnalysisError, Result};
use crate::table::ContingencyTable;
use std::fmt;

/// The analysis methods offered for a contingency table
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Method {
    /// Fisher's exact test of a 2×2 table
    FisherExact,
    /// Pearson's χ² test of independence
    ChiSquare,
    /// Agresti-Coull interval for one proportion
    AgrestiCoull,
    /// Agresti-Caffo interval for a difference of two proportions
    AgrestiCaffo,
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::FisherExact => "Fisher's exact test",
            Method::ChiSquare => "Chi-square test of independence",
            Method::AgrestiCoull => "Agresti-Coull interval",
            Method::AgrestiCaffo => "Agresti-Caffo interval",
        }
    }

    /// What the method needs from the table
    pub fn shape_requirement(&self) -> &str {
        match self {
            Method::FisherExact => "a 2×2 table",
            Method::ChiSquare => "at least 2 rows and 2 columns",
            Method::AgrestiCoull => "at least one group",
            Method::AgrestiCaffo => "exactly two distinct groups",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which test to trust for a table, and why
///
/// # Example
///
/// ```
/// use proportions::{AnalysisConfig, ContingencyTable, Method};
/// use proportions::recommend::compare_methods;
///
/// let table = ContingencyTable::new(&[[9, 1], [2, 5]]).unwrap();
/// let cmp = compare_methods(&table, &AnalysisConfig::default());
///
/// assert_eq!(cmp.recommended(), Some(Method::FisherExact));
/// assert_eq!(cmp.interval_method(), Method::AgrestiCaffo);
/// assert!(cmp.is_small_sample());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MethodComparison {
    n_rows: usize,
    n_cols: usize,
    total: u64,
    min_expected: Option<f64>,
    small_sample: bool,
    fisher: Option<Result<FisherExact>>,
    chi_square: Result<ChiSquareIndependence>,
    recommended: Option<Method>,
    interval_method: Method,
    reason: String,
    notes: Vec<String>,
}

impl MethodComparison {
    /// The recommended test. `None` when no test can be computed.
    pub fn recommended(&self) -> Option<Method> {
        self.recommended
    }

    /// The interval method that fits the table
    pub fn interval_method(&self) -> Method {
        self.interval_method
    }

    /// Why the test was recommended
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Caveats raised by the tests
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Two-sided Fisher result; `None` unless the table is 2×2
    pub fn fisher(&self) -> Option<&Result<FisherExact>> {
        self.fisher.as_ref()
    }

    pub fn chi_square(&self) -> &Result<ChiSquareIndependence> {
        &self.chi_square
    }

    /// Smallest expected count, when the table has no empty margin
    pub fn min_expected(&self) -> Option<f64> {
        self.min_expected
    }

    /// Fewer than 20 observations, or some expected count below the
    /// configured threshold
    pub fn is_small_sample(&self) -> bool {
        self.small_sample
    }

    /// Whether the χ² test can be used at all
    pub fn chi_square_valid(&self) -> bool {
        self.chi_square.is_ok()
    }
}

/// Compare the tests that apply to `table` and recommend one
pub fn compare_methods(
    table: &ContingencyTable,
    config: &AnalysisConfig,
) -> MethodComparison {
    let (n_rows, n_cols) = table.shape();
    let total = table.total();
    let chi_square = chi_square_independence(table, config);
    let min_expected = chi_square.as_ref().ok().map(|x2| x2.min_expected());

    let mut notes: Vec<String> = Vec::new();
    if let Err(err) = &chi_square {
        notes.push(format!("Chi-square test unavailable: {}", err));
    }
    if let Ok(x2) = &chi_square {
        notes.extend(x2.warnings().iter().map(|w| w.to_string()));
    }

    let small_sample = total < SMALL_SAMPLE_SIZE
        || min_expected.map_or(true, |m| m < config.min_expected_count());

    let comparison = if table.is_2x2() {
        // The χ² test is two-sided, so the side-by-side comparison is too
        let fisher = fisher_exact(table, Alternative::TwoSided, config.alpha());
        let reason = if small_sample {
            format!(
                "Small sample (N = {}): Fisher's exact test does not rely \
                 on a large-sample approximation",
                total
            )
        } else {
            format!(
                "N = {} is large enough for both tests to be valid; \
                 Fisher's exact test is preferred because it is exact",
                total
            )
        };
        if let (Ok(f), Ok(x2)) = (&fisher, &chi_square) {
            if f.decision() != x2.decision() {
                notes.push(format!(
                    "The tests disagree at α = {}: Fisher p = {:.4}, \
                     chi-square p = {:.4}",
                    config.alpha(),
                    f.p_value(),
                    x2.p_value()
                ));
            }
        }
        MethodComparison {
            n_rows,
            n_cols,
            total,
            min_expected,
            small_sample,
            fisher: Some(fisher),
            chi_square,
            recommended: Some(Method::FisherExact),
            interval_method: Method::AgrestiCaffo,
            reason,
            notes,
        }
    } else {
        let (recommended, reason) = match &chi_square {
            Ok(x2) if x2.warnings().is_empty() => (
                Some(Method::ChiSquare),
                format!(
                    "{}×{} table: the chi-square test is the only test \
                     available and its expected counts are adequate",
                    n_rows, n_cols
                ),
            ),
            Ok(_) => (
                Some(Method::ChiSquare),
                format!(
                    "{}×{} table: the chi-square test is the only test \
                     available; interpret it with caution",
                    n_rows, n_cols
                ),
            ),
            Err(_) => (
                None,
                format!(
                    "{}×{} table with an empty margin: no test can be computed",
                    n_rows, n_cols
                ),
            ),
        };
        MethodComparison {
            n_rows,
            n_cols,
            total,
            min_expected,
            small_sample,
            fisher: None,
            chi_square,
            recommended,
            interval_method: Method::AgrestiCoull,
            reason,
            notes,
        }
    };

    log::debug!(
        "recommended {:?} for a {}×{} table (N = {})",
        comparison.recommended,
        n_rows,
        n_cols,
        total
    );
    comparison
}

fn write_test(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    res: std::result::Result<(f64, Decision), &AnalysisError>,
) -> fmt::Result {
    match res {
        Ok((p_value, decision)) => writeln!(
            f,
            "  {:<16} p = {:.4} ({})",
            name, p_value, decision
        ),
        Err(err) => writeln!(f, "  {:<16} not computable: {}", name, err),
    }
}

impl fmt::Display for MethodComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Method comparison")?;
        writeln!(
            f,
            "  Table: {}×{}, N = {}",
            self.n_rows, self.n_cols, self.total
        )?;
        if let Some(m) = self.min_expected {
            writeln!(f, "  Minimum expected count: {:.2}", m)?;
        }
        if let Some(fisher) = &self.fisher {
            let res = fisher.as_ref().map(|x| (x.p_value(), x.decision()));
            write_test(f, "Fisher exact:", res)?;
        }
        let res = self
            .chi_square
            .as_ref()
            .map(|x| (x.p_value(), x.decision()));
        write_test(f, "Chi-square:", res)?;
        match self.recommended {
            Some(method) => writeln!(f, "  Recommended test: {}", method)?,
            None => writeln!(f, "  Recommended test: none")?,
        }
        writeln!(f, "  Reason: {}", self.reason)?;
        writeln!(f, "  Interval method: {}", self.interval_method)?;
        for note in &self.notes {
            writeln!(f, "  Note: {}", note)?;
        }
        Ok(())
    }
}
