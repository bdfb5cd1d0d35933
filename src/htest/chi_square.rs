//! Pearson's χ² test of independence for r×c tables
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::{Decision, Warning};
use crate::config::AnalysisConfig;
use crate::consts::{MAX_LOW_EXPECTED_SHARE, YATES_CORRECTION};
use crate::dist::ChiSquared;
use crate::result::Result;
use crate::table::{render_grid, ContingencyTable};
use crate::traits::Cdf;
use itertools::Itertools;
use std::fmt;

/// Result of Pearson's χ² test of independence
///
/// # Example
///
/// ```
/// use proportions::{AnalysisConfig, ContingencyTable};
/// use proportions::htest::chi_square_independence;
///
/// let table = ContingencyTable::new(&[
///     [25, 18, 12],
///     [30, 15, 8],
///     [15, 20, 17],
/// ]).unwrap();
///
/// let res = chi_square_independence(&table, &AnalysisConfig::default()).unwrap();
///
/// assert_eq!(res.dof(), 4);
/// assert!((res.statistic() - 9.076_995_185_930_75).abs() < 1E-9);
/// assert!((res.p_value() - 0.059_203_517_502_161_29).abs() < 1E-9);
/// assert!(res.warnings().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct ChiSquareIndependence {
    statistic: f64,
    dof: usize,
    p_value: f64,
    alpha: f64,
    yates_correction: bool,
    expected: Vec<Vec<f64>>,
    threshold: f64,
    warnings: Vec<Warning>,
    group_labels: Vec<String>,
    category_labels: Vec<String>,
}

/// χ² test of independence of rows and columns of `table`
///
/// Yates' continuity correction is applied to 2×2 tables when the config
/// asks for it; it is ignored for larger tables.
///
/// # Errors
///
/// `DegenerateTable` if a row or column sums to zero.
pub fn chi_square_independence(
    table: &ContingencyTable,
    config: &AnalysisConfig,
) -> Result<ChiSquareIndependence> {
    let expected = table.expected_counts()?;
    let yates_correction = config.yates_correction() && table.is_2x2();

    let statistic: f64 = table
        .counts()
        .iter()
        .flatten()
        .zip(expected.iter().flatten())
        .map(|(&obs, &exp)| {
            let diff = (obs as f64 - exp).abs();
            let diff = if yates_correction {
                // never pushes the observed count past its expectation
                (diff - YATES_CORRECTION).max(0.0)
            } else {
                diff
            };
            diff * diff / exp
        })
        .sum();

    let dof = (table.n_rows() - 1) * (table.n_cols() - 1);
    let p_value = ChiSquared::new_unchecked(dof as f64).sf(&statistic);

    let threshold = config.min_expected_count();
    let n_cells = table.n_rows() * table.n_cols();
    let n_low = expected.iter().flatten().filter(|&&e| e < threshold).count();
    let min_expected = min_of(&expected);

    let mut warnings = Vec::new();
    if n_low > 0 {
        log::warn!(
            "{} of {} expected counts are below {} (minimum {:.3})",
            n_low,
            n_cells,
            threshold,
            min_expected
        );
        warnings.push(Warning::LowExpectedCounts {
            n_low,
            n_cells,
            min_expected,
            threshold,
        });
    }

    log::debug!(
        "chi-square test on a {}×{} table: statistic = {}, dof = {}, p = {}",
        table.n_rows(),
        table.n_cols(),
        statistic,
        dof,
        p_value
    );

    Ok(ChiSquareIndependence {
        statistic,
        dof,
        p_value,
        alpha: config.alpha(),
        yates_correction,
        expected,
        threshold,
        warnings,
        group_labels: table.group_labels().to_vec(),
        category_labels: table.category_labels().to_vec(),
    })
}

fn min_of(xss: &[Vec<f64>]) -> f64 {
    xss.iter().flatten().copied().fold(f64::INFINITY, f64::min)
}

impl ChiSquareIndependence {
    /// Pearson's statistic `Σ (O - E)² / E`
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Degrees of freedom, `(r - 1)(c - 1)`
    pub fn dof(&self) -> usize {
        self.dof
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn decision(&self) -> Decision {
        Decision::from_p_value(self.p_value, self.alpha)
    }

    /// Whether Yates' continuity correction was applied
    pub fn yates_correction(&self) -> bool {
        self.yates_correction
    }

    /// Counts expected under independence
    pub fn expected(&self) -> &[Vec<f64>] {
        &self.expected
    }

    /// Smallest expected count
    pub fn min_expected(&self) -> f64 {
        min_of(&self.expected)
    }

    /// Number of expected counts below the warning threshold
    pub fn n_low_expected(&self) -> usize {
        self.expected
            .iter()
            .flatten()
            .filter(|&&e| e < self.threshold)
            .count()
    }

    /// Share of expected counts below the warning threshold
    pub fn low_expected_share(&self) -> f64 {
        let n_cells: usize = self.expected.iter().map(Vec::len).sum();
        self.n_low_expected() as f64 / n_cells as f64
    }

    /// Cochran's rule: no expected count below 1 and at most 20% below the
    /// threshold
    pub fn assumptions_met(&self) -> bool {
        self.min_expected() >= 1.0
            && self.low_expected_share() <= MAX_LOW_EXPECTED_SHARE
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Plain-language reading of the result
    pub fn conclusion(&self) -> String {
        match self.decision() {
            Decision::Reject => format!(
                "Group and category are associated (p = {:.4} < α = {})",
                self.p_value, self.alpha
            ),
            Decision::FailToReject => format!(
                "No significant association between group and category \
                 (p = {:.4} ≥ α = {})",
                self.p_value, self.alpha
            ),
        }
    }
}

impl fmt::Display for ChiSquareIndependence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chi-square test of independence")?;
        writeln!(
            f,
            "  χ² = {:.4}, df = {}, p-value = {:.4}",
            self.statistic, self.dof, self.p_value
        )?;
        if self.yates_correction {
            writeln!(f, "  Yates' continuity correction applied")?;
        }

        let row_labels: Vec<&str> =
            self.group_labels.iter().map(String::as_str).collect();
        let col_labels: Vec<&str> =
            self.category_labels.iter().map(String::as_str).collect();
        let cells: Vec<Vec<String>> = self
            .expected
            .iter()
            .map(|row| row.iter().map(|e| format!("{:.2}", e)).collect())
            .collect();
        let grid = render_grid(&row_labels, &col_labels, &cells);
        writeln!(f, "  Expected counts:")?;
        writeln!(f, "{}", grid.lines().map(|line| format!("    {}", line)).join("\n"))?;

        writeln!(f, "  Decision: {} at α = {}", self.decision(), self.alpha)?;
        for warning in &self.warnings {
            writeln!(f, "  Warning: {}", warning)?;
        }
        write!(f, "  Conclusion: {}", self.conclusion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{AnalysisError, Axis};
    use crate::test_basic_impls;

    const TOL: f64 = 1E-9;

    fn table(rows: &[Vec<u64>]) -> ContingencyTable {
        ContingencyTable::new(rows).unwrap()
    }

    fn pearson(rows: &[Vec<u64>]) -> ChiSquareIndependence {
        chi_square_independence(&table(rows), &AnalysisConfig::default()).unwrap()
    }

    fn yates(rows: &[Vec<u64>]) -> ChiSquareIndependence {
        let config = AnalysisConfig::default().with_yates_correction(true);
        chi_square_independence(&table(rows), &config).unwrap()
    }

    test_basic_impls!(ChiSquareIndependence, pearson(&[vec![3, 12], vec![11, 4]]));

    #[test]
    fn balanced_table_has_zero_statistic() {
        let res = pearson(&[vec![10, 10], vec![10, 10]]);
        assert::close(res.statistic(), 0.0, TOL);
        assert_eq!(res.dof(), 1);
        assert::close(res.p_value(), 1.0, TOL);

        let res = yates(&[vec![10, 10], vec![10, 10]]);
        assert::close(res.statistic(), 0.0, TOL);
    }

    #[test]
    fn two_by_two_pearson() {
        let res = pearson(&[vec![12, 8], vec![6, 14]]);
        assert::close(res.statistic(), 3.636_363_636_363_636_4, TOL);
        assert::close(res.p_value(), 0.056_530_277_167_404_22, TOL);
        assert::close(res.min_expected(), 9.0, TOL);
        assert!(!res.yates_correction());

        let res = pearson(&[vec![3, 12], vec![11, 4]]);
        assert::close(res.statistic(), 8.571_428_571_428_571, TOL);
        assert::close(res.p_value(), 0.003_414_791_178_117_817_2, TOL);
        assert_eq!(res.decision(), Decision::Reject);
    }

    #[test]
    fn two_by_two_yates() {
        let res = yates(&[vec![12, 8], vec![6, 14]]);
        assert!(res.yates_correction());
        assert::close(res.statistic(), 2.525_252_525_252_525_3, TOL);
        assert::close(res.p_value(), 0.112_036_843_685_563_66, TOL);

        let res = yates(&[vec![5, 1], vec![0, 3]]);
        assert::close(res.statistic(), 2.756_25, TOL);
        assert::close(res.p_value(), 0.096_875_075_026_274_59, TOL);

        let res = yates(&[vec![6, 9], vec![12, 8]]);
        assert::close(res.statistic(), 0.688_657_407_407_407_4, TOL);
        assert::close(res.p_value(), 0.406_621_421_952_215_4, TOL);
    }

    #[test]
    fn yates_is_ignored_for_larger_tables() {
        let rows = [vec![2, 3, 1], vec![4, 1, 2]];
        let res = yates(&rows);
        assert!(!res.yates_correction());
        assert::close(res.statistic(), pearson(&rows).statistic(), TOL);
    }

    #[test]
    fn three_by_three() {
        let res = pearson(&[vec![25, 18, 12], vec![30, 15, 8], vec![15, 20, 17]]);
        assert_eq!(res.dof(), 4);
        assert::close(res.statistic(), 9.076_995_185_930_75, TOL);
        assert::close(res.p_value(), 0.059_203_517_502_161_29, TOL);
        assert::close(res.min_expected(), 12.025, TOL);
        assert!(res.assumptions_met());
        assert_eq!(res.decision(), Decision::FailToReject);
    }

    #[test]
    fn four_by_three() {
        let res = pearson(&[
            vec![32, 18, 10],
            vec![45, 25, 15],
            vec![38, 30, 12],
            vec![22, 15, 8],
        ]);
        assert_eq!(res.dof(), 6);
        assert::close(res.statistic(), 1.558_573_877_460_738_8, TOL);
        assert::close(res.p_value(), 0.955_509_187_637_995_3, TOL);
        assert::close(res.min_expected(), 7.5, TOL);
    }

    #[test]
    fn low_expected_counts_warn() {
        let res = pearson(&[vec![2, 3, 1], vec![4, 1, 2]]);
        assert_eq!(res.dof(), 2);
        assert::close(res.statistic(), 1.934_523_809_523_809_5, TOL);
        assert::close(res.p_value(), 0.380_122_425_886_870_87, TOL);
        assert_eq!(res.n_low_expected(), 6);
        assert::close(res.low_expected_share(), 1.0, TOL);
        assert!(!res.assumptions_met());
        assert_eq!(
            res.warnings(),
            &[Warning::LowExpectedCounts {
                n_low: 6,
                n_cells: 6,
                min_expected: 18.0 / 13.0,
                threshold: 5.0,
            }]
        );
    }

    #[test]
    fn threshold_follows_config() {
        let config = AnalysisConfig::default().with_min_expected_count(1.0).unwrap();
        let res =
            chi_square_independence(&table(&[vec![2, 3, 1], vec![4, 1, 2]]), &config)
                .unwrap();
        assert!(res.warnings().is_empty());
        assert!(res.assumptions_met());
    }

    #[test]
    fn single_low_cell_in_2x2_warns() {
        let res = pearson(&[vec![9, 1], vec![2, 5]]);
        assert::close(res.statistic(), 6.803_679_653_679_654, TOL);
        assert::close(res.p_value(), 0.009_097_019_894_327_516, TOL);
        assert::close(res.min_expected(), 2.470_588_235_294_117_6, TOL);
        assert_eq!(res.warnings().len(), 1);
    }

    #[test]
    fn zero_row_is_degenerate() {
        let res = chi_square_independence(
            &table(&[vec![0, 0, 0], vec![4, 1, 2]]),
            &AnalysisConfig::default(),
        );
        assert_eq!(
            res,
            Err(AnalysisError::DegenerateTable {
                axis: Axis::Row,
                index: 0
            })
        );
    }

    #[test]
    fn display_shows_expected_counts() {
        let res = pearson(&[vec![12, 8], vec![6, 14]]);
        let text = res.to_string();
        assert!(text.starts_with("Chi-square test of independence\n"));
        assert!(text.contains("χ² = 3.6364, df = 1, p-value = 0.0565"));
        assert!(text.contains("Group 1        9.00       11.00"));
        assert!(!text.contains("Warning"));
    }
}
