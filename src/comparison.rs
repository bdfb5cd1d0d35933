//! Analysis of a fixed contingency table
use crate::config::{AnalysisConfig, Alternative};
use crate::htest::{
    chi_square_independence, fisher_exact, ChiSquareIndependence, FisherExact,
};
use crate::interval::{agresti_caffo, agresti_coull, AgrestiCaffo, AgrestiCoull};
use crate::recommend::{compare_methods, MethodComparison};
use crate::report::{full_analysis, Report};
use crate::result::Result;
use crate::table::ContingencyTable;
use num_traits::PrimInt;

/// Compares proportions across the groups of a contingency table
///
/// The table and configuration are fixed at construction; every analysis
/// is recomputed from them on each call.
///
/// # Example
///
/// ```
/// use proportions::{Alternative, ContingencyTable, ProportionComparison};
///
/// let table = ContingencyTable::new(&[[3, 12], [11, 4]])
///     .unwrap()
///     .with_group_labels(["Vaccinated", "Placebo"])
///     .unwrap()
///     .with_category_labels(["Infected", "Healthy"])
///     .unwrap();
///
/// let cmp = ProportionComparison::new(table);
///
/// let fisher = cmp.fisher_exact(Alternative::TwoSided).unwrap();
/// assert!(fisher.p_value() < 0.01);
///
/// let chi2 = cmp.chi_square().unwrap();
/// assert_eq!(chi2.dof(), 1);
///
/// // Infection rate among the vaccinated
/// let ci = cmp.agresti_coull(0, 0).unwrap();
/// assert!(ci.interval().lower() < 0.2 && 0.2 < ci.interval().upper());
///
/// let diff = cmp.agresti_caffo(None, 0).unwrap();
/// assert!(!diff.includes_zero());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProportionComparison {
    table: ContingencyTable,
    config: AnalysisConfig,
}

impl ProportionComparison {
    /// Analyze `table` with the default configuration
    pub fn new(table: ContingencyTable) -> Self {
        Self::with_config(table, AnalysisConfig::default())
    }

    /// Analyze `table` with `config`
    pub fn with_config(table: ContingencyTable, config: AnalysisConfig) -> Self {
        ProportionComparison { table, config }
    }

    /// Validate `rows` and analyze them with the default configuration
    ///
    /// ```
    /// # use proportions::ProportionComparison;
    /// assert!(ProportionComparison::from_rows(&[[12, 8], [6, 14]]).is_ok());
    /// assert!(ProportionComparison::from_rows(&[vec![12, 8], vec![6]]).is_err());
    /// ```
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: PrimInt,
    {
        Ok(Self::new(ContingencyTable::new(rows)?))
    }

    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The table with labels and totals, ready to print
    pub fn display_table(&self) -> String {
        self.table.to_string()
    }

    /// Fisher's exact test at the configured significance level
    pub fn fisher_exact(&self, alternative: Alternative) -> Result<FisherExact> {
        fisher_exact(&self.table, alternative, self.config.alpha())
    }

    /// χ² test of independence
    pub fn chi_square(&self) -> Result<ChiSquareIndependence> {
        chi_square_independence(&self.table, &self.config)
    }

    /// Agresti-Coull interval for category `success` within `group`
    pub fn agresti_coull(&self, group: usize, success: usize) -> Result<AgrestiCoull> {
        agresti_coull(&self.table, group, success, self.config.alpha())
    }

    /// Agresti-Caffo interval for the difference between two groups
    pub fn agresti_caffo(
        &self,
        pair: Option<(usize, usize)>,
        success: usize,
    ) -> Result<AgrestiCaffo> {
        agresti_caffo(&self.table, pair, success, self.config.alpha())
    }

    /// Which test to use for this table
    pub fn compare_methods(&self) -> MethodComparison {
        compare_methods(&self.table, &self.config)
    }

    /// Every applicable analysis
    pub fn full_analysis(&self) -> Report {
        full_analysis(&self.table, &self.config)
    }
}

impl From<ContingencyTable> for ProportionComparison {
    fn from(table: ContingencyTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::htest::Decision;
    use crate::recommend::Method;
    use crate::result::{AnalysisError, Axis};

    fn comparison(rows: &[Vec<u64>]) -> ProportionComparison {
        ProportionComparison::from_rows(rows).unwrap()
    }

    #[test]
    fn analyses_share_the_configured_alpha() {
        let table = ContingencyTable::new(&[[12, 8], [6, 14]]).unwrap();
        let cmp = ProportionComparison::with_config(
            table,
            AnalysisConfig::new(0.1).unwrap(),
        );
        assert_eq!(cmp.fisher_exact(Alternative::TwoSided).unwrap().alpha(), 0.1);
        assert_eq!(cmp.chi_square().unwrap().alpha(), 0.1);
        assert_eq!(cmp.agresti_coull(0, 0).unwrap().alpha(), 0.1);
        assert_eq!(cmp.agresti_caffo(None, 0).unwrap().alpha(), 0.1);
        assert_eq!(
            cmp.chi_square().unwrap().decision(),
            Decision::Reject
        );
    }

    #[test]
    fn from_rows_reports_validation_errors() {
        let res = ProportionComparison::from_rows(&[[-1, 2], [3, 4]]);
        assert!(matches!(res, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn index_errors_pass_through() {
        let cmp = comparison(&[vec![12, 8], vec![6, 14]]);
        assert_eq!(
            cmp.agresti_coull(2, 0),
            Err(AnalysisError::InvalidIndex {
                axis: Axis::Row,
                index: 2,
                len: 2
            })
        );
    }

    #[test]
    fn display_table_matches_table_display() {
        let cmp = comparison(&[vec![12, 8], vec![6, 14]]);
        assert_eq!(cmp.display_table(), cmp.table().to_string());
    }

    #[test]
    fn method_comparison() {
        let cmp = comparison(&[vec![25, 18, 12], vec![30, 15, 8], vec![15, 20, 17]]);
        assert_eq!(cmp.compare_methods().recommended(), Some(Method::ChiSquare));
        assert_eq!(
            cmp.fisher_exact(Alternative::TwoSided),
            Err(AnalysisError::UnsupportedTableShape {
                method: Method::FisherExact,
                n_rows: 3,
                n_cols: 3,
            })
        );
        assert!(cmp.full_analysis().fisher().is_none());
    }
}
