//! The combined analysis of a table
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::htest::{
    chi_square_independence, fisher_exact, ChiSquareIndependence, FisherExact,
};
use crate::interval::{agresti_caffo, agresti_coull, AgrestiCaffo, AgrestiCoull};
use crate::recommend::{compare_methods, Method, MethodComparison};
use crate::result::Result;
use crate::table::ContingencyTable;
use std::fmt;

/// Every applicable analysis of a table, in reading order
///
/// A step that cannot be computed is kept as its error, so one failing
/// method never hides the others.
///
/// # Example
///
/// ```
/// use proportions::{AnalysisConfig, ContingencyTable};
/// use proportions::report::full_analysis;
///
/// let table = ContingencyTable::new(&[[0, 0, 0], [4, 1, 2], [3, 3, 3]]).unwrap();
/// let report = full_analysis(&table, &AnalysisConfig::default());
///
/// // No Fisher test for a 3×3 table, and the empty row breaks χ²
/// assert!(report.fisher().is_none());
/// assert!(report.chi_square().is_err());
/// assert_eq!(report.agresti_coull().len(), 3);
/// assert!(report.comparison().recommended().is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Report {
    table: ContingencyTable,
    config: AnalysisConfig,
    fisher: Option<Result<FisherExact>>,
    chi_square: Result<ChiSquareIndependence>,
    agresti_coull: Vec<Result<AgrestiCoull>>,
    agresti_caffo: Option<Result<AgrestiCaffo>>,
    comparison: MethodComparison,
}

/// Run every analysis that applies to `table`
///
/// For 2×2 tables: Fisher's exact test with the configured alternative,
/// Agresti-Coull intervals per group, the Agresti-Caffo interval, then the
/// χ² test. Larger tables get the χ² test and Agresti-Coull intervals per
/// group. Both end with the method comparison. Intervals use the config's
/// success category.
pub fn full_analysis(table: &ContingencyTable, config: &AnalysisConfig) -> Report {
    let alpha = config.alpha();
    let success = config.success_category();
    let is_2x2 = table.is_2x2();

    let fisher =
        is_2x2.then(|| fisher_exact(table, config.alternative(), alpha));
    let agresti_coull = (0..table.n_rows())
        .map(|group| agresti_coull(table, group, success, alpha))
        .collect();
    let agresti_caffo = is_2x2.then(|| agresti_caffo(table, None, success, alpha));
    let chi_square = chi_square_independence(table, config);
    let comparison = compare_methods(table, config);

    log::debug!(
        "full analysis of a {}×{} table at alpha = {}",
        table.n_rows(),
        table.n_cols(),
        alpha
    );

    Report {
        table: table.clone(),
        config: config.clone(),
        fisher,
        chi_square,
        agresti_coull,
        agresti_caffo,
        comparison,
    }
}

impl Report {
    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Fisher's exact test; `None` unless the table is 2×2
    pub fn fisher(&self) -> Option<&Result<FisherExact>> {
        self.fisher.as_ref()
    }

    pub fn chi_square(&self) -> &Result<ChiSquareIndependence> {
        &self.chi_square
    }

    /// One Agresti-Coull interval per group
    pub fn agresti_coull(&self) -> &[Result<AgrestiCoull>] {
        &self.agresti_coull
    }

    /// Agresti-Caffo interval; `None` unless the table is 2×2
    pub fn agresti_caffo(&self) -> Option<&Result<AgrestiCaffo>> {
        self.agresti_caffo.as_ref()
    }

    pub fn comparison(&self) -> &MethodComparison {
        &self.comparison
    }
}

fn write_section<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    method: Method,
    res: &Result<T>,
) -> fmt::Result {
    match res {
        Ok(x) => writeln!(f, "{}\n", x),
        Err(err) => writeln!(f, "{}: not computable ({})\n", method, err),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "Proportion comparison ({} groups × {} categories, α = {})",
            self.table.n_rows(),
            self.table.n_cols(),
            self.config.alpha()
        );
        writeln!(f, "{}", title)?;
        writeln!(f, "{}\n", "=".repeat(title.chars().count()))?;
        writeln!(f, "{}\n", self.table)?;

        if let Some(fisher) = &self.fisher {
            write_section(f, Method::FisherExact, fisher)?;
            for ci in &self.agresti_coull {
                write_section(f, Method::AgrestiCoull, ci)?;
            }
            if let Some(caffo) = &self.agresti_caffo {
                write_section(f, Method::AgrestiCaffo, caffo)?;
            }
            write_section(f, Method::ChiSquare, &self.chi_square)?;
        } else {
            write_section(f, Method::ChiSquare, &self.chi_square)?;
            for ci in &self.agresti_coull {
                write_section(f, Method::AgrestiCoull, ci)?;
            }
        }

        write!(f, "{}", self.comparison)
    }
}
