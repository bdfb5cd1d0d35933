//! Fisher's exact test for 2×2 tables
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::Decision;
use crate::config::{check_alpha, Alternative};
use crate::consts::FISHER_REL_TOL;
use crate::dist::Hypergeometric;
use crate::misc::logsumexp;
use crate::recommend::Method;
use crate::result::{AnalysisError, Result};
use crate::table::ContingencyTable;
use crate::traits::{Cdf, HasDensity};
use std::fmt;

/// Result of Fisher's exact test on a 2×2 table
///
/// Conditional on the margins, the top-left count `a` of
///
/// ```text
///   a  b
///   c  d
/// ```
///
/// follows a [`Hypergeometric`] distribution with population `N`, `a + b`
/// marked items and `a + c` draws. The p-value sums that distribution over
/// the tables that are at least as extreme as the observed one.
///
/// # Example
///
/// ```
/// use proportions::{Alternative, ContingencyTable};
/// use proportions::htest::{fisher_exact, Decision};
///
/// let table = ContingencyTable::new(&[[3, 12], [11, 4]]).unwrap();
/// let res = fisher_exact(&table, Alternative::TwoSided, 0.05).unwrap();
///
/// assert!((res.p_value() - 0.009_220_570_313_398_512).abs() < 1E-10);
/// assert_eq!(res.decision(), Decision::Reject);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct FisherExact {
    counts: [[u64; 2]; 2],
    odds_ratio: f64,
    p_value: f64,
    alternative: Alternative,
    alpha: f64,
    group_labels: [String; 2],
    category_label: String,
}

/// Fisher's exact test of `table` against `alternative` at level `alpha`
///
/// # Errors
///
/// - `UnsupportedTableShape` unless `table` is 2×2
/// - `Validation` if `alpha` is not in (0, 1)
pub fn fisher_exact(
    table: &ContingencyTable,
    alternative: Alternative,
    alpha: f64,
) -> Result<FisherExact> {
    if !table.is_2x2() {
        return Err(AnalysisError::UnsupportedTableShape {
            method: Method::FisherExact,
            n_rows: table.n_rows(),
            n_cols: table.n_cols(),
        });
    }
    check_alpha(alpha)?;

    let counts = [
        [table.counts()[0][0], table.counts()[0][1]],
        [table.counts()[1][0], table.counts()[1][1]],
    ];
    let [[a, b], [c, d]] = counts;

    let odds_ratio = odds_ratio(a, b, c, d);
    let p_value = if table.zero_margin().is_some() {
        // Only one table shares these margins
        1.0
    } else {
        let hg = Hypergeometric::new_unchecked(table.total(), a + b, a + c);
        p_value(&hg, a, alternative)
    };

    log::debug!(
        "Fisher's exact test ({}) on [[{}, {}], [{}, {}]]: OR = {}, p = {}",
        alternative,
        a,
        b,
        c,
        d,
        odds_ratio,
        p_value
    );

    Ok(FisherExact {
        counts,
        odds_ratio,
        p_value,
        alternative,
        alpha,
        group_labels: [
            table.group_labels()[0].clone(),
            table.group_labels()[1].clone(),
        ],
        category_label: table.category_labels()[0].clone(),
    })
}

/// Sample odds ratio `ad / bc`
fn odds_ratio(a: u64, b: u64, c: u64, d: u64) -> f64 {
    let ad = a as f64 * d as f64;
    let bc = b as f64 * c as f64;
    if bc == 0.0 {
        if ad == 0.0 {
            f64::NAN
        } else {
            f64::INFINITY
        }
    } else {
        ad / bc
    }
}

fn p_value(hg: &Hypergeometric, a: u64, alternative: Alternative) -> f64 {
    match alternative {
        Alternative::Less => hg.cdf(&a),
        Alternative::Greater => {
            if a == 0 {
                1.0
            } else {
                hg.sf(&(a - 1))
            }
        }
        Alternative::TwoSided => {
            // Every table no more probable than the observed one, with a
            // relative tolerance so that ties survive rounding
            let threshold = hg.ln_f(&a) + FISHER_REL_TOL.ln();
            let ln_fs: Vec<f64> = hg
                .support()
                .map(|k| hg.ln_f(&k))
                .filter(|&ln_f| ln_f <= threshold)
                .collect();
            logsumexp(&ln_fs).exp().min(1.0)
        }
    }
}

impl FisherExact {
    /// Run the test directly on the counts `[[a, b], [c, d]]`
    ///
    /// ```
    /// # use proportions::Alternative;
    /// # use proportions::htest::FisherExact;
    /// let res = FisherExact::from_counts([[12, 8], [6, 14]], Alternative::Greater, 0.05)
    ///     .unwrap();
    /// assert!((res.odds_ratio() - 3.5).abs() < 1E-12);
    /// assert!((res.p_value() - 0.055_484_768_513_737_9).abs() < 1E-10);
    /// ```
    pub fn from_counts(
        counts: [[u64; 2]; 2],
        alternative: Alternative,
        alpha: f64,
    ) -> Result<Self> {
        let table = ContingencyTable::new(&counts)?;
        fisher_exact(&table, alternative, alpha)
    }

    /// The observed counts `[[a, b], [c, d]]`
    pub fn counts(&self) -> [[u64; 2]; 2] {
        self.counts
    }

    /// Sample odds ratio `ad / bc`. Infinite when `bc = 0 < ad`, NaN when
    /// both products are zero.
    pub fn odds_ratio(&self) -> f64 {
        self.odds_ratio
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn decision(&self) -> Decision {
        Decision::from_p_value(self.p_value, self.alpha)
    }

    /// Each group's observed proportion of the first category; `None` for
    /// an empty group
    pub fn proportions(&self) -> [Option<f64>; 2] {
        let prop = |[x, y]: [u64; 2]| {
            let n = x + y;
            if n == 0 {
                None
            } else {
                Some(x as f64 / n as f64)
            }
        };
        [prop(self.counts[0]), prop(self.counts[1])]
    }

    pub fn group_labels(&self) -> &[String; 2] {
        &self.group_labels
    }

    /// Plain-language reading of the result
    pub fn conclusion(&self) -> String {
        let [g1, g2] = &self.group_labels;
        let cat = &self.category_label;
        match (self.decision(), self.alternative) {
            (Decision::Reject, Alternative::TwoSided) => format!(
                "The proportion of {} differs significantly between {} and {} \
                 (p = {:.4} < α = {})",
                cat, g1, g2, self.p_value, self.alpha
            ),
            (Decision::Reject, Alternative::Less) => format!(
                "The proportion of {} is significantly lower in {} than in {} \
                 (p = {:.4} < α = {})",
                cat, g1, g2, self.p_value, self.alpha
            ),
            (Decision::Reject, Alternative::Greater) => format!(
                "The proportion of {} is significantly higher in {} than in {} \
                 (p = {:.4} < α = {})",
                cat, g1, g2, self.p_value, self.alpha
            ),
            (Decision::FailToReject, _) => format!(
                "No significant association between group and {} \
                 (p = {:.4} ≥ α = {})",
                cat, self.p_value, self.alpha
            ),
        }
    }
}

impl fmt::Display for FisherExact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fisher's exact test ({})", self.alternative)?;
        writeln!(f, "  Odds ratio: {:.4}", self.odds_ratio)?;
        writeln!(f, "  p-value: {:.4}", self.p_value)?;
        for (label, prop) in self.group_labels.iter().zip(self.proportions()) {
            match prop {
                Some(p) => writeln!(
                    f,
                    "  P({} | {}) = {:.4}",
                    self.category_label, label, p
                )?,
                None => writeln!(
                    f,
                    "  P({} | {}) undefined (empty group)",
                    self.category_label, label
                )?,
            }
        }
        writeln!(f, "  Decision: {} at α = {}", self.decision(), self.alpha)?;
        write!(f, "  Conclusion: {}", self.conclusion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;

    const TOL: f64 = 1E-10;

    test_basic_impls!(
        FisherExact,
        FisherExact::from_counts([[3, 12], [11, 4]], Alternative::TwoSided, 0.05)
            .unwrap()
    );

    fn p_values(counts: [[u64; 2]; 2]) -> [f64; 3] {
        [Alternative::TwoSided, Alternative::Less, Alternative::Greater].map(
            |alt| FisherExact::from_counts(counts, alt, 0.05).unwrap().p_value(),
        )
    }

    #[test]
    fn balanced_table() {
        let [two, less, greater] = p_values([[10, 10], [10, 10]]);
        assert::close(two, 1.0, TOL);
        assert::close(less, 0.623_814_432_718_045_4, TOL);
        assert::close(greater, 0.623_814_432_718_045_4, TOL);
    }

    #[test]
    fn moderate_association() {
        let [two, less, greater] = p_values([[12, 8], [6, 14]]);
        assert::close(two, 0.110_969_537_027_475_8, TOL);
        assert::close(less, 0.987_579_139_811_088_4, TOL);
        assert::close(greater, 0.055_484_768_513_737_9, TOL);
    }

    #[test]
    fn vaccine_trial() {
        let [two, less, greater] = p_values([[3, 12], [11, 4]]);
        assert::close(two, 0.009_220_570_313_398_512, TOL);
        assert::close(less, 0.004_610_285_156_699_256, TOL);
        assert::close(greater, 0.999_660_541_246_404_7, TOL);
    }

    #[test]
    fn small_skewed_table() {
        let [two, less, greater] = p_values([[9, 1], [2, 5]]);
        assert::close(two, 0.034_502_262_443_438_914, TOL);
        assert::close(less, 0.999_434_389_140_271_5, TOL);
        assert::close(greater, 0.017_533_936_651_583_71, TOL);
    }

    #[test]
    fn table_with_a_zero_cell() {
        let [two, less, greater] = p_values([[5, 1], [0, 3]]);
        assert::close(two, 0.047_619_047_619_047_62, TOL);
        assert::close(less, 1.0, TOL);
        assert::close(greater, 0.047_619_047_619_047_62, TOL);

        let res =
            FisherExact::from_counts([[5, 1], [0, 3]], Alternative::TwoSided, 0.05)
                .unwrap();
        assert_eq!(res.odds_ratio(), f64::INFINITY);
    }

    #[test]
    fn seed_germination() {
        let [two, less, greater] = p_values([[6, 9], [12, 8]]);
        assert::close(two, 0.314_529_831_858_264_4, TOL);
        assert::close(less, 0.203_580_467_830_600_83, TOL);
        assert::close(greater, 0.935_366_187_873_805, TOL);
    }

    #[test]
    fn odds_ratio_edge_cases() {
        assert::close(odds_ratio(12, 8, 6, 14), 3.5, 1E-12);
        assert_eq!(odds_ratio(0, 3, 4, 5), 0.0);
        assert_eq!(odds_ratio(2, 0, 4, 5), f64::INFINITY);
        assert!(odds_ratio(0, 0, 4, 5).is_nan());
    }

    #[test]
    fn zero_margin_gives_p_of_one() {
        for alt in [Alternative::TwoSided, Alternative::Less, Alternative::Greater]
        {
            let res = FisherExact::from_counts([[0, 0], [4, 1]], alt, 0.05).unwrap();
            assert_eq!(res.p_value(), 1.0);
            assert!(res.odds_ratio().is_nan());
            assert_eq!(res.proportions()[0], None);
        }
    }

    #[test]
    fn three_by_three_is_unsupported() {
        let table =
            ContingencyTable::new(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap();
        assert_eq!(
            fisher_exact(&table, Alternative::TwoSided, 0.05),
            Err(AnalysisError::UnsupportedTableShape {
                method: Method::FisherExact,
                n_rows: 3,
                n_cols: 3,
            })
        );
    }

    #[test]
    fn two_by_three_is_unsupported() {
        let table = ContingencyTable::new(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert!(fisher_exact(&table, Alternative::TwoSided, 0.05).is_err());
    }

    #[test]
    fn invalid_alpha_is_rejected() {
        let res = FisherExact::from_counts([[1, 2], [3, 4]], Alternative::Less, 0.0);
        assert!(matches!(res, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn decision_follows_alpha() {
        let res =
            FisherExact::from_counts([[12, 8], [6, 14]], Alternative::TwoSided, 0.05)
                .unwrap();
        assert_eq!(res.decision(), Decision::FailToReject);
        assert!(res.conclusion().starts_with("No significant association"));

        let res =
            FisherExact::from_counts([[12, 8], [6, 14]], Alternative::TwoSided, 0.2)
                .unwrap();
        assert_eq!(res.decision(), Decision::Reject);
    }

    #[test]
    fn one_sided_conclusion_names_the_direction() {
        let table = ContingencyTable::new(&[[3, 12], [11, 4]])
            .unwrap()
            .with_group_labels(["Vaccinated", "Placebo"])
            .unwrap()
            .with_category_labels(["Infected", "Healthy"])
            .unwrap();
        let res = fisher_exact(&table, Alternative::Less, 0.05).unwrap();
        assert_eq!(
            res.conclusion(),
            "The proportion of Infected is significantly lower in Vaccinated \
             than in Placebo (p = 0.0046 < α = 0.05)"
        );
    }

    #[test]
    fn proportions_of_first_category() {
        let res =
            FisherExact::from_counts([[3, 12], [11, 4]], Alternative::TwoSided, 0.05)
                .unwrap();
        let [p1, p2] = res.proportions();
        assert::close(p1.unwrap(), 0.2, 1E-12);
        assert::close(p2.unwrap(), 11.0 / 15.0, 1E-12);
    }
}
