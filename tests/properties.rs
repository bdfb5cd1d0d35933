use proportions::htest::{chi_square_independence, Decision};
use proportions::prelude::*;

const P_TOL: f64 = 1E-9;

fn cmp(rows: &[Vec<u64>]) -> ProportionComparison {
    ProportionComparison::from_rows(rows).unwrap()
}

#[test]
fn chi_square_dof_is_product_of_margins_minus_one() {
    let shapes = [(2, 2), (2, 3), (3, 3), (4, 3), (5, 2)];
    for (r, c) in shapes {
        let rows: Vec<Vec<u64>> = (0..r)
            .map(|i| (0..c).map(|j| (3 + i * c + j) as u64).collect())
            .collect();
        let chi2 = cmp(&rows).chi_square().unwrap();
        assert_eq!(chi2.dof(), (r - 1) * (c - 1));
    }
}

#[test]
fn balanced_table_shows_no_association() {
    let analysis = cmp(&[vec![10, 10], vec![10, 10]]);
    let fisher = analysis.fisher_exact(Alternative::TwoSided).unwrap();
    let chi2 = analysis.chi_square().unwrap();

    assert::close(fisher.p_value(), 1.0, P_TOL);
    assert::close(fisher.odds_ratio(), 1.0, P_TOL);
    assert::close(chi2.statistic(), 0.0, P_TOL);
    assert_eq!(chi2.dof(), 1);
}

#[test]
fn decisions_are_consistent_with_alpha() {
    let analysis = cmp(&[vec![12, 8], vec![6, 14]]);
    let fisher = analysis.fisher_exact(Alternative::TwoSided).unwrap();
    let chi2 = analysis.chi_square().unwrap();

    assert_eq!(fisher.decision().is_reject(), fisher.p_value() < 0.05);
    assert_eq!(chi2.decision().is_reject(), chi2.p_value() < 0.05);
    // Both hover just above the 5% level
    assert_eq!(fisher.decision(), Decision::FailToReject);
    assert_eq!(chi2.decision(), Decision::FailToReject);
}

#[test]
fn fisher_rejects_non_2x2_tables() {
    let analysis = cmp(&[vec![25, 18, 12], vec![30, 15, 8], vec![15, 20, 17]]);
    let err = analysis.fisher_exact(Alternative::TwoSided).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::UnsupportedTableShape {
            method: Method::FisherExact,
            n_rows: 3,
            n_cols: 3,
        }
    );
    assert_eq!(err.kind(), "unsupported table shape");
}

#[test]
fn malformed_tables_fail_validation() {
    let jagged = ProportionComparison::from_rows(&[vec![1, 2], vec![3]]);
    assert!(matches!(
        jagged,
        Err(AnalysisError::Validation(ValidationError::RaggedRow { .. }))
    ));

    let negative = ProportionComparison::from_rows(&[[1, -2], [3, 4]]);
    assert!(matches!(
        negative,
        Err(AnalysisError::Validation(ValidationError::NegativeCount { .. }))
    ));
}

#[test]
fn agresti_coull_group_out_of_range() {
    let analysis = cmp(&[vec![3, 12], vec![11, 4]]);
    assert_eq!(
        analysis.agresti_coull(2, 0),
        Err(AnalysisError::InvalidIndex {
            axis: Axis::Row,
            index: 2,
            len: 2
        })
    );
}

#[test]
fn all_zero_row_is_degenerate_for_chi_square() {
    let analysis = cmp(&[vec![0, 0], vec![6, 14]]);
    assert_eq!(
        analysis.chi_square(),
        Err(AnalysisError::DegenerateTable {
            axis: Axis::Row,
            index: 0
        })
    );
    // Fisher's test still runs: only one table shares these margins
    let fisher = analysis.fisher_exact(Alternative::TwoSided).unwrap();
    assert_eq!(fisher.p_value(), 1.0);
}

#[test]
fn interval_bounds_are_ordered() {
    let analysis = cmp(&[vec![0, 10], vec![10, 0]]);
    for group in 0..2 {
        let ci = analysis.agresti_coull(group, 0).unwrap();
        let interval = ci.interval();
        assert!(0.0 <= interval.lower());
        assert!(interval.lower() <= ci.p_tilde());
        assert!(ci.p_tilde() <= interval.upper());
        assert!(interval.upper() <= 1.0);
    }

    let diff = analysis.agresti_caffo(None, 0).unwrap();
    assert!(-1.0 <= diff.interval().lower());
    assert!(diff.interval().lower() <= diff.interval().upper());
    assert!(diff.interval().upper() <= 1.0);
}

#[test]
fn yates_correction_is_smaller_than_pearson() {
    let table = ContingencyTable::new(&[[9, 1], [2, 5]]).unwrap();
    let pearson = chi_square_independence(&table, &AnalysisConfig::default())
        .unwrap();
    let yates = chi_square_independence(
        &table,
        &AnalysisConfig::default().with_yates_correction(true),
    )
    .unwrap();
    assert::close(pearson.statistic(), 6.803_679_653_679_654, P_TOL);
    assert::close(yates.statistic(), 4.379_707_792_207_792, P_TOL);
    assert::close(yates.p_value(), 0.036_369_231_889_084_49, P_TOL);
    assert!(yates.p_value() > pearson.p_value());
}

#[test]
fn seed_germination_one_sided() {
    let table = ContingencyTable::new(&[[6, 9], [12, 8]])
        .unwrap()
        .with_group_labels(["Treatment A", "Treatment B"])
        .unwrap()
        .with_category_labels(["Germinated", "Did not germinate"])
        .unwrap();
    let config = AnalysisConfig::default().with_alternative(Alternative::Less);
    let analysis = ProportionComparison::with_config(table, config);

    let report = analysis.full_analysis();
    let fisher = report.fisher().unwrap().as_ref().unwrap();
    assert_eq!(fisher.alternative(), Alternative::Less);
    assert::close(fisher.p_value(), 0.203_580_467_830_600_83, 1E-10);
    assert_eq!(fisher.decision(), Decision::FailToReject);

    let diff = report.agresti_caffo().unwrap().as_ref().unwrap();
    assert!(diff.includes_zero());
    assert_eq!(
        diff.group_labels(),
        &["Treatment A".to_string(), "Treatment B".to_string()]
    );
}

#[test]
fn shift_preference_by_age() {
    let analysis = cmp(&[
        vec![32, 18, 10],
        vec![45, 25, 15],
        vec![38, 30, 12],
        vec![22, 15, 8],
    ]);
    let chi2 = analysis.chi_square().unwrap();
    assert_eq!(chi2.dof(), 6);
    assert::close(chi2.p_value(), 0.955_509_187_637_995_3, P_TOL);
    assert!(chi2.assumptions_met());
    assert!(chi2.warnings().is_empty());

    let report = analysis.full_analysis();
    assert_eq!(report.agresti_coull().len(), 4);
    assert!(report.agresti_caffo().is_none());
}

#[test]
fn full_report_renders_every_section() {
    let table = ContingencyTable::new(&[[3, 12], [11, 4]])
        .unwrap()
        .with_group_labels(["Control", "Vaccinated"])
        .unwrap()
        .with_category_labels(["Stayed healthy", "Got sick"])
        .unwrap();
    let text = ProportionComparison::new(table).full_analysis().to_string();

    assert!(text.contains("Fisher's exact test (two-sided)"));
    assert!(text.contains("Agresti-Coull interval for P(Stayed healthy | Control)"));
    assert!(text.contains("Agresti-Coull interval for P(Stayed healthy | Vaccinated)"));
    assert!(text.contains(
        "Agresti-Caffo interval for P(Stayed healthy | Control) - P(Stayed healthy | Vaccinated)"
    ));
    assert!(text.contains("Chi-square test of independence"));
    assert!(text.contains("Recommended test: Fisher's exact test"));
}
