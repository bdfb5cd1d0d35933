use proportions::htest::{chi_square_independence, fisher_exact};
use proportions::interval::{AgrestiCaffo, AgrestiCoull};
use proportions::{Alternative, AnalysisConfig, ContingencyTable};
use proptest::prelude::*;

const TOL: f64 = 1E-9;

fn counts_and_trials() -> impl Strategy<Value = (u64, u64)> {
    (0_u64..200).prop_flat_map(|n| (0..=n, Just(n)))
}

/// Significance levels from the usual range down to the smallest normal f64
fn alphas() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.001_f64..0.999,
        (-307.0_f64..-3.0).prop_map(|e| 10_f64.powf(e)),
        Just(f64::MIN_POSITIVE),
    ]
}

fn table_rows() -> impl Strategy<Value = Vec<Vec<u64>>> {
    (2_usize..6, 2_usize..6).prop_flat_map(|(r, c)| {
        prop::collection::vec(prop::collection::vec(0_u64..40, c), r)
    })
}

proptest! {
    #[test]
    fn agresti_coull_bounds_are_ordered(
        (x, n) in counts_and_trials(),
        alpha in alphas(),
    ) {
        let ci = AgrestiCoull::from_counts(x, n, alpha).unwrap();
        let interval = ci.interval();
        prop_assert!(0.0 <= interval.lower());
        prop_assert!(interval.lower() <= ci.p_tilde());
        prop_assert!(ci.p_tilde() <= interval.upper());
        prop_assert!(interval.upper() <= 1.0);
    }
}

proptest! {
    #[test]
    fn agresti_caffo_bounds_are_ordered(
        (x1, n1) in counts_and_trials(),
        (x2, n2) in counts_and_trials(),
        alpha in alphas(),
    ) {
        let ci = AgrestiCaffo::from_counts(x1, n1, x2, n2, alpha).unwrap();
        let interval = ci.interval();
        prop_assert!(-1.0 <= interval.lower());
        prop_assert!(interval.lower() <= ci.difference());
        prop_assert!(ci.difference() <= interval.upper());
        prop_assert!(interval.upper() <= 1.0);
    }
}

proptest! {
    #[test]
    fn fisher_p_values_are_probabilities(
        a in 0_u64..30,
        b in 0_u64..30,
        c in 0_u64..30,
        d in 0_u64..30,
    ) {
        let table = ContingencyTable::new(&[[a, b], [c, d]]).unwrap();
        let p = |alt| fisher_exact(&table, alt, 0.05).unwrap().p_value();
        let two_sided = p(Alternative::TwoSided);
        let less = p(Alternative::Less);
        let greater = p(Alternative::Greater);

        for p in [two_sided, less, greater] {
            prop_assert!((0.0..=1.0).contains(&p));
        }
        // Both one-sided tails contain the observed table
        prop_assert!(less + greater >= 1.0 - TOL);
        prop_assert!(two_sided >= less.min(greater) - TOL);
    }
}

proptest! {
    #[test]
    fn chi_square_is_well_formed(rows in table_rows()) {
        let table = ContingencyTable::new(&rows).unwrap();
        let res = chi_square_independence(&table, &AnalysisConfig::default());
        match table.zero_margin() {
            Some(_) => prop_assert!(res.is_err()),
            None => {
                let x2 = res.unwrap();
                prop_assert_eq!(x2.dof(), (rows.len() - 1) * (rows[0].len() - 1));
                prop_assert!(x2.statistic() >= 0.0);
                prop_assert!((-TOL..=1.0 + TOL).contains(&x2.p_value()));
                let total: f64 = x2.expected().iter().flatten().sum();
                prop_assert!((total - table.total() as f64).abs() < 1E-6);
            }
        }
    }
}

proptest! {
    #[test]
    fn table_display_has_a_line_per_row_plus_header_and_totals(
        rows in table_rows()
    ) {
        let table = ContingencyTable::new(&rows).unwrap();
        prop_assert_eq!(table.to_string().lines().count(), rows.len() + 2);
    }
}
