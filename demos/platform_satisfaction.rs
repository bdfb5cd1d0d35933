use proportions::prelude::*;

// Does customer satisfaction depend on the platform used?
fn main() {
    let table = ContingencyTable::new(&[[25, 18, 12], [30, 15, 8], [15, 20, 17]])
        .and_then(|t| t.with_group_labels(["Web", "Mobile", "Tablet"]))
        .and_then(|t| {
            t.with_category_labels(["Satisfied", "Neutral", "Dissatisfied"])
        })
        .expect("valid table");

    let cmp = ProportionComparison::new(table);
    println!("{}\n", cmp.display_table());

    // Fisher's exact test only handles 2×2 tables
    if let Err(err) = cmp.fisher_exact(Alternative::TwoSided) {
        println!("{}\n", err);
    }

    let chi2 = cmp.chi_square().expect("no empty margins");
    println!("{}\n", chi2);

    println!("Share of satisfied customers per platform");
    for group in 0..cmp.table().n_rows() {
        let ci = cmp.agresti_coull(group, 0).expect("group exists");
        println!("{}\n", ci);
    }

    // Web vs tablet
    let diff = cmp.agresti_caffo(Some((0, 2)), 0).expect("distinct groups");
    println!("{}", diff);
}
