use proportions::prelude::*;

// Is the preferred work shift related to age?
fn main() {
    let rows = [[32, 18, 10], [45, 25, 15], [38, 30, 12], [22, 15, 8]];
    let table = ContingencyTable::new(&rows)
        .and_then(|t| t.with_group_labels(["18-30", "31-45", "46-60", "60+"]))
        .and_then(|t| t.with_category_labels(["Morning", "Afternoon", "Night"]))
        .expect("valid table");

    let cmp = ProportionComparison::new(table);
    println!("{}\n", cmp.display_table());

    let chi2 = cmp.chi_square().expect("no empty margins");
    println!("{}\n", chi2);
    println!(
        "Cochran's rule {}",
        if chi2.assumptions_met() {
            "holds"
        } else {
            "is violated"
        }
    );
}
