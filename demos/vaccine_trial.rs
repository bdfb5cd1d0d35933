use proportions::prelude::*;

// A clinical trial with 30 participants: did the flu vaccine keep people
// healthy?
fn main() {
    let table = ContingencyTable::new(&[[3, 12], [11, 4]])
        .and_then(|t| t.with_group_labels(["Control", "Vaccinated"]))
        .and_then(|t| t.with_category_labels(["Stayed healthy", "Got sick"]))
        .expect("valid table");

    let cmp = ProportionComparison::new(table);

    println!("{}\n", cmp.display_table());

    let fisher = cmp
        .fisher_exact(Alternative::TwoSided)
        .expect("2×2 table");
    println!("{}\n", fisher);

    match cmp.chi_square() {
        Ok(chi2) => println!("{}\n", chi2),
        Err(err) => println!("Chi-square test unavailable: {}\n", err),
    }

    for group in 0..2 {
        let ci = cmp.agresti_coull(group, 0).expect("group and category exist");
        println!("{}\n", ci);
    }

    let diff = cmp.agresti_caffo(None, 0).expect("two groups");
    println!("{}\n", diff);

    println!("{}", cmp.compare_methods());
}
