use proportions::prelude::*;

// Does treatment A germinate fewer seeds than treatment B?
fn main() {
    let table = ContingencyTable::new(&[[6, 9], [12, 8]])
        .and_then(|t| t.with_group_labels(["Treatment A", "Treatment B"]))
        .and_then(|t| t.with_category_labels(["Germinated", "Did not germinate"]))
        .expect("valid table");

    let config = AnalysisConfig::default()
        .with_alternative(Alternative::Less)
        .with_yates_correction(true);
    let cmp = ProportionComparison::with_config(table, config);

    println!("{}", cmp.full_analysis());
}
