use comfy_table::{ContentArrangement, Table};
use id24_data::FeatureTier;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Ordinal", "Tier"]);

    for tier in FeatureTier::ALL {
        table.add_row(vec![tier.ordinal().to_string(), tier.to_string()]);
    }

    println!("{table}");
    Ok(())
}
