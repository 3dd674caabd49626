use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use id24_data::{CodepointerPolicy, FeatureTier, LoadConfig, TierPolicy};

pub fn run(
    path: &Path,
    tier: FeatureTier,
    policy: TierPolicy,
    allow_unknown_codepointers: bool,
) -> Result<(), String> {
    let codepointers = if allow_unknown_codepointers {
        CodepointerPolicy::Ignore
    } else {
        CodepointerPolicy::Reject
    };
    let config = LoadConfig::default()
        .with_tier(tier)
        .with_policy(policy)
        .with_unknown_codepointers(codepointers);
    let (tables, report) = super::load(path, config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Table", "Records", "Degraded"]);

    for (name, count) in tables.counts() {
        let degraded = report.degraded_in(name);
        let degraded = if degraded.is_empty() {
            "—".to_string()
        } else {
            degraded
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![name.to_string(), count.to_string(), degraded]);
    }

    println!("{table}");
    println!();
    if report.is_clean() {
        println!("  {} at {}", "All records load".green(), tier.to_string().bold());
    } else {
        println!(
            "  {} record(s) degraded to {}",
            report.degraded.len().to_string().yellow(),
            tier.to_string().bold()
        );
    }

    Ok(())
}
