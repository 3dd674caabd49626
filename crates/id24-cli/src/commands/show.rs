use std::path::Path;

use colored::Colorize;
use id24_data::{FeatureTier, LoadConfig, Tables};

pub fn run(path: &Path, table: &str, index: i32, tier: FeatureTier) -> Result<(), String> {
    if !Tables::NAMES.iter().any(|name| *name == table) {
        return Err(format!(
            "unknown table \"{table}\" (expected one of: {})",
            Tables::NAMES.join(", ")
        ));
    }

    // Load everything as authored; gating happens in the view.
    let (tables, _) = super::load(path, LoadConfig::default())?;
    let view = tables
        .view(table, index, tier)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no record {index} in {table}"))?;

    println!("  {} #{} [{}]", table.bold(), index, tier.to_string().dimmed());
    println!();

    let width = view.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for field in &view.fields {
        let value = match &field.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "—".to_string(),
            other => other.to_string(),
        };
        println!("  {:width$}  {value}", field.name);
    }

    if !view.gated.is_empty() {
        println!();
        for (group, introduced) in &view.gated {
            println!(
                "  {} {group} (requires {introduced})",
                "gated:".yellow()
            );
        }
    }

    Ok(())
}
