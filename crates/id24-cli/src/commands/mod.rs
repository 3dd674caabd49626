pub mod check;
pub mod show;
pub mod tiers;

use std::path::Path;

use id24_data::{LoadConfig, LoadReport, TableLoader, Tables};

/// Load a table file with `config`, turning load errors into messages.
fn load(path: &Path, config: LoadConfig) -> Result<(Tables, LoadReport), String> {
    TableLoader::new(config)
        .load_path(path)
        .map_err(|e| e.to_string())
}
