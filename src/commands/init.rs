//! `chronicle init` command - create a new store
//!
//! Idempotent: an existing config is kept and the database is reopened.

use std::fs;
use std::path::Path;

use crate::cli::Cli;
use crate::commands::print_json;
use crate::output_by_format_result;
use chronicle_core::config::{ChronicleConfig, CONFIG_FILE};
use chronicle_core::error::Result;
use chronicle_core::store::{Database, CURRENT_SCHEMA_VERSION};

/// Execute the init command
pub fn execute(cli: &Cli, store_path: &Path) -> Result<()> {
    fs::create_dir_all(store_path)?;

    let config_path = store_path.join(CONFIG_FILE);
    let created_config = !config_path.exists();
    if created_config {
        ChronicleConfig::default().save(&config_path)?;
    } else {
        // Fail early on a config the other commands would reject
        ChronicleConfig::load(&config_path)?;
    }

    let db = Database::open(store_path)?;
    let schema_version = db.get_schema_version()?;
    tracing::info!(store = %store_path.display(), schema_version, "store ready");

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "status": "ok",
            "store": store_path.display().to_string(),
            "createdConfig": created_config,
            "schemaVersion": schema_version,
        })),
        human => {
            if !cli.quiet {
                println!("Initialized chronicle store at {}", store_path.display());
                if schema_version != i64::from(CURRENT_SCHEMA_VERSION) {
                    println!("warning: unexpected schema version {}", schema_version);
                }
            }
        }
    )
}
