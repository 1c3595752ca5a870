//! Seed the data directory with the default catalog and admin account.

use std::fs;

use arcadia_engine::{Engine, EngineConfig};

/// Record files managed by the engine, relative to the data directory.
const RECORD_FILES: [&str; 4] = ["catalog.json", "cart.json", "users.json", "sales.json"];

/// Initialize the data directory. Opening the engine over an empty
/// directory seeds the default catalog and bootstraps the admin account.
///
/// With `force`, existing records are removed first; without it, an
/// already-seeded directory is left untouched and the command fails.
pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let catalog_file = config.data_dir.join("catalog.json");

    if catalog_file.exists() {
        if !force {
            return Err(format!(
                "data directory {} is already seeded (use --force to re-seed)",
                config.data_dir.display()
            )
            .into());
        }
        for name in RECORD_FILES {
            let path = config.data_dir.join(name);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        tracing::info!(dir = %config.data_dir.display(), "removed existing records");
    }

    let engine = Engine::open(config)?;

    println!(
        "Seeded {} with {} products, admin account '{}'",
        engine.config().data_dir.display(),
        engine.catalog().list().len(),
        engine.config().admin.username
    );
    Ok(())
}
