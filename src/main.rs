//! settings-sync - Entry Point
//!
//! Opens a settings session against the local configuration file and
//! applies `key=value` edits given on the command line.

use anyhow::Context;
use settings_sync::app::application::{parse_edit, run};
use settings_sync::app::config::SyncConfig;
use settings_sync::app::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let config = SyncConfig::try_load().context("Failed to load settings-sync.toml")?;

    // Initialize tracing for logging
    let _log_guard = init_tracing(&config)?;

    let edits = std::env::args()
        .skip(1)
        .map(|arg| parse_edit(&arg))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(edits = edits.len(), "Starting settings-sync...");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run(config, edits))?;

    Ok(())
}
