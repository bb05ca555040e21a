//! Logging - tracing subscriber setup
//!
//! Always logs to stderr; with `log_dir` set, also writes daily-rotated
//! files through a non-blocking appender.

use crate::app::config::SyncConfig;
use crate::constants::LOG_FILE_PREFIX;
use crate::error::{Error, Result};
use crate::helpers::is_development;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(config: &SyncConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let fallback = if is_development() { "debug" } else { "info" };
        let directive = config.log_filter.as_deref().unwrap_or(fallback);
        EnvFilter::new(directive)
    })
}

/// Install the global subscriber
///
/// Keep the returned guard alive for as long as file logging should flush.
pub fn init_tracing(config: &SyncConfig) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Invalid {
            message: format!("tracing already initialized: {e}"),
        })?;

    Ok(guard)
}
