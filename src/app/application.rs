//! Application - wiring for one settings session
//!
//! Starts the main-process side (file store behind the IPC server), opens a
//! settings view over the IPC client, applies the requested edits and shuts
//! the view down, which flushes anything still queued.

use crate::app::config::SyncConfig;
use crate::domain::SettingKey;
use crate::error::{Error, Result};
use crate::services::{
    FileConfigStore, LogHost, SettingsCommand, SettingsSession, ipc_channel, serve_ipc,
};
use crate::states::{SettingsEvent, SettingsPage};
use serde_json::Value;
use tracing::info;

/// Parse a `key=value` argument
///
/// The value is read as JSON; anything that is not valid JSON is taken as a
/// plain string, so `trayIconTheme=dark` works without quotes.
pub fn parse_edit(arg: &str) -> Result<(SettingKey, Value)> {
    let Some((key, raw)) = arg.split_once('=') else {
        return Err(Error::Invalid {
            message: format!("expected key=value, got {arg:?}"),
        });
    };

    let key: SettingKey =
        serde_json::from_value(Value::String(key.trim().to_string())).map_err(|_| {
            Error::Invalid {
                message: format!("unknown setting {:?}", key.trim()),
            }
        })?;
    let data = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    Ok((key, data))
}

fn log_event(event: &SettingsEvent) {
    match event {
        SettingsEvent::SavingStateChanged { category, state } => {
            info!(%category, ?state, "Indicator");
        }
        SettingsEvent::SaveFailed {
            categories,
            message,
        } => {
            tracing::warn!(?categories, %message, "Could not save changes");
        }
        other => info!(event = ?other, "Settings event"),
    }
}

/// Run one settings session to completion
pub async fn run(config: SyncConfig, edits: Vec<(SettingKey, Value)>) -> Result<()> {
    let store = match &config.store_path {
        Some(path) => FileConfigStore::new(path),
        None => FileConfigStore::open_default()?,
    };

    let (client, ipc_rx) = ipc_channel();
    let server = tokio::spawn(serve_ipc(ipc_rx, store, LogHost));

    let (event_tx, event_rx) = crossbeam_channel::unbounded::<SettingsEvent>();
    let event_logger = std::thread::Builder::new()
        .name("settings-events".to_string())
        .spawn(move || {
            for event in event_rx {
                log_event(&event);
            }
        })?;

    let page = SettingsPage::new(client.clone(), client, config.page_options(), event_tx);
    let (handle, session) = SettingsSession::spawn(page);

    handle.wait_loaded().await?;

    for (key, data) in edits {
        handle.send(SettingsCommand::SetValue { key, data }).await?;
    }

    let view = handle.view().await?;
    info!(pending = view.pending_edits, "Closing settings view");

    handle.shutdown().await?;
    drop(handle);

    session.await?;
    server.await?;
    let _ = event_logger.join();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_edit_json_and_bare_strings() {
        let (key, data) = parse_edit("autostart=false").expect("bool");
        assert_eq!(key, SettingKey::Autostart);
        assert_eq!(data, json!(false));

        let (key, data) = parse_edit("trayIconTheme=dark").expect("bare string");
        assert_eq!(key, SettingKey::TrayIconTheme);
        assert_eq!(data, json!("dark"));

        let (_, data) = parse_edit(r#"teams=[{"name":"a","url":"https://a.example.com"}]"#)
            .expect("array");
        assert!(data.is_array());
    }

    #[test]
    fn test_parse_edit_errors() {
        assert!(parse_edit("autostart").is_err());
        assert!(parse_edit("colour=blue").is_err());
    }

    #[tokio::test]
    async fn test_run_applies_edits_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store_path = dir.path().join("config.json");
        let config = SyncConfig {
            store_path: Some(store_path.clone()),
            ..SyncConfig::default()
        };

        run(
            config,
            vec![
                (SettingKey::UseSpellChecker, json!(false)),
                (SettingKey::TrayIconTheme, json!("dark")),
            ],
        )
        .await
        .expect("run");

        let snapshot = FileConfigStore::new(store_path).snapshot().expect("snapshot");
        assert!(!snapshot.use_spell_checker);
        assert_eq!(snapshot.tray_icon_theme, crate::domain::TrayIconTheme::Dark);
    }
}
