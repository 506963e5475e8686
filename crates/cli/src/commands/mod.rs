pub mod catalog;
pub mod config;
pub mod match_text;
pub mod quote;
pub mod recommend;

use std::path::Path;

use anyhow::{Context, Result};
use rigquote_core::config::{AppConfig, CatalogSourceKind, LoadOptions};
use rigquote_core::{Catalog, CatalogSnapshot, CatalogSource, EmbeddedCatalog};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Snapshot-file catalog adapter; the embedded adapter lives in the core
/// crate. Catalog storage is a collaborator concern, so the file handling
/// stays on this side of the engine boundary.
pub struct SnapshotFileSource {
    snapshot: CatalogSnapshot,
}

impl SnapshotFileSource {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog snapshot `{}`", path.display()))?;
        let snapshot = toml::from_str(&raw)
            .with_context(|| format!("parsing catalog snapshot `{}`", path.display()))?;
        Ok(Self { snapshot })
    }
}

impl CatalogSource for SnapshotFileSource {
    fn catalog(&self) -> Catalog {
        Catalog::from_snapshot(self.snapshot.clone())
    }
}

/// Loads config and materializes the configured catalog source. Failures map
/// to the shared exit codes: 2 config, 3 catalog I/O.
pub(crate) fn load_effective_catalog(command: &str) -> Result<Catalog, Box<CommandResult>> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        Box::new(CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        ))
    })?;

    match config.catalog.source {
        CatalogSourceKind::Embedded => Ok(EmbeddedCatalog.catalog()),
        CatalogSourceKind::Snapshot => {
            let Some(path) = config.catalog.snapshot_path else {
                return Err(Box::new(CommandResult::failure(
                    command,
                    "config_validation",
                    "catalog.source = snapshot requires catalog.snapshot_path",
                    2,
                )));
            };
            let source = SnapshotFileSource::load(&path).map_err(|error| {
                Box::new(CommandResult::failure(
                    command,
                    "catalog_snapshot",
                    format!("{error:#}"),
                    3,
                ))
            })?;
            Ok(source.catalog())
        }
    }
}
