//! JSON-file-backed settings persistence.
//!
//! The store keeps one namespaced record inside a small JSON key-value file,
//! the durable analogue of the original page-local storage. Loading is
//! tolerant field by field: a missing or malformed field is skipped with a
//! warning and the caller falls back to its default, so a corrupted file can
//! never prevent startup.

use serde_json::{json, Map, Value};
use skittish_core::{Settings, SettingsPatch, SettingsRepository, Thresholds};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed namespace key under which the settings record is stored.
pub const NAMESPACE: &str = "skittish.settings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode settings record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// `SettingsRepository` backed by a JSON file on disk.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the top-level key-value map, or an empty one if the file is
    /// missing or unparseable.
    fn read_record(&self) -> Map<String, Value> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "settings file unreadable");
                return Map::new();
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "settings file is not a JSON object, ignoring");
                Map::new()
            }
        }
    }
}

/// Extract a finite number field, warning on anything malformed.
fn field_f32(record: &Map<String, Value>, key: &str) -> Option<f32> {
    let value = record.get(key)?;
    match value.as_f64() {
        Some(n) if (n as f32).is_finite() => Some(n as f32),
        _ => {
            tracing::warn!(key, %value, "malformed settings field, using default");
            None
        }
    }
}

/// Extract the thresholds sub-record; each boundary falls back to its
/// default individually.
fn field_thresholds(record: &Map<String, Value>) -> Option<Thresholds> {
    let value = record.get("thresholds")?;
    let Value::Object(sub) = value else {
        tracing::warn!(%value, "malformed thresholds record, using defaults");
        return None;
    };
    let d = Thresholds::default();
    Some(Thresholds {
        calm: field_f32(sub, "calm").unwrap_or(d.calm),
        anxious: field_f32(sub, "anxious").unwrap_or(d.anxious),
        irritated: field_f32(sub, "irritated").unwrap_or(d.irritated),
        panicked: field_f32(sub, "panicked").unwrap_or(d.panicked),
    })
}

impl SettingsRepository for JsonSettingsStore {
    fn load(&self) -> Option<SettingsPatch> {
        let record = self.read_record();
        let Some(Value::Object(entry)) = record.get(NAMESPACE) else {
            return None;
        };

        let patch = SettingsPatch {
            sensitivity: field_f32(entry, "sensitivity"),
            transition_secs: field_f32(entry, "transition_secs"),
            volume_floor: field_f32(entry, "volume_floor"),
            thresholds: field_thresholds(entry),
        };
        tracing::debug!(path = %self.path.display(), ?patch, "settings loaded");
        Some(patch)
    }

    fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        // Preserve any other records in the file.
        let mut record = self.read_record();
        let mut entry = serde_json::to_value(settings).map_err(StoreError::Encode)?;
        if let Value::Object(map) = &mut entry {
            map.insert("saved_at".to_string(), json!(chrono::Utc::now()));
        }
        record.insert(NAMESPACE.to_string(), entry);

        let body = serde_json::to_string_pretty(&Value::Object(record)).map_err(StoreError::Encode)?;
        std::fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
