use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application state: which profile currently owns the live
/// client files, and where the client is installed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub last_active_profile: Option<String>,
    pub client_install_path: Option<PathBuf>,
}

impl AppConfig {
    /// A corrupt or unreadable file yields the default configuration;
    /// startup never fails on it.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "failed to read {}: {err}; starting with defaults",
                    path.display()
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "invalid JSON in {}: {err}; starting with defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Whole-struct overwrite. Persistence is best-effort: failures are
    /// logged and swallowed.
    pub fn save(&self, path: &Path) {
        let raw = match serde_json::to_string_pretty(self) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to encode configuration: {err}");
                return;
            }
        };

        if let Some(parent) = path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            warn!("failed to create {}: {err}", parent.display());
            return;
        }

        if let Err(err) = fs::write(path, raw) {
            warn!("failed to write {}: {err}", path.display());
        }
    }
}
