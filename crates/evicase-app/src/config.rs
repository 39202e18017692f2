//! Settings parser for .evicase/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use evicase_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const EVICASE_DIR: &str = ".evicase";

/// Environment override for the service URL, taking precedence over the
/// configured value.
pub const SERVER_ENV_VAR: &str = "EVICASE_SERVER";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8001";

/// Application settings (.evicase/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

/// Extraction service connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the extraction service
    #[serde(default = "default_server_url")]
    pub url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Export artifact persistence settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Directory export artifacts are written to. Defaults to the platform
    /// download directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Effective service URL: environment override, then configuration.
    pub fn server_url(&self) -> String {
        match std::env::var(SERVER_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.server.url.clone(),
        }
    }

    /// Effective export directory: configuration, then the platform
    /// download directory, then the working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Load settings from `<base>/.evicase/config.toml`.
///
/// A missing file yields defaults; a malformed file logs a warning and
/// yields defaults rather than blocking the session.
pub fn load_settings(base_dir: &Path) -> Settings {
    let path = base_dir.join(EVICASE_DIR).join(CONFIG_FILENAME);
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("invalid config at {}: {e}; using defaults", path.display());
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}
