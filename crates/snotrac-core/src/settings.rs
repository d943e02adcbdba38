use crate::analysis::DEFAULT_ENDPOINT;
use crate::fixture::DEFAULT_FIXTURE_PATH;
use crate::SnotracError;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

/// Runtime configuration. The API key is only ever read from the settings
/// file, the environment, or the command line.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_fixture")]
    pub fixture: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_fixture() -> String {
    DEFAULT_FIXTURE_PATH.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            fixture: default_fixture(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("fixture", &self.fixture)
            .finish()
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join(SETTINGS_FILE)
    }

    /// Reads `path`, returning defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, SnotracError> {
        if !path.exists() {
            debug!("No settings file; using defaults — path={}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| SnotracError::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn load() -> Result<Self, SnotracError> {
        Self::load_from(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create settings directory")?;
            }
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content).context("Failed to write settings.json")
    }

    /// Applies non-empty overrides (environment or command line) on top.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        api_key: Option<String>,
        fixture: Option<String>,
    ) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        if let Some(endpoint) = non_empty(endpoint) {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = non_empty(api_key) {
            self.api_key = Some(api_key);
        }
        if let Some(fixture) = non_empty(fixture) {
            self.fixture = fixture;
        }
        self
    }

    /// A blank key counts as missing.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}
