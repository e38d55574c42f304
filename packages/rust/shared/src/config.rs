//! Application configuration for Leadflow.
//!
//! User config lives at `~/.leadflow/leadflow.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LeadflowError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "leadflow.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".leadflow";

// ---------------------------------------------------------------------------
// Config structs (matching leadflow.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pipeline-board gesture settings.
    #[serde(default)]
    pub board: BoardConfig,

    /// Remote status-sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Lead data source settings.
    #[serde(default)]
    pub data: DataConfig,
}

/// `[board]` section — gesture-disambiguation thresholds.
///
/// These feed the drag controller's sensor policies; they are configuration
/// rather than constants so the activation policy can be tuned per input
/// device class (a terminal cell is a much coarser unit than a pixel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Pointer travel (screen units) a press must exceed to count as a drag.
    #[serde(default = "default_pointer_min_distance")]
    pub pointer_min_distance: f32,

    /// Touch hold delay in milliseconds before a press counts as a drag.
    #[serde(default = "default_touch_hold_ms")]
    pub touch_hold_ms: u64,

    /// Touch travel allowed (screen units) during the hold delay before the
    /// press is classified as a scroll.
    #[serde(default = "default_touch_tolerance")]
    pub touch_tolerance: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pointer_min_distance: default_pointer_min_distance(),
            touch_hold_ms: default_touch_hold_ms(),
            touch_tolerance: default_touch_tolerance(),
        }
    }
}

fn default_pointer_min_distance() -> f32 {
    6.0
}
fn default_touch_hold_ms() -> u64 {
    250
}
fn default_touch_tolerance() -> f32 {
    5.0
}

/// `[sync]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the remote lead service (e.g. `https://crm.example.com/api`).
    /// Status sync is disabled entirely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// `[data]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to a JSON lead file maintained by the CRUD side. The built-in
    /// demo dataset is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_file: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.leadflow/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LeadflowError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.leadflow/leadflow.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LeadflowError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        LeadflowError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LeadflowError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LeadflowError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LeadflowError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Parse and validate the configured sync endpoint.
///
/// Returns `Ok(None)` when sync is unconfigured (fully local operation),
/// `Err` when an endpoint is present but not a valid http(s) URL.
pub fn sync_endpoint(config: &AppConfig) -> Result<Option<Url>> {
    let Some(raw) = config.sync.endpoint.as_deref() else {
        return Ok(None);
    };

    let url = Url::parse(raw)
        .map_err(|e| LeadflowError::config(format!("invalid sync endpoint '{raw}': {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(LeadflowError::config(format!(
            "sync endpoint '{raw}' must use http or https"
        )));
    }

    Ok(Some(url))
}
