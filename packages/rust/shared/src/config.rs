//! Application configuration for JuiceScout.
//!
//! User config lives at `~/.juicescout/juicescout.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MigrationError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "juicescout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".juicescout";

// ---------------------------------------------------------------------------
// Config structs (matching juicescout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Destination API settings.
    #[serde(default)]
    pub destination: DestinationSection,

    /// Source export settings.
    #[serde(default)]
    pub source: SourceSection,
}

/// `[destination]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationSection {
    /// Base URL of the destination Docs API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Basic-auth password. The API ignores it but requires one.
    #[serde(default = "default_password")]
    pub password: String,

    /// Per-request timeout in seconds. Unset leaves the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Collection to migrate into. The first listed collection when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
}

impl Default for DestinationSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            password: default_password(),
            timeout_secs: None,
            collection_id: None,
        }
    }
}

fn default_base_url() -> String {
    "https://docsapi.helpscout.net".into()
}
fn default_api_key_env() -> String {
    "HELPSCOUT_API".into()
}
fn default_password() -> String {
    "X".into()
}

/// `[source]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    /// Label of the source help desk, used in logs and the run summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Destination config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime destination configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    /// API root. Always ends with `/` so endpoint paths can be joined onto it.
    pub base_url: Url,
    /// API key, sent as the basic-auth username.
    pub api_key: String,
    /// Basic-auth password placeholder.
    pub password: String,
    /// Per-request timeout in seconds, if any.
    pub timeout_secs: Option<u64>,
}

impl DestinationConfig {
    /// Build a destination config from the `[destination]` section and a resolved key.
    pub fn new(section: &DestinationSection, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MigrationError::config("destination API key is empty"));
        }

        Ok(Self {
            base_url: parse_base_url(&section.base_url)?,
            api_key,
            password: section.password.clone(),
            timeout_secs: section.timeout_secs,
        })
    }
}

/// Parse a base URL and make sure its path ends with `/`.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| MigrationError::config(format!("invalid base URL '{raw}': {e}")))?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.juicescout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MigrationError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.juicescout/juicescout.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| MigrationError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MigrationError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MigrationError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MigrationError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MigrationError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve the API key: an explicit value wins, then the configured env var.
pub fn resolve_api_key(config: &AppConfig, explicit: Option<&str>) -> Result<String> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    let var_name = &config.destination.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(MigrationError::config(format!(
            "destination API key not found. Pass --api-key or set the {var_name} environment variable."
        ))),
    }
}
