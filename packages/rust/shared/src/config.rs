//! Application configuration for the job normalizer.
//!
//! User config lives at `~/.jobnorm/jobnorm.toml`.
//! CLI flags override config file values, which override defaults.
//! API keys are referenced by env-var name — never stored in the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JobNormError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "jobnorm.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".jobnorm";

// ---------------------------------------------------------------------------
// Config structs (matching jobnorm.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generative extraction service settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Company-directory lookup settings.
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[extraction]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_extraction_api_key_env")]
    pub api_key_env: String,

    /// Chat-completions base URL.
    #[serde(default = "default_extraction_base_url")]
    pub base_url: String,

    /// Model used for the primary extraction call.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model used for the fallback extraction call.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_extraction_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum attempts for the extract-stage retry wrapper.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_extraction_api_key_env(),
            base_url: default_extraction_base_url(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_secs: default_extraction_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_extraction_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_extraction_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_primary_model() -> String {
    "gpt-4o".into()
}
fn default_fallback_model() -> String {
    "gpt-4o-mini".into()
}
fn default_extraction_timeout_secs() -> u64 {
    30
}
fn default_max_attempts() -> u32 {
    3
}

/// `[directory]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Name of the env var holding the service key.
    #[serde(default = "default_directory_api_key_env")]
    pub api_key_env: String,

    /// Directory service base URL (PostgREST-style REST endpoint).
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_directory_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_directory_api_key_env(),
            base_url: String::new(),
            timeout_secs: default_directory_timeout_secs(),
        }
    }
}

fn default_directory_api_key_env() -> String {
    "DIRECTORY_API_KEY".into()
}
fn default_directory_timeout_secs() -> u64 {
    10
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.jobnorm/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| JobNormError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.jobnorm/jobnorm.toml`).
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
    let content = std::fs::read_to_string(path)
        .map_err(|e| JobNormError::config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content).map_err(|e| {
        JobNormError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| JobNormError::config(format!("failed to create {}: {e}", dir.display())))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JobNormError::config(e.to_string()))?;

    std::fs::write(&path, content)
        .map_err(|e| JobNormError::config(format!("failed to write {}: {e}", path.display())))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the extraction API key env var is set and non-empty.
pub fn validate_api_keys(config: &AppConfig) -> Result<()> {
    let var_name = &config.extraction.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(()),
        _ => Err(JobNormError::config(format!(
            "extraction API key not found. Set the {var_name} environment variable."
        ))),
    }
}
