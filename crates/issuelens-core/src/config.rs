// SPDX-License-Identifier: Apache-2.0

//! Configuration management for issuelens.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `ISSUELENS_`)
//! 2. `OLLAMA_BASE_URL` / `OLLAMA_MODEL` (short aliases)
//! 3. Config file: `~/.config/issuelens/config.toml`
//! 4. Built-in defaults
//!
//! The configuration is read once at process start and handed to
//! [`crate::facade::IssueAnalyzer::new`]; nothing reads it implicitly afterwards.
//!
//! # Examples
//!
//! ```bash
//! # Override the model via environment variable
//! ISSUELENS_OLLAMA__MODEL=mistral cargo run -p issuelens-cli -- analyze ...
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::IssueLensError;

/// Alias for `ollama.base_url`.
pub const OLLAMA_BASE_URL_ENV: &str = "OLLAMA_BASE_URL";

/// Alias for `ollama.model`.
pub const OLLAMA_MODEL_ENV: &str = "OLLAMA_MODEL";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local inference backend settings.
    pub ollama: OllamaConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// Local inference backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Model identifier; must be pulled locally.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "llama3".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            api_timeout_seconds: 15,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Returns the issuelens configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to the platform config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("issuelens");
    }
    dirs::home_dir()
        .map_or_else(|| PathBuf::from("."), |home| home.join(".config"))
        .join("issuelens")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default file location and environment.
///
/// # Errors
///
/// Returns `IssueLensError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, IssueLensError> {
    load_config_from(&config_file_path())
}

/// Load application configuration using an explicit config file path.
///
/// The file is optional. Environment variables use the prefix `ISSUELENS_` and
/// double underscore for nested keys (e.g., `ISSUELENS_OLLAMA__MODEL`).
///
/// # Errors
///
/// Returns `IssueLensError::Config` if the config file exists but is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, IssueLensError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("ISSUELENS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option(
            "ollama.base_url",
            legacy_alias(OLLAMA_BASE_URL_ENV, "ISSUELENS_OLLAMA__BASE_URL"),
        )?
        .set_override_option("ollama.model", legacy_alias(OLLAMA_MODEL_ENV, "ISSUELENS_OLLAMA__MODEL"))?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

/// Reads a short alias variable unless the prefixed variable is set.
fn legacy_alias(alias: &str, prefixed: &str) -> Option<String> {
    if std::env::var_os(prefixed).is_some() {
        return None;
    }
    std::env::var(alias).ok()
}
