//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Command-line and environment values arrive together as [`Overrides`]
//! (clap reads both). The config file location itself follows the same
//! order through [`resolve_config_path`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TSA_CONFIG";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_MODEL_NAME: &str = "bert-base-turkish-sentiment-cased";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; absent values fall through to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Bind address for the HTTP server
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Replacement lexicon file (TOML)
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,

    /// Classifier endpoint settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[classifier]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierConfig {
    /// Inference endpoint URL; no endpoint means no classifier
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token sent to the endpoint
    #[serde(default)]
    pub api_token: Option<String>,

    /// Model name reported in responses
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Where the config file should come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line or in `TSA_CONFIG`; must exist
    Explicit(PathBuf),
    /// Platform default location; may be absent
    Default(PathBuf),
    /// No candidate location on this platform
    None,
}

/// Resolve the config file location
///
/// Priority: command-line path → `TSA_CONFIG` → user config dir
/// (`~/.config/tsa/config.toml`) → `/etc/tsa/config.toml` on Linux.
pub fn resolve_config_path(cli_path: Option<&Path>) -> ConfigSource {
    if let Some(path) = cli_path {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return ConfigSource::Explicit(PathBuf::from(path));
        }
    }

    let user_config = dirs::config_dir().map(|d| d.join("tsa").join("config.toml"));
    if let Some(path) = &user_config {
        if path.exists() {
            return ConfigSource::Default(path.clone());
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/tsa/config.toml");
        if system_config.exists() {
            return ConfigSource::Default(system_config);
        }
    }

    match user_config {
        Some(path) => ConfigSource::Default(path),
        None => ConfigSource::None,
    }
}

/// Load the TOML config named by `source`
///
/// A missing default file is not an error: defaults are used. A missing
/// explicit file, or any malformed file, is a [`Error::Config`].
pub fn load_toml_config(source: &ConfigSource) -> Result<TomlConfig> {
    match source {
        ConfigSource::Explicit(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            TomlConfig::load(path)
        }
        ConfigSource::Default(path) if path.exists() => TomlConfig::load(path),
        ConfigSource::Default(_) | ConfigSource::None => Ok(TomlConfig::default()),
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub classifier_url: Option<String>,
    pub classifier_token: Option<String>,
    pub model_name: Option<String>,
    pub lexicon_path: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub classifier_endpoint: Option<String>,
    pub classifier_token: Option<String>,
    pub model_name: String,
    pub classifier_timeout: Duration,
    pub lexicon_path: Option<PathBuf>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: Overrides, toml: TomlConfig) -> Result<Self> {
        let classifier = toml.classifier;

        let classifier_endpoint = non_blank(overrides.classifier_url).or(non_blank(classifier.endpoint));
        if let Some(endpoint) = &classifier_endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "Classifier endpoint must be an http(s) URL: {}",
                    endpoint
                )));
            }
        }

        let timeout_secs = classifier.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("classifier.timeout_secs must be positive".to_string()));
        }

        Ok(Self {
            host: non_blank(overrides.host)
                .or(non_blank(toml.host))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            classifier_endpoint,
            classifier_token: non_blank(overrides.classifier_token).or(non_blank(classifier.api_token)),
            model_name: non_blank(overrides.model_name)
                .or(non_blank(classifier.model))
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            classifier_timeout: Duration::from_secs(timeout_secs),
            lexicon_path: overrides.lexicon_path.or(toml.lexicon_path),
            log_level: toml.logging.level,
        })
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
