//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests cover:
//! - Missing default config file falls back to defaults
//! - Missing explicit config file is an error
//! - Priority order: CLI/ENV overrides → TOML → compiled defaults
//! - Config file location: CLI path → TSA_CONFIG → platform default
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate TSA_CONFIG are marked with #[serial].

use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tsa_common::config::{
    load_toml_config, resolve_config_path, ConfigSource, Overrides, ServiceConfig, TomlConfig,
    CONFIG_ENV_VAR, DEFAULT_HOST, DEFAULT_MODEL_NAME, DEFAULT_PORT,
};
use tsa_common::Error;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_defaults_when_nothing_configured() {
    let config = ServiceConfig::resolve(Overrides::default(), TomlConfig::default()).unwrap();

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
    assert_eq!(config.classifier_timeout, Duration::from_secs(30));
    assert!(config.classifier_endpoint.is_none());
    assert!(config.classifier_token.is_none());
    assert!(config.lexicon_path.is_none());
    assert_eq!(config.log_level, "info");
    assert_eq!(config.bind_addr(), "0.0.0.0:7860");
}

#[test]
fn test_toml_values_used_when_no_overrides() {
    let toml = TomlConfig::from_toml_str(
        r#"
        host = "127.0.0.1"
        port = 9000
        lexicon_path = "/srv/tsa/lexicon.toml"

        [classifier]
        endpoint = "http://localhost:8080/predict"
        api_token = "hf_secret"
        model = "custom-model"
        timeout_secs = 5

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let config = ServiceConfig::resolve(Overrides::default(), toml).unwrap();

    assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    assert_eq!(
        config.classifier_endpoint.as_deref(),
        Some("http://localhost:8080/predict")
    );
    assert_eq!(config.classifier_token.as_deref(), Some("hf_secret"));
    assert_eq!(config.model_name, "custom-model");
    assert_eq!(config.classifier_timeout, Duration::from_secs(5));
    assert_eq!(config.lexicon_path, Some(PathBuf::from("/srv/tsa/lexicon.toml")));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_overrides_take_priority_over_toml() {
    let toml = TomlConfig::from_toml_str(
        r#"
        port = 9000
        [classifier]
        endpoint = "http://from-toml/predict"
        "#,
    )
    .unwrap();

    let overrides = Overrides {
        port: Some(9100),
        classifier_url: Some("https://from-cli/predict".to_string()),
        ..Overrides::default()
    };

    let config = ServiceConfig::resolve(overrides, toml).unwrap();
    assert_eq!(config.port, 9100);
    assert_eq!(
        config.classifier_endpoint.as_deref(),
        Some("https://from-cli/predict")
    );
}

#[test]
fn test_blank_override_falls_through() {
    let toml = TomlConfig::from_toml_str(
        r#"
        [classifier]
        endpoint = "http://from-toml/predict"
        "#,
    )
    .unwrap();

    let overrides = Overrides {
        classifier_url: Some("   ".to_string()),
        ..Overrides::default()
    };

    let config = ServiceConfig::resolve(overrides, toml).unwrap();
    assert_eq!(
        config.classifier_endpoint.as_deref(),
        Some("http://from-toml/predict")
    );
}

#[test]
fn test_non_http_endpoint_rejected() {
    let overrides = Overrides {
        classifier_url: Some("ftp://example.com/model".to_string()),
        ..Overrides::default()
    };

    let result = ServiceConfig::resolve(overrides, TomlConfig::default());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_zero_timeout_rejected() {
    let toml = TomlConfig::from_toml_str("[classifier]\ntimeout_secs = 0\n").unwrap();
    let result = ServiceConfig::resolve(Overrides::default(), toml);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_default_config_file_does_not_error() {
    let source = ConfigSource::Default(PathBuf::from("/nonexistent/tsa/config.toml"));
    let config = load_toml_config(&source).unwrap();
    assert!(config.port.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_explicit_config_file_errors() {
    let source = ConfigSource::Explicit(PathBuf::from("/nonexistent/tsa/config.toml"));
    let result = load_toml_config(&source);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_config_file_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port = \"not a number\"\n");

    let result = load_toml_config(&ConfigSource::Explicit(path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_config_file_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port = 8123\n[logging]\nlevel = \"warn\"\n");

    let config = load_toml_config(&ConfigSource::Explicit(path)).unwrap();
    assert_eq!(config.port, Some(8123));
    assert_eq!(config.logging.level, "warn");
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/tsa-from-env.toml");

    let source = resolve_config_path(Some(Path::new("/tmp/tsa-from-cli.toml")));
    assert_eq!(
        source,
        ConfigSource::Explicit(PathBuf::from("/tmp/tsa-from-cli.toml"))
    );

    // Cleanup
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_path() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/tsa-from-env.toml");

    let source = resolve_config_path(None);
    assert_eq!(
        source,
        ConfigSource::Explicit(PathBuf::from("/tmp/tsa-from-env.toml"))
    );

    // Cleanup
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_no_cli_no_env_uses_default_location() {
    env::remove_var(CONFIG_ENV_VAR);

    let source = resolve_config_path(None);
    match source {
        ConfigSource::Default(path) => assert!(path.ends_with("config.toml")),
        ConfigSource::None => {}
        ConfigSource::Explicit(path) => panic!("unexpected explicit path {:?}", path),
    }
}
