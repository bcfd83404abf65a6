//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `WARDWATCH_*` environment variables. Command-line flags are applied on top
//! by the binary. Poll intervals are fixed and deliberately not settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "wardwatch.toml";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Backend base URL.
    pub base_url: String,
    /// File that receives log output (the TUI owns the terminal).
    pub log_file: PathBuf,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Optional per-request timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_file: PathBuf::from("wardwatch.log"),
            log_level: "info".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (required to exist) or from
    /// `wardwatch.toml` in the working directory if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], reading the `WARDWATCH_*` layer from `env`
    /// instead of the process environment when given.
    fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("log_file", defaults.log_file.display().to_string())?
            .set_default("log_level", defaults.log_level)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config = builder
            .add_source(Environment::with_prefix("WARDWATCH").source(env))
            .build()
            .context("Failed to read settings")?;

        config.try_deserialize().context("Invalid settings")
    }

    /// Per-request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://127.0.0.1:5000");
        assert_eq!(settings.log_level, "info");
        assert!(settings.request_timeout().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
base_url = "http://ward-7.local:5000"
log_level = "debug"
request_timeout_ms = 1500
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "http://ward-7.local:5000");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_file, PathBuf::from("wardwatch.log"));
        assert_eq!(settings.request_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
base_url = "http://ward-7.local:5000"
log_level = "debug"
"#
        )
        .unwrap();

        let mut env = Map::new();
        env.insert("WARDWATCH_BASE_URL".to_string(), "http://ward-9.local:5000".to_string());
        env.insert("UNRELATED_BASE_URL".to_string(), "http://ignored".to_string());

        let settings = Settings::load_with_env(Some(file.path()), Some(env)).unwrap();
        assert_eq!(settings.base_url, "http://ward-9.local:5000");
        // keys absent from the environment keep the file value
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let mut env = Map::new();
        env.insert("WARDWATCH_LOG_FILE".to_string(), "/tmp/ward.log".to_string());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let settings = Settings::load_with_env(Some(&path), Some(env)).unwrap();
        assert_eq!(settings.log_file, PathBuf::from("/tmp/ward.log"));
        assert_eq!(settings.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/wardwatch.toml"))).is_err());
    }
}
