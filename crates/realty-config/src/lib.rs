//! Configuration for the realty terminal dashboard.
//!
//! Two layers live here: [`AppConfig`], the TOML + environment application
//! config (figment-merged, flag overrides applied by the binary), and
//! [`prefs::PrefStore`], the per-key appearance preference store that
//! mirrors the product's browser-storage persistence model.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use realty_core::Role;

pub mod prefs;

pub use prefs::{MemoryBackend, PrefBackend, PrefStore, TomlBackend};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize preferences: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Application config ──────────────────────────────────────────────

/// Application configuration, merged from defaults, the TOML config file,
/// and `REALTY_`-prefixed environment variables (in ascending precedence).
/// CLI flags override on top of this in the binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Role the session starts in when `--role` is not given.
    #[serde(default = "default_role")]
    pub default_role: Role,

    /// Log file path; platform data dir when unset.
    pub log_file: Option<PathBuf>,

    /// Tracing env-filter directive.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Simulated backend latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub mock_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            log_file: None,
            log_filter: default_log_filter(),
            mock_latency_ms: default_latency_ms(),
        }
    }
}

fn default_role() -> Role {
    Role::Admin
}
fn default_log_filter() -> String {
    "info".into()
}
fn default_latency_ms() -> u64 {
    450
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config directory via XDG / platform conventions.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "realty", "realty").map_or_else(dirs_fallback, |dirs| {
        dirs.config_dir().to_path_buf()
    })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("realty");
    p
}

/// Application config file inside a config directory.
pub fn config_path_in(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

/// Appearance preference file inside a config directory.
pub fn prefs_path_in(dir: &Path) -> PathBuf {
    dir.join("prefs.toml")
}

/// Default log file location (platform data dir, with a home fallback).
pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("com", "realty", "realty").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".local");
            p.push("share");
            p.push("realty");
            p.push("realty.log");
            p
        },
        |dirs| dirs.data_local_dir().join("realty.log"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load [`AppConfig`] from the given config directory plus environment.
pub fn load_config_from(dir: &Path) -> Result<AppConfig, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(config_path_in(dir)))
        .merge(Env::prefixed("REALTY_"));

    let config: AppConfig = figment.extract()?;
    Ok(config)
}

/// Load [`AppConfig`] from the canonical config directory.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_dir())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_role, Role::Admin);
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(cfg.mock_latency_ms, 450);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(dir.path()).unwrap();
        assert_eq!(cfg.default_role, Role::Admin);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            config_path_in(dir.path()),
            "default_role = \"agent\"\nmock_latency_ms = 0\n",
        )
        .unwrap();

        let cfg = load_config_from(dir.path()).unwrap();
        assert_eq!(cfg.default_role, Role::Agent);
        assert_eq!(cfg.mock_latency_ms, 0);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn partial_config_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path_in(dir.path()), "log_filter = \"debug\"\n").unwrap();

        let cfg = load_config_from(dir.path()).unwrap();
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.mock_latency_ms, 450);
    }
}
