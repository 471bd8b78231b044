//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`LEASEDOC_*`)
//! 3. Config file (`--config` path or the default location)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values applied when flags are omitted.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template store settings.
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Lease used when `--lease` is not given.
    pub lease: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON template store.
    pub path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config` (or `None`
    /// to use the default location). A missing file is fine — defaults plus
    /// environment apply; a present but unparsable file is an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);

        let cfg = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("LEASEDOC").separator("__"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.leasedoc.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "leasedoc", "leasedoc")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".leasedoc.toml"))
    }

    /// Path of the template store, before the `--store` flag is considered.
    ///
    /// Config value first, then the platform data directory.
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = &self.store.path {
            return path.clone();
        }
        directories::ProjectDirs::from("com", "leasedoc", "leasedoc")
            .map(|d| d.data_dir().join("templates.json"))
            .unwrap_or_else(|| PathBuf::from("templates.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_lease() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.lease.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn load_without_file_returns_defaults() {
        // Point at a path that certainly does not exist so the file source
        // is skipped.
        let missing = PathBuf::from("/nonexistent/leasedoc-test/config.toml");
        let cfg = AppConfig::load(Some(&missing)).unwrap();
        assert_eq!(cfg.output.format, "human");
    }

    #[test]
    fn config_path_is_non_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }

    #[test]
    fn store_path_prefers_configured_value() {
        let mut cfg = AppConfig::default();
        cfg.store.path = Some(PathBuf::from("/tmp/custom.json"));
        assert_eq!(cfg.store_path(), PathBuf::from("/tmp/custom.json"));
    }
}
