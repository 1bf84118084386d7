//! Configuration for resolution.
//!
//! Settings come from `~/.versiongate/config.toml` and the environment, with
//! environment variables taking precedence over the file.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.versiongate/config.toml
//!
//! [resolve]
//! # Compare every candidate against this version instead of its probe result
//! override_version = "8.1.0-rc1"
//! ```
//!
//! ## Environment
//!
//! - `VERSIONGATE_OVERRIDE_VERSION`: override version; wins over the file.
//! - `VERSIONGATE_CONFIG`: alternate config file path.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use versiongate_version::VersionToken;

pub const ENV_OVERRIDE_VERSION: &str = "VERSIONGATE_OVERRIDE_VERSION";
pub const ENV_CONFIG_PATH: &str = "VERSIONGATE_CONFIG";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    resolve: ResolveSection,
}

#[derive(Debug, Default, Deserialize)]
struct ResolveSection {
    override_version: Option<VersionToken>,
}

/// Effective resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Replaces probed versions during resolution (simulations and tests).
    pub override_version: Option<VersionToken>,
}

impl ResolveConfig {
    /// Loads the config file, if any, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::from_path(&path)?.unwrap_or_default(),
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Reads a config file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist and `Err` if it exists but
    /// fails to parse.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::debug!(
            target: "versiongate::config",
            path = %path.display(),
            "Loaded configuration file"
        );

        Ok(Some(config))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(Self {
            override_version: file.resolve.override_version,
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        let Ok(raw) = std::env::var(ENV_OVERRIDE_VERSION) else {
            return Ok(());
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }

        let version = VersionToken::parse(raw)
            .with_context(|| format!("Invalid {ENV_OVERRIDE_VERSION} value '{raw}'"))?;
        tracing::trace!(
            target: "versiongate::config",
            %version,
            "Override version taken from environment"
        );
        self.override_version = Some(version);
        Ok(())
    }
}

/// Returns the config file path: `$VERSIONGATE_CONFIG` or
/// `~/.versiongate/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|h| h.join(".versiongate").join("config.toml"))
}
