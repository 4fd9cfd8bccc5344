// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads `default.toml` (or the file given with `--config`) and
//! deserializes it into `AgentConfig`.
//!
//! Configuration is read before logging exists, so loading does not log;
//! it returns a [`ConfigSource`] that the caller reports once the logger
//! is up.

use crate::config::model::{AgentConfig, ConfigError};
use log::info;
use std::{fs, path::Path, path::PathBuf};

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { missing: PathBuf },
}

impl ConfigSource {
    /// Log where the configuration came from, under the `config` target.
    pub fn report(&self) {
        match self {
            ConfigSource::File(path) => {
                info!(target: "config", "Loaded config from {}", path.display())
            }
            ConfigSource::Defaults { missing } => {
                info!(target: "config", "No config at {}, using defaults", missing.display())
            }
        }
    }
}

/// Load and parse the agent configuration from `path`.
pub fn load(path: &Path) -> Result<AgentConfig, ConfigError> {
    let txt = fs::read_to_string(path)?;
    let cfg: AgentConfig = toml::from_str(&txt)?;
    cfg.validate()
}

/// Like [`load`], but a missing file yields the built-in defaults.
pub fn load_or_default(path: &Path) -> Result<(AgentConfig, ConfigSource), ConfigError> {
    if !path.exists() {
        let source = ConfigSource::Defaults { missing: path.to_path_buf() };
        return Ok((AgentConfig::default(), source));
    }
    Ok((load(path)?, ConfigSource::File(path.to_path_buf())))
}
