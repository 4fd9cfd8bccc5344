// src/config/model.rs

use log::LevelFilter;
use serde::Deserialize;
use shared::constants::{DEVICE_PATH, MSG_CAPACITY};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level runtime config
#[derive(Debug, Default, Deserialize)]
pub struct AgentConfig {
    #[serde(default)] pub device:  DeviceConfig,
    #[serde(default)] pub logging: LoggingConfig,
}

/// Mirror of the `[device]` table
#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_path")]        pub path:        PathBuf,
    #[serde(default = "default_read_buffer")] pub read_buffer: usize,
}
fn default_path() -> PathBuf { PathBuf::from(DEVICE_PATH) }
fn default_read_buffer() -> usize { MSG_CAPACITY }

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { path: default_path(), read_buffer: default_read_buffer() }
    }
}

/// Mirror of the `[logging]` table
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]            pub enable: bool,
    #[serde(default)]            pub file:   Option<String>,
    #[serde(default = "default_level")] pub level: String,
}
fn default_level() -> String { "INFO".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enable: false, file: None, level: default_level() }
    }
}

impl LoggingConfig {
    /// Unknown level strings fall back to INFO.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.to_uppercase().as_str() {
            "OFF"   => LevelFilter::Off,
            "ERROR" => LevelFilter::Error,
            "WARN"  => LevelFilter::Warn,
            "DEBUG" => LevelFilter::Debug,
            "TRACE" => LevelFilter::Trace,
            _       => LevelFilter::Info,
        }
    }
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid read_buffer {0}: must be at least 1 byte")]
    InvalidReadBuffer(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AgentConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.device.read_buffer == 0 {
            return Err(ConfigError::InvalidReadBuffer(0));
        }
        Ok(self)
    }
}
