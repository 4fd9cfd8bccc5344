//! Public API for configuration

pub mod loader;
pub mod model;

// Re-export the main entrypoints:
pub use loader::{ConfigSource, load, load_or_default};
pub use model::{AgentConfig, ConfigError};
