//! Debug configuration
//!
//! Controls the debug gate consulted by [`crate::intlog`]. Values come from an
//! optional `stackprobe.toml` in the working directory, overridden by
//! `STACKPROBE_*` environment variables (e.g. `STACKPROBE_DEBUG=true`).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::warn;

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "stackprobe";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "STACKPROBE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load debug configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Enable internal debug logging
    pub debug: bool,
}

impl DebugConfig {
    /// Load from `stackprobe.{toml,json,...}` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from the given file (which may be missing) and the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

static DEBUG_ENABLED: Lazy<AtomicBool> = Lazy::new(|| {
    let enabled = match DebugConfig::load() {
        Ok(config) => config.debug,
        Err(e) => {
            warn!("{}, debug logging disabled", e);
            false
        }
    };
    AtomicBool::new(enabled)
});

/// Whether debug output is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Override the loaded debug setting
pub fn set_debug_enabled(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}
