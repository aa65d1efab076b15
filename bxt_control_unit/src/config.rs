//! TOML configuration loader with validation.
//!
//! Loads a [`RigConfig`] from one TOML file. A missing file falls back to the
//! built-in defaults; parse and bound errors are fatal.

use std::path::{Path, PathBuf};

use bxt_common::config::{ConfigError, ConfigLoader};
use bxt_common::control_unit::config::RigConfig;
use tracing::warn;

/// Where the running configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
    Inline,
}

/// Validated configuration bundle, ready for runtime use.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub rig: RigConfig,
    pub source: ConfigSource,
}

/// Load and validate the rig configuration.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let (rig, source) = match RigConfig::load(path) {
        Ok(rig) => (rig, ConfigSource::File(path.to_path_buf())),
        Err(ConfigError::FileNotFound) => {
            warn!("{} not found, using built-in defaults", path.display());
            (RigConfig::default(), ConfigSource::Defaults)
        }
        Err(e) => return Err(e),
    };
    validate(rig, source)
}

/// Load config from a TOML string (for testing).
pub fn load_config_from_str(toml: &str) -> Result<LoadedConfig, ConfigError> {
    let rig = RigConfig::load_str(toml)?;
    validate(rig, ConfigSource::Inline)
}

fn validate(rig: RigConfig, source: ConfigSource) -> Result<LoadedConfig, ConfigError> {
    rig.validate().map_err(ConfigError::ValidationError)?;
    Ok(LoadedConfig { rig, source })
}
