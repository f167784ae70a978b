//! Engine configuration.
//!
//! ```toml
//! max_depth = 64
//! map_keys = "union"
//! ```

use crate::errors::{DiffError, ExError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default recursion limit; deep enough for any realistic domain graph.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Which mapping keys the engine visits when both sides are mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKeyPolicy {
    /// Only keys of the original mapping; additions in current go undetected
    #[default]
    Original,
    /// Keys of both mappings
    Union,
}

/// Tunables of a [`DiffEngine`](crate::DiffEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum recursion depth before `DepthExceeded` is returned
    pub max_depth: usize,
    pub map_keys: MapKeyPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            map_keys: MapKeyPolicy::Original,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML configuration document.
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed TOML or unknown keys, `InvalidConfig`
    /// for values that fail validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)
            .map_err(|e| ExError::from(DiffError::from(e)).with_op("load_config"))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::from(DiffError::from(e))
                .with_op("load_config")
                .with_tag(path.display().to_string())
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// `InvalidConfig` when `max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ExError::from(DiffError::InvalidConfig {
                reason: "max_depth must be at least 1".to_string(),
            })
            .with_op("validate_config"));
        }
        Ok(())
    }
}
