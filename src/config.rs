use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Default number of bytes shown by `dump` when no length is given
pub const DEFAULT_DUMP_LENGTH: usize = 0x100;

/// Tunables for an editing engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of undo snapshots kept
    pub history_capacity: usize,
    /// Bytes rendered by `dump` when `length` is omitted
    pub dump_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            dump_length: DEFAULT_DUMP_LENGTH,
        }
    }
}

/// Error types for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EngineConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let display = path_ref.display().to_string();

        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: EngineConfig = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: display, source })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.dump_length == 0 {
            return Err(ConfigError::Invalid("dump_length must be at least 1".to_string()));
        }
        Ok(())
    }
}
