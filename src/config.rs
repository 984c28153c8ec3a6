//! Configuration management and validation.
//!
//! Provides the runtime settings for store location and batch sizing,
//! with builder-style overrides used by the CLI.

use crate::constants::{DEFAULT_CHUNK_SIZE, STORE_FILE_NAME};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global configuration for waymark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the JSON-backed point store
    pub store_path: PathBuf,

    /// Number of points per batch insert during imports
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Create configuration with a custom store path
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = path;
        self
    }

    /// Create configuration with a custom batch chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::configuration(
                "chunk size must be greater than 0".to_string(),
            ));
        }

        if self.store_path.as_os_str().is_empty() {
            return Err(Error::configuration(
                "store path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default store location under the user data directory
///
/// Falls back to a file in the working directory when the platform
/// provides no data directory.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("waymark").join(STORE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME))
}
