//! Size limits for key names and values
//!
//! Limits are checked by every name and value mutator. A violation is
//! reported as [`NameError::TooLong`] or [`ValueError::TooLarge`] and the key
//! is left unchanged.
//!
//! Limits can be loaded from a TOML document:
//!
//! ```toml
//! # Maximum canonical name length in bytes (default: 8192)
//! max_name_bytes = 8192
//!
//! # Maximum value length in bytes (default: 64MB)
//! max_value_bytes = 67108864
//! ```

use crate::error::{KeyError, NameError, Result, ValueError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum canonical name length in bytes
pub const DEFAULT_MAX_NAME_BYTES: usize = 8192;

/// Default maximum value length in bytes
pub const DEFAULT_MAX_VALUE_BYTES: usize = 64 * 1024 * 1024;

/// Size limits for names and values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum canonical name length in bytes (default: 8192)
    #[serde(default = "default_max_name_bytes")]
    pub max_name_bytes: usize,

    /// Maximum value length in bytes (default: 64MB)
    #[serde(default = "default_max_value_bytes")]
    pub max_value_bytes: usize,
}

fn default_max_name_bytes() -> usize {
    DEFAULT_MAX_NAME_BYTES
}

fn default_max_value_bytes() -> usize {
    DEFAULT_MAX_VALUE_BYTES
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_name_bytes: DEFAULT_MAX_NAME_BYTES,
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_name_bytes: 64,
            max_value_bytes: 16,
        }
    }

    /// Parse limits from a TOML document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Config` if the document is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| KeyError::Config(format!("Failed to parse limits: {}", e)))
    }

    /// Read and parse limits from a file path.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KeyError::Config(format!(
                "Failed to read limits file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate a canonical name length
    pub fn validate_name_length(&self, len: usize) -> std::result::Result<(), NameError> {
        if len > self.max_name_bytes {
            return Err(NameError::TooLong {
                actual: len,
                max: self.max_name_bytes,
            });
        }
        Ok(())
    }

    /// Validate a value length
    pub fn validate_value_length(&self, len: usize) -> std::result::Result<(), ValueError> {
        if len > self.max_value_bytes {
            return Err(ValueError::TooLarge {
                actual: len,
                max: self.max_value_bytes,
            });
        }
        Ok(())
    }
}
