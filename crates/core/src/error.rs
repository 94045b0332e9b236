//! Error types for key operations
//!
//! Two families of errors exist:
//! - [`NameError`]: syntax and hierarchy violations in a name or segment
//! - [`ValueError`]: the value buffer could not be (re)allocated
//!
//! Both carry a `Locked` variant for mutations of a locked part.
//!
//! [`KeyError`] is the umbrella type used where both can occur. We use
//! `thiserror` for the `Display` and `Error` implementations.
//!
//! Every mutator that returns one of these errors leaves the key exactly as
//! it was before the call.

use thiserror::Error;

/// Result type alias for key operations
pub type Result<T> = std::result::Result<T, KeyError>;

/// Name validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty where a non-root name is required
    #[error("Key name cannot be empty")]
    Empty,

    /// Namespace tag before `:` is not a known namespace
    #[error("Invalid namespace '{0}'")]
    InvalidNamespace(String),

    /// Segment is malformed or cannot be applied at this position
    #[error("Illegal segment '{0}'")]
    IllegalSegment(String),

    /// Canonical name exceeds the configured maximum
    #[error("Key name too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Canonical name length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// The key's name is locked
    #[error("Key name is locked")]
    Locked,
}

impl NameError {
    /// Get the stable reason code for this error
    pub fn reason_code(&self) -> &'static str {
        match self {
            NameError::Empty => "empty_name",
            NameError::InvalidNamespace(_) => "invalid_namespace",
            NameError::IllegalSegment(_) => "illegal_segment",
            NameError::TooLong { .. } => "name_too_long",
            NameError::Locked => "name_locked",
        }
    }
}

/// Value buffer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The allocator refused a buffer of the requested size
    #[error("Failed to allocate {requested} bytes for key value")]
    AllocationFailed {
        /// Requested buffer length in bytes
        requested: usize,
    },

    /// Value exceeds the configured maximum
    #[error("Value too large: {actual} bytes exceeds maximum {max}")]
    TooLarge {
        /// Value length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// The key's value is locked
    #[error("Key value is locked")]
    Locked,
}

impl ValueError {
    /// Get the stable reason code for this error
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValueError::AllocationFailed { .. } => "allocation_failed",
            ValueError::TooLarge { .. } => "value_too_large",
            ValueError::Locked => "value_locked",
        }
    }
}

/// Umbrella error for key operations
#[derive(Debug, Error)]
pub enum KeyError {
    /// Name error
    #[error(transparent)]
    Name(#[from] NameError),

    /// Value error
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Limits configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeyError {
    /// Get the stable reason code for this error
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::Name(e) => e.reason_code(),
            KeyError::Value(e) => e.reason_code(),
            KeyError::Config(_) => "config_error",
        }
    }
}
