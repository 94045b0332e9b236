//! Core types for hierarchical configuration keys
//!
//! This crate defines:
//! - Namespace: closed set of namespace tags (`user`, `system`, ...)
//! - KeyName: canonical, escaped, hierarchical key name
//! - Hierarchy relations and ordering over key names
//! - KeyValue: exclusively owned binary value buffer
//! - Key / KeyBuilder: the key aggregate
//! - LockFlags / CopyFlags: part selectors for locking and copying
//! - Limits: configurable name and value size limits
//! - Error: NameError, ValueError, KeyError

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod flags;
pub mod hierarchy;
pub mod key;
pub mod limits;
pub mod name;
pub mod namespace;
pub mod value;

pub use error::{KeyError, NameError, Result, ValueError};
pub use flags::{CopyFlags, LockFlags};
pub use key::{Key, KeyBuilder};
pub use limits::{Limits, DEFAULT_MAX_NAME_BYTES, DEFAULT_MAX_VALUE_BYTES};
pub use name::{escape_segment, unescape_segment, KeyName};
pub use namespace::Namespace;
pub use value::KeyValue;
