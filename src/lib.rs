//! Elektra - hierarchical configuration keys
//!
//! Keys are addressed by namespaced, filesystem-like names and carry an
//! optional binary value.
//!
//! # Quick Start
//!
//! ```
//! use elektra::Key;
//!
//! let parent = Key::new("user:/sw/app")?;
//! let mut key = Key::new("user:/sw/app/color")?;
//! assert!(key.is_below(&parent));
//!
//! key.set_string("blue")?;
//! assert_eq!(key.value_str(), Some("blue"));
//! # Ok::<(), elektra::KeyError>(())
//! ```
//!
//! # Architecture
//!
//! All types live in `elektra-core` and are re-exported here. Collections of
//! keys, persistence and metadata are provided by other components.

// Re-export the public API from elektra-core
pub use elektra_core::*;
