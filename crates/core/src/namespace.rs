//! Key namespaces
//!
//! Every key name starts with an optional namespace tag (`user:/...`,
//! `system:/...`). A name without a tag is *cascading*: it does not belong
//! to a single namespace and is resolved across all of them by a lookup
//! collaborator.
//!
//! The set of namespaces is closed. Unknown tags are rejected at parse time.

use crate::error::NameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace of a key name
///
/// Ordering: Cascading < Spec < Proc < Dir < User < System < Default
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Namespace {
    /// No namespace tag (`/a/b`)
    #[default]
    Cascading = 1,
    /// Specification keys (`spec:/`)
    Spec = 2,
    /// Process-local keys (`proc:/`)
    Proc = 3,
    /// Directory-local keys (`dir:/`)
    Dir = 4,
    /// Per-user keys (`user:/`)
    User = 5,
    /// System-wide keys (`system:/`)
    System = 6,
    /// Default values (`default:/`)
    Default = 7,
}

impl Namespace {
    /// All namespaces in their canonical order
    pub const ALL: [Namespace; 7] = [
        Namespace::Cascading,
        Namespace::Spec,
        Namespace::Proc,
        Namespace::Dir,
        Namespace::User,
        Namespace::System,
        Namespace::Default,
    ];

    /// Tag written before `:` in a canonical name, `None` for cascading
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Namespace::Cascading => None,
            Namespace::Spec => Some("spec"),
            Namespace::Proc => Some("proc"),
            Namespace::Dir => Some("dir"),
            Namespace::User => Some("user"),
            Namespace::System => Some("system"),
            Namespace::Default => Some("default"),
        }
    }

    /// Canonical prefix preceding the first segment separator
    ///
    /// `"user:"` for user keys, `""` for cascading keys.
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Cascading => "",
            Namespace::Spec => "spec:",
            Namespace::Proc => "proc:",
            Namespace::Dir => "dir:",
            Namespace::User => "user:",
            Namespace::System => "system:",
            Namespace::Default => "default:",
        }
    }

    /// Convert to byte representation
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Try to create from byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|ns| ns.as_byte() == byte)
    }

    /// Resolve a namespace tag (the text before `:`)
    ///
    /// # Errors
    ///
    /// Returns `NameError::InvalidNamespace` for empty or unknown tags.
    pub fn from_tag(tag: &str) -> Result<Self, NameError> {
        Self::ALL
            .iter()
            .copied()
            .find(|ns| ns.tag() == Some(tag))
            .ok_or_else(|| NameError::InvalidNamespace(tag.to_string()))
    }
}

impl FromStr for Namespace {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("cascading"))
    }
}
