//! Key value buffer
//!
//! A [`KeyValue`] holds an optional binary value. It distinguishes three
//! states:
//! - absent (`None`): no value was ever set, or it was cleared
//! - present and empty: `set(&[])`
//! - present with bytes
//!
//! ## Buffer ownership
//!
//! The buffer is a single allocation sized exactly to the stored value.
//! Writing a value of a different length allocates a new buffer and
//! releases the old one; writing a value of the same length overwrites in
//! place. A slice returned by [`KeyValue::get`] borrows the store, so it
//! cannot outlive the next write:
//!
//! ```compile_fail
//! use elektra_core::KeyValue;
//!
//! let mut value = KeyValue::default();
//! value.set(b"abc\0").unwrap();
//! let old = value.get().unwrap();
//! value.set(b"longer value").unwrap(); // error: `value` is still borrowed
//! assert_eq!(old, b"abc\0");
//! ```
//!
//! The length is tracked explicitly; the bytes are never assumed to be text
//! or to carry a terminator.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};

/// Optional binary value owned by a key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValue {
    data: Option<Box<[u8]>>,
}

impl KeyValue {
    /// Create a store holding a copy of `bytes`
    ///
    /// # Errors
    ///
    /// Returns `ValueError::AllocationFailed` if the buffer cannot be allocated.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValueError> {
        Ok(Self {
            data: Some(allocate(bytes)?),
        })
    }

    /// Current value, `None` if absent
    pub fn get(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Length of the current value, `None` if absent
    pub fn size(&self) -> Option<usize> {
        self.data.as_ref().map(|d| d.len())
    }

    /// True if a value (possibly empty) is present
    pub fn is_present(&self) -> bool {
        self.data.is_some()
    }

    /// Current value as text, if present and valid UTF-8.
    ///
    /// A single trailing `\0` terminator is not part of the text.
    pub fn as_str(&self) -> Option<&str> {
        let bytes = self.get()?;
        let bytes = bytes.strip_suffix(&[0u8]).unwrap_or(bytes);
        std::str::from_utf8(bytes).ok()
    }

    /// Replace the value with a copy of `bytes`, returning the new length.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::AllocationFailed` if a new buffer is needed and
    /// cannot be allocated. The previous value is kept in that case.
    pub fn set(&mut self, bytes: &[u8]) -> Result<usize, ValueError> {
        if let Some(current) = self.data.as_deref_mut() {
            if current.len() == bytes.len() {
                current.copy_from_slice(bytes);
                return Ok(bytes.len());
            }
        }
        self.data = Some(allocate(bytes)?);
        Ok(bytes.len())
    }

    /// Remove the value
    pub fn clear(&mut self) {
        self.data = None;
    }
}

/// Allocate an exactly sized buffer holding `bytes`
fn allocate(bytes: &[u8]) -> Result<Box<[u8]>, ValueError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(bytes.len())
        .map_err(|_| ValueError::AllocationFailed {
            requested: bytes.len(),
        })?;
    buffer.extend_from_slice(bytes);
    Ok(buffer.into_boxed_slice())
}
