//! Keys: a canonical name plus an optional binary value
//!
//! A [`Key`] exclusively owns its [`KeyName`] and its [`KeyValue`]. All
//! name mutators work on a scratch copy of the name and commit only when
//! the whole operation succeeded.
//!
//! ## Contract
//!
//! - Every failing mutator leaves the key exactly as it was
//! - Read-only queries never fail
//! - Name mutators return the new canonical name length in bytes
//! - Value mutators return the new value length in bytes
//! - Every successful mutation marks the key as needing sync
//! - A locked part rejects every mutator of that part; locks never lift
//!
//! # Examples
//!
//! ```
//! use elektra_core::Key;
//!
//! let mut key = Key::new("user:/test/qwe/asd")?;
//! key.add_segment("yyyyyyy")?;
//! assert_eq!(key.name(), "user:/test/qwe/asd/yyyyyyy");
//!
//! key.set_name("system:/asd/qwe/asd")?;
//! assert_eq!(key.base_segment(), "asd");
//!
//! key.set_value(b"abc\0")?;
//! assert_eq!(key.value(), Some(&b"abc\0"[..]));
//! # Ok::<(), elektra_core::KeyError>(())
//! ```

use crate::error::{KeyError, NameError, Result, ValueError};
use crate::flags::{CopyFlags, LockFlags};
use crate::limits::Limits;
use crate::name::KeyName;
use crate::namespace::Namespace;
use crate::value::KeyValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Hierarchical configuration key
///
/// Serializes as `{ name, value }`. Deserializing checks the name and value
/// against the default [`Limits`] and yields an unlocked key that does not
/// need sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "KeyRepr")]
pub struct Key {
    name: KeyName,
    value: KeyValue,
    #[serde(skip)]
    needs_sync: bool,
    #[serde(skip)]
    limits: Limits,
    #[serde(skip)]
    locks: LockFlags,
}

/// Wire form of a [`Key`]
#[derive(Deserialize)]
struct KeyRepr {
    name: String,
    #[serde(default)]
    value: Option<Vec<u8>>,
}

impl TryFrom<KeyRepr> for Key {
    type Error = KeyError;

    fn try_from(repr: KeyRepr) -> Result<Self> {
        let mut builder = KeyBuilder::new(&repr.name)?;
        if let Some(bytes) = repr.value {
            builder = builder.value(bytes);
        }
        let mut key = builder.build()?;
        key.needs_sync = false;
        Ok(key)
    }
}

impl Key {
    /// Create a key from a name with default limits and no value.
    ///
    /// The empty string creates the cascading root `/`.
    ///
    /// # Errors
    ///
    /// Returns `NameError` if the name cannot be parsed or is too long.
    pub fn new(name: &str) -> std::result::Result<Self, NameError> {
        let name = KeyName::parse(name)?;
        let limits = Limits::default();
        limits.validate_name_length(name.len())?;
        Ok(Self::from_parts(name, KeyValue::default(), limits))
    }

    /// Start building a key with a value or custom limits
    pub fn builder(name: &str) -> std::result::Result<KeyBuilder, NameError> {
        KeyBuilder::new(name)
    }

    fn from_parts(name: KeyName, value: KeyValue, limits: Limits) -> Self {
        Self {
            name,
            value,
            needs_sync: true,
            limits,
            locks: LockFlags::NONE,
        }
    }

    /// Independent deep copy of this key, marked as needing sync.
    ///
    /// The copy starts unlocked; `Clone` keeps the locks.
    pub fn dup(&self) -> Key {
        Self::from_parts(self.name.clone(), self.value.clone(), self.limits)
    }

    /// Release the key's name and value storage
    pub fn destroy(self) {
        trace!(key = %self.name, "key destroyed");
    }

    // ------------------------------------------------------------------
    // Name
    // ------------------------------------------------------------------

    /// Canonical name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Parsed name
    pub fn key_name(&self) -> &KeyName {
        &self.name
    }

    /// Canonical name length in bytes
    pub fn name_size(&self) -> usize {
        self.name.len()
    }

    /// Namespace of the name
    pub fn namespace(&self) -> Namespace {
        self.name.namespace()
    }

    /// Replace the whole name.
    ///
    /// # Errors
    ///
    /// - `NameError::Empty` for an empty string
    /// - any `NameError` from parsing or the length limit
    pub fn set_name(&mut self, name: &str) -> std::result::Result<usize, NameError> {
        self.ensure_name_unlocked("set_name")?;
        if name.is_empty() {
            return Err(self.rejected("set_name", NameError::Empty));
        }
        let candidate = KeyName::parse(name).map_err(|e| self.rejected("set_name", e))?;
        self.commit_name("set_name", candidate)
    }

    /// Append a relative path, resolving `.` and `..`.
    ///
    /// ```
    /// use elektra_core::Key;
    ///
    /// let mut key = Key::new("user:/a/b")?;
    /// key.add_segment("../c/./d")?;
    /// assert_eq!(key.name(), "user:/a/c/d");
    /// # Ok::<(), elektra_core::NameError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `NameError::IllegalSegment` if `..` would go above the
    /// namespace root, or any tokenizer or length error.
    pub fn add_segment(&mut self, relative: &str) -> std::result::Result<usize, NameError> {
        self.ensure_name_unlocked("add_segment")?;
        let candidate = self
            .name
            .resolve(relative)
            .map_err(|e| self.rejected("add_segment", e))?;
        self.commit_name("add_segment", candidate)
    }

    /// Append one literal segment; `/` and `\` in it are escaped.
    ///
    /// # Errors
    ///
    /// Returns `NameError::IllegalSegment` for an empty segment or one
    /// containing NUL, or `NameError::TooLong`.
    pub fn add_base_segment(&mut self, literal: &str) -> std::result::Result<usize, NameError> {
        self.ensure_name_unlocked("add_base_segment")?;
        let candidate = self
            .name
            .with_pushed(literal)
            .map_err(|e| self.rejected("add_base_segment", e))?;
        self.commit_name("add_base_segment", candidate)
    }

    /// Last literal segment, `""` for a root
    pub fn base_segment(&self) -> &str {
        self.name.base()
    }

    /// Byte length of [`Key::base_segment`]
    pub fn base_segment_size(&self) -> usize {
        self.base_segment().len()
    }

    /// Replace the last segment with a literal segment.
    ///
    /// An empty segment removes the last level instead:
    ///
    /// ```
    /// use elektra_core::Key;
    ///
    /// let mut key = Key::new("system:/asd/qwe/asd")?;
    /// key.set_base_segment("")?;
    /// assert_eq!(key.name(), "system:/asd/qwe");
    /// assert_eq!(key.base_segment(), "qwe");
    /// # Ok::<(), elektra_core::NameError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `NameError::IllegalSegment` when removing a level from a root.
    pub fn set_base_segment(&mut self, literal: &str) -> std::result::Result<usize, NameError> {
        self.ensure_name_unlocked("set_base_segment")?;
        let candidate = self
            .name
            .with_base(literal)
            .map_err(|e| self.rejected("set_base_segment", e))?;
        self.commit_name("set_base_segment", candidate)
    }

    /// Move the key to another namespace, keeping its segments.
    ///
    /// # Errors
    ///
    /// Returns `NameError::TooLong` if the longer prefix exceeds the limit.
    pub fn set_namespace(&mut self, namespace: Namespace) -> std::result::Result<usize, NameError> {
        self.ensure_name_unlocked("set_namespace")?;
        let candidate = self.name.with_namespace(namespace);
        self.commit_name("set_namespace", candidate)
    }

    fn commit_name(
        &mut self,
        op: &'static str,
        candidate: KeyName,
    ) -> std::result::Result<usize, NameError> {
        if let Err(e) = self.limits.validate_name_length(candidate.len()) {
            return Err(self.rejected(op, e));
        }
        trace!(from = %self.name, to = %candidate, op, "key name changed");
        self.name = candidate;
        self.needs_sync = true;
        Ok(self.name.len())
    }

    fn rejected(&self, op: &'static str, err: NameError) -> NameError {
        debug!(key = %self.name, op, reason = err.reason_code(), "key name change rejected");
        err
    }

    fn ensure_name_unlocked(&self, op: &'static str) -> std::result::Result<(), NameError> {
        if self.locks.contains(LockFlags::NAME) {
            return Err(self.rejected(op, NameError::Locked));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// True if this key's name is strictly below `other`'s
    pub fn is_below(&self, other: &Key) -> bool {
        self.name.is_below(&other.name)
    }

    /// True if this key's name is below or equal to `other`'s
    pub fn is_below_or_same(&self, other: &Key) -> bool {
        self.name.is_below_or_same(&other.name)
    }

    /// True if this key's name is exactly one level below `other`'s
    pub fn is_directly_below(&self, other: &Key) -> bool {
        self.name.is_directly_below(&other.name)
    }

    // ------------------------------------------------------------------
    // Value
    // ------------------------------------------------------------------

    /// Current value, `None` if no value is set.
    ///
    /// The slice borrows the key and cannot be held across a mutation:
    ///
    /// ```compile_fail
    /// use elektra_core::Key;
    ///
    /// let mut key = Key::new("user:/a").unwrap();
    /// key.set_value(b"abc\0").unwrap();
    /// let old = key.value().unwrap();
    /// key.set_value(b"abcdefgh").unwrap();
    /// println!("{:?}", old);
    /// ```
    pub fn value(&self) -> Option<&[u8]> {
        self.value.get()
    }

    /// Length of the current value, `None` if no value is set
    pub fn value_size(&self) -> Option<usize> {
        self.value.size()
    }

    /// Current value as text, if set and valid UTF-8
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Replace the value with a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// - `ValueError::Locked` if the value is locked
    /// - `ValueError::TooLarge` if `bytes` exceeds the value limit
    /// - `ValueError::AllocationFailed` if the buffer cannot be allocated
    pub fn set_value(&mut self, bytes: &[u8]) -> std::result::Result<usize, ValueError> {
        let result = self
            .ensure_value_unlocked()
            .and_then(|()| self.limits.validate_value_length(bytes.len()))
            .and_then(|()| self.value.set(bytes));
        match result {
            Ok(len) => {
                trace!(key = %self.name, len, "key value set");
                self.needs_sync = true;
                Ok(len)
            }
            Err(e) => Err(self.value_rejected(e)),
        }
    }

    /// Replace the value with the UTF-8 bytes of `text` (no terminator)
    ///
    /// # Errors
    ///
    /// Same as [`Key::set_value`].
    pub fn set_string(&mut self, text: &str) -> std::result::Result<usize, ValueError> {
        self.set_value(text.as_bytes())
    }

    /// Remove the value
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Locked` if the value is locked.
    pub fn clear_value(&mut self) -> std::result::Result<(), ValueError> {
        self.ensure_value_unlocked().map_err(|e| self.value_rejected(e))?;
        if self.value.is_present() {
            self.value.clear();
            self.needs_sync = true;
            trace!(key = %self.name, "key value cleared");
        }
        Ok(())
    }

    fn ensure_value_unlocked(&self) -> std::result::Result<(), ValueError> {
        if self.locks.contains(LockFlags::VALUE) {
            return Err(ValueError::Locked);
        }
        Ok(())
    }

    fn value_rejected(&self, err: ValueError) -> ValueError {
        debug!(key = %self.name, reason = err.reason_code(), "key value change rejected");
        err
    }

    // ------------------------------------------------------------------
    // Locking and copying
    // ------------------------------------------------------------------

    /// Lock parts of the key against mutation, returning the parts that
    /// were not locked before.
    ///
    /// ```
    /// use elektra_core::{Key, LockFlags, NameError};
    ///
    /// let mut key = Key::new("user:/a")?;
    /// assert_eq!(key.lock(LockFlags::NAME), LockFlags::NAME);
    /// assert_eq!(key.lock(LockFlags::ALL), LockFlags::VALUE);
    /// assert_eq!(key.set_name("user:/b"), Err(NameError::Locked));
    /// # Ok::<(), elektra_core::KeyError>(())
    /// ```
    pub fn lock(&mut self, what: LockFlags) -> LockFlags {
        let added = what.difference(self.locks);
        if !added.is_empty() {
            self.locks = self.locks | added;
            trace!(key = %self.name, parts = %added, "key locked");
        }
        added
    }

    /// True if every part in `what` is locked
    pub fn is_locked(&self, what: LockFlags) -> bool {
        self.locks.contains(what)
    }

    /// Currently locked parts
    pub fn locks(&self) -> LockFlags {
        self.locks
    }

    /// Overwrite the selected parts of this key with those of `source`.
    ///
    /// Copying the value also copies its absence. Limits and locks stay
    /// this key's own. Nothing changes unless every selected part can be
    /// copied.
    ///
    /// # Errors
    ///
    /// - `NameError::Locked` / `ValueError::Locked` if a selected part is locked
    /// - `NameError::TooLong` / `ValueError::TooLarge` if a copied part
    ///   exceeds this key's limits
    /// - `ValueError::AllocationFailed` if the value cannot be allocated
    pub fn copy_from(&mut self, source: &Key, what: CopyFlags) -> Result<()> {
        let name = if what.contains(CopyFlags::NAME) {
            self.ensure_name_unlocked("copy_from")?;
            if let Err(e) = self.limits.validate_name_length(source.name.len()) {
                return Err(self.rejected("copy_from", e).into());
            }
            Some(source.name.clone())
        } else {
            None
        };

        let value = if what.contains(CopyFlags::VALUE) {
            let copied = self.ensure_value_unlocked().and_then(|()| match source.value.get() {
                Some(bytes) => {
                    self.limits.validate_value_length(bytes.len())?;
                    KeyValue::from_bytes(bytes)
                }
                None => Ok(KeyValue::default()),
            });
            Some(copied.map_err(|e| self.value_rejected(e))?)
        } else {
            None
        };

        if name.is_none() && value.is_none() {
            return Ok(());
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(value) = value {
            self.value = value;
        }
        self.needs_sync = true;
        trace!(from = %source.name, to = %self.name, parts = %what, "key copied");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sync and limits
    // ------------------------------------------------------------------

    /// True if the key changed since it was created or last synced
    pub fn needs_sync(&self) -> bool {
        self.needs_sync
    }

    /// Mark the key as persisted
    pub fn clear_sync(&mut self) {
        self.needs_sync = false;
    }

    /// Limits enforced by this key's mutators
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::from_parts(KeyName::default(), KeyValue::default(), Limits::default())
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl Eq for Key {}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

impl FromStr for Key {
    type Err = NameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Builder for keys with an initial value or custom limits
///
/// ```
/// use elektra_core::{Key, Limits};
///
/// let key = Key::builder("user:/sw/app/color")?
///     .string("blue")
///     .limits(Limits::with_small_limits())
///     .build()?;
/// assert_eq!(key.value_str(), Some("blue"));
/// # Ok::<(), elektra_core::KeyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    name: KeyName,
    value: Option<Vec<u8>>,
    limits: Limits,
}

impl KeyBuilder {
    /// Start a builder for the given name
    ///
    /// # Errors
    ///
    /// Returns `NameError` if the name cannot be parsed.
    pub fn new(name: &str) -> std::result::Result<Self, NameError> {
        Ok(Self {
            name: KeyName::parse(name)?,
            value: None,
            limits: Limits::default(),
        })
    }

    /// Initial binary value
    pub fn value(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.value = Some(bytes.as_ref().to_vec());
        self
    }

    /// Initial text value
    pub fn string(self, text: &str) -> Self {
        self.value(text)
    }

    /// Limits the key will enforce
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Build the key, checking the name and value against the limits.
    ///
    /// # Errors
    ///
    /// - `KeyError::Name` if the name exceeds the limit
    /// - `KeyError::Value` if the value exceeds the limit or cannot be allocated
    pub fn build(self) -> Result<Key> {
        self.limits.validate_name_length(self.name.len())?;
        let value = match self.value {
            Some(bytes) => {
                self.limits.validate_value_length(bytes.len())?;
                KeyValue::from_bytes(&bytes)?
            }
            None => KeyValue::default(),
        };
        Ok(Key::from_parts(self.name, value, self.limits))
    }
}

impl FromStr for KeyBuilder {
    type Err = NameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}
