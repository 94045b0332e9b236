//! Lock and copy selectors for a key's parts
//!
//! Both are small bit sets over the two parts a key owns: its name and its
//! value. They combine with `|`.

use std::fmt;
use std::ops::BitOr;

const NAME_BIT: u8 = 0b01;
const VALUE_BIT: u8 = 0b10;

/// Parts of a key that can be locked against mutation.
///
/// Locks only accumulate; a locked part stays locked for the lifetime of the
/// key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LockFlags(u8);

impl LockFlags {
    /// Nothing locked
    pub const NONE: LockFlags = LockFlags(0);
    /// Name mutators fail
    pub const NAME: LockFlags = LockFlags(NAME_BIT);
    /// Value mutators fail
    pub const VALUE: LockFlags = LockFlags(VALUE_BIT);
    /// Name and value
    pub const ALL: LockFlags = LockFlags(NAME_BIT | VALUE_BIT);

    /// True if every part in `other` is also in `self`
    pub fn contains(self, other: LockFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no part is selected
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parts in `self` that are not in `other`
    pub fn difference(self, other: LockFlags) -> LockFlags {
        LockFlags(self.0 & !other.0)
    }
}

impl BitOr for LockFlags {
    type Output = LockFlags;

    fn bitor(self, rhs: LockFlags) -> LockFlags {
        LockFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for LockFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_parts(f, self.0)
    }
}

/// Parts of a key copied by [`Key::copy_from`](crate::Key::copy_from)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CopyFlags(u8);

impl CopyFlags {
    /// Copy nothing
    pub const NONE: CopyFlags = CopyFlags(0);
    /// Copy the name
    pub const NAME: CopyFlags = CopyFlags(NAME_BIT);
    /// Copy the value, including its absence
    pub const VALUE: CopyFlags = CopyFlags(VALUE_BIT);
    /// Name and value
    pub const ALL: CopyFlags = CopyFlags(NAME_BIT | VALUE_BIT);

    /// True if every part in `other` is also in `self`
    pub fn contains(self, other: CopyFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no part is selected
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CopyFlags {
    type Output = CopyFlags;

    fn bitor(self, rhs: CopyFlags) -> CopyFlags {
        CopyFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for CopyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_parts(f, self.0)
    }
}

fn fmt_parts(f: &mut fmt::Formatter<'_>, bits: u8) -> fmt::Result {
    match (bits & NAME_BIT != 0, bits & VALUE_BIT != 0) {
        (false, false) => f.write_str("none"),
        (true, false) => f.write_str("name"),
        (false, true) => f.write_str("value"),
        (true, true) => f.write_str("name|value"),
    }
}
