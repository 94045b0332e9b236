//! Hierarchy relations between key names
//!
//! Names form one tree per namespace. A name is *below* another when it
//! lives in the same namespace and the other's segments are a strict,
//! segment-wise prefix of its own:
//!
//! ```text
//! user:/a/b/c  is below  user:/a/b    (directly)
//! user:/a/b/c  is below  user:/a      (not directly)
//! user:/a/bc   is NOT below user:/a/b (segments differ, not a text prefix test)
//! system:/a/b  is NOT below user:/a   (different namespace)
//! ```
//!
//! # Ordering
//!
//! `KeyName` is totally ordered by namespace, then segment-wise. A name
//! sorts immediately before all names below it, so a sorted collection
//! keeps every subtree contiguous.

use crate::name::KeyName;
use std::cmp::Ordering;

impl KeyName {
    /// True if `self` is strictly below `other`.
    ///
    /// Never true for equal names.
    pub fn is_below(&self, other: &KeyName) -> bool {
        self.depth() > other.depth() && self.shares_prefix(other)
    }

    /// True if `self` is below or equal to `other`.
    pub fn is_below_or_same(&self, other: &KeyName) -> bool {
        self.depth() >= other.depth() && self.shares_prefix(other)
    }

    /// True if `self` is exactly one level below `other`.
    pub fn is_directly_below(&self, other: &KeyName) -> bool {
        self.depth() == other.depth() + 1 && self.shares_prefix(other)
    }

    fn shares_prefix(&self, other: &KeyName) -> bool {
        self.namespace() == other.namespace()
            && self
                .segments()
                .iter()
                .zip(other.segments())
                .all(|(mine, theirs)| mine == theirs)
    }
}

impl Ord for KeyName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace()
            .cmp(&other.namespace())
            .then_with(|| self.segments().cmp(other.segments()))
    }
}

impl PartialOrd for KeyName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
