//! Canonical key names
//!
//! A [`KeyName`] is a namespace plus an ordered list of literal segments.
//! Its canonical text form is
//!
//! ```text
//! <namespace>:/<seg1>/<seg2>/...     e.g. user:/sw/app/color
//! /<seg1>/<seg2>/...                 cascading (no namespace tag)
//! ```
//!
//! ## Escaping
//!
//! `/` separates segments. The escape character `\` makes the next
//! character part of the segment:
//!
//! | Escaped | Literal |
//! |---------|---------|
//! | `\/`    | `/`     |
//! | `\\`    | `\`     |
//! | `\.`    | `.`     |
//!
//! Any other escape sequence is rejected. Unescaped `.` and `..` segments
//! are navigation; they are rejected by [`KeyName::parse`] and resolved by
//! [`KeyName::resolve`].
//!
//! ## Normalization
//!
//! - Repeated and trailing separators are dropped (`user:/a//b/` is `user:/a/b`)
//! - A name that is only `/`, or empty after the tag, is the namespace root
//! - A bare name without a leading `/` is cascading (`app` is `/app`)
//!
//! Rendering a parsed name and parsing it again always yields the same name.

use crate::error::NameError;
use crate::namespace::Namespace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment separator
pub const SEPARATOR: char = '/';

/// Escape character
pub const ESCAPE: char = '\\';

/// Separator between the namespace tag and the path
pub const NAMESPACE_SEPARATOR: char = ':';

/// Canonical hierarchical key name
///
/// # Examples
///
/// ```
/// use elektra_core::{KeyName, Namespace};
///
/// let name = KeyName::parse("user:/test/qwe/asd").unwrap();
/// assert_eq!(name.namespace(), Namespace::User);
/// assert_eq!(name.segments(), ["test", "qwe", "asd"]);
/// assert_eq!(name.as_str(), "user:/test/qwe/asd");
///
/// // Separators inside a segment are escaped
/// let name = KeyName::parse(r"system:/a\/b/c").unwrap();
/// assert_eq!(name.segments(), ["a/b", "c"]);
/// assert_eq!(name.to_string(), r"system:/a\/b/c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyName {
    namespace: Namespace,
    segments: Vec<String>,
    canonical: String,
}

/// Segment as produced by the tokenizer, before navigation is resolved
#[derive(Debug)]
struct RawSegment {
    literal: String,
    escaped: bool,
}

impl RawSegment {
    fn is_current(&self) -> bool {
        !self.escaped && self.literal == "."
    }

    fn is_parent(&self) -> bool {
        !self.escaped && self.literal == ".."
    }
}

impl KeyName {
    /// The zero-segment root of a namespace
    pub fn root(namespace: Namespace) -> Self {
        Self::from_parts(namespace, Vec::new())
    }

    /// Parse a name from its textual form.
    ///
    /// The empty string parses to the cascading root.
    ///
    /// # Errors
    ///
    /// - `NameError::InvalidNamespace` for an empty or unknown tag
    /// - `NameError::IllegalSegment` for a malformed escape, a NUL byte, or
    ///   an unescaped `.`/`..` segment
    pub fn parse(text: &str) -> Result<Self, NameError> {
        let (namespace, path) = split_namespace(text)?;
        let mut segments = Vec::new();
        for raw in tokenize(path)? {
            if raw.is_current() || raw.is_parent() {
                return Err(NameError::IllegalSegment(raw.literal));
            }
            segments.push(raw.literal);
        }
        Ok(Self::from_parts(namespace, segments))
    }

    pub(crate) fn from_parts(namespace: Namespace, segments: Vec<String>) -> Self {
        let canonical = render(namespace, &segments);
        Self {
            namespace,
            segments,
            canonical,
        }
    }

    /// Namespace of this name
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Literal (unescaped) segments, root first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below the namespace root
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True for the zero-segment root of a namespace
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Canonical text form
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Canonical text length in bytes
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// True only for an unrendered name; a parsed name, even a root,
    /// renders as at least `/`
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Last literal segment, or `""` for a root
    pub fn base(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Name one level up, `None` for a root
    pub fn parent(&self) -> Option<KeyName> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self::from_parts(self.namespace, rest.to_vec()))
    }

    /// Same segments in another namespace
    pub fn with_namespace(&self, namespace: Namespace) -> KeyName {
        Self::from_parts(namespace, self.segments.clone())
    }

    /// Resolve a relative, possibly multi-segment path against this name.
    ///
    /// `.` is skipped, `..` removes one segment. A leading `/` is ignored and
    /// the namespace is never changed.
    ///
    /// # Errors
    ///
    /// - `NameError::IllegalSegment` if `..` would go above the namespace root
    /// - any tokenizer error from [`KeyName::parse`]
    pub fn resolve(&self, relative: &str) -> Result<KeyName, NameError> {
        let mut segments = self.segments.clone();
        for raw in tokenize(relative)? {
            if raw.is_current() {
                continue;
            }
            if raw.is_parent() {
                if segments.pop().is_none() {
                    return Err(NameError::IllegalSegment(raw.literal));
                }
                continue;
            }
            segments.push(raw.literal);
        }
        Ok(Self::from_parts(self.namespace, segments))
    }

    /// Append one literal segment (no escape processing).
    ///
    /// # Errors
    ///
    /// Returns `NameError::IllegalSegment` for an empty segment or one
    /// containing a NUL byte.
    pub fn with_pushed(&self, literal: &str) -> Result<KeyName, NameError> {
        validate_literal(literal)?;
        let mut segments = self.segments.clone();
        segments.push(literal.to_string());
        Ok(Self::from_parts(self.namespace, segments))
    }

    /// Replace the last segment with a literal segment.
    ///
    /// An empty literal removes the last segment. A non-empty literal on a
    /// root becomes its first segment.
    ///
    /// # Errors
    ///
    /// Returns `NameError::IllegalSegment` when removing from a root or for
    /// a literal containing a NUL byte.
    pub fn with_base(&self, literal: &str) -> Result<KeyName, NameError> {
        let mut segments = self.segments.clone();
        if literal.is_empty() {
            if segments.pop().is_none() {
                return Err(NameError::IllegalSegment(String::new()));
            }
        } else {
            validate_literal(literal)?;
            match segments.last_mut() {
                Some(last) => *last = literal.to_string(),
                None => segments.push(literal.to_string()),
            }
        }
        Ok(Self::from_parts(self.namespace, segments))
    }

    /// Unescaped binary form: namespace byte, `\0`, then each segment
    /// followed by `\0`.
    ///
    /// Segments never contain NUL, so this form is unambiguous without
    /// escaping.
    pub fn unescaped(&self) -> Vec<u8> {
        let capacity = 2 + self.segments.iter().map(|s| s.len() + 1).sum::<usize>();
        let mut out = Vec::with_capacity(capacity);
        out.push(self.namespace.as_byte());
        out.push(0);
        for segment in &self.segments {
            out.extend_from_slice(segment.as_bytes());
            out.push(0);
        }
        out
    }
}

impl Default for KeyName {
    fn default() -> Self {
        Self::root(Namespace::Cascading)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl AsRef<str> for KeyName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl FromStr for KeyName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeyName> for String {
    fn from(name: KeyName) -> Self {
        name.canonical
    }
}

/// Escape a literal segment for use in a canonical name
///
/// ```
/// use elektra_core::name::escape_segment;
///
/// assert_eq!(escape_segment("a/b"), r"a\/b");
/// assert_eq!(escape_segment(".."), r"\..");
/// assert_eq!(escape_segment("plain"), "plain");
/// ```
pub fn escape_segment(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    if literal == "." || literal == ".." {
        out.push(ESCAPE);
    }
    for c in literal.chars() {
        if c == SEPARATOR || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Unescape a single escaped segment
///
/// # Errors
///
/// Returns `NameError::IllegalSegment` if the text contains an unescaped
/// separator, a malformed escape or a NUL byte, or is empty.
pub fn unescape_segment(escaped: &str) -> Result<String, NameError> {
    let mut tokens = tokenize_segments(escaped, false)?;
    match (tokens.pop(), tokens.is_empty()) {
        (Some(raw), true) => Ok(raw.literal),
        _ => Err(NameError::IllegalSegment(escaped.to_string())),
    }
}

fn validate_literal(literal: &str) -> Result<(), NameError> {
    if literal.is_empty() || literal.contains('\0') {
        return Err(NameError::IllegalSegment(literal.to_string()));
    }
    Ok(())
}

/// Split an optional `<tag>:` prefix off the text.
///
/// The tag is only recognised when the text before the first `:` contains
/// neither a separator nor an escape.
fn split_namespace(text: &str) -> Result<(Namespace, &str), NameError> {
    match text.find(NAMESPACE_SEPARATOR) {
        Some(idx) if !text[..idx].contains([SEPARATOR, ESCAPE]) => {
            let namespace = Namespace::from_tag(&text[..idx])?;
            Ok((namespace, &text[idx + 1..]))
        }
        _ => Ok((Namespace::Cascading, text)),
    }
}

fn tokenize(path: &str) -> Result<Vec<RawSegment>, NameError> {
    tokenize_segments(path, true)
}

/// Split on unescaped separators, dropping empty segments.
///
/// With `split` false an unescaped separator is an error instead.
fn tokenize_segments(path: &str, split: bool) -> Result<Vec<RawSegment>, NameError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            SEPARATOR if split => {
                if !current.is_empty() {
                    segments.push(RawSegment {
                        literal: std::mem::take(&mut current),
                        escaped,
                    });
                }
                escaped = false;
            }
            ESCAPE => match chars.next() {
                Some(next @ (SEPARATOR | ESCAPE | '.')) => {
                    current.push(next);
                    escaped = true;
                }
                Some(next) => {
                    return Err(NameError::IllegalSegment(format!(
                        "{}{}{}",
                        current, ESCAPE, next
                    )));
                }
                None => {
                    return Err(NameError::IllegalSegment(format!("{}{}", current, ESCAPE)));
                }
            },
            SEPARATOR | '\0' => {
                return Err(NameError::IllegalSegment(path.to_string()));
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        segments.push(RawSegment {
            literal: current,
            escaped,
        });
    }
    Ok(segments)
}

fn render(namespace: Namespace, segments: &[String]) -> String {
    let mut out = String::from(namespace.prefix());
    if segments.is_empty() {
        out.push(SEPARATOR);
    }
    for segment in segments {
        out.push(SEPARATOR);
        out.push_str(&escape_segment(segment));
    }
    out
}
