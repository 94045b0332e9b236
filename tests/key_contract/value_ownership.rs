//! Value buffer ownership and size reporting.

use crate::common::key;
use elektra::Key;
use proptest::prelude::*;

#[test]
fn no_value_before_first_set() {
    let k = key("user:/a");
    assert_eq!(k.value(), None);
    assert_eq!(k.value_size(), None);
    assert_eq!(k.value_str(), None);
}

#[test]
fn empty_value_is_distinct_from_absent() {
    let mut k = key("user:/a");
    assert_eq!(k.set_value(&[]), Ok(0));
    assert_eq!(k.value(), Some(&[][..]));
    assert_eq!(k.value_size(), Some(0));

    k.clear_value().unwrap();
    assert_eq!(k.value(), None);
}

#[test]
fn overwrite_with_different_length_returns_new_bytes() {
    let mut k = key("user:/a");
    k.set_value(b"abc\0").unwrap();
    // copy out before the next mutation; a borrowed slice could not survive it
    let first = k.value().unwrap().to_vec();

    assert_eq!(k.set_value(b"abcdefgh"), Ok(8));
    assert_eq!(k.value(), Some(&b"abcdefgh"[..]));
    assert_eq!(first, b"abc\0");
}

#[test]
fn binary_values_keep_embedded_nuls() {
    let mut k = key("user:/bin");
    let bytes = [0u8, 0, 1, 0, 255];
    assert_eq!(k.set_value(&bytes), Ok(5));
    assert_eq!(k.value(), Some(&bytes[..]));
}

#[test]
fn string_values() {
    let mut k = key("user:/s");
    k.set_string("hello").unwrap();
    assert_eq!(k.value_str(), Some("hello"));

    // a trailing terminator written by a C-style caller is not part of the text
    k.set_value(b"abc\0").unwrap();
    assert_eq!(k.value_str(), Some("abc"));
}

#[test]
fn dup_does_not_share_buffers() {
    let mut a = key("user:/a");
    a.set_value(b"one").unwrap();
    let b = a.dup();
    a.set_value(b"two").unwrap();
    assert_eq!(b.value(), Some(&b"one"[..]));
    assert_eq!(a.value(), Some(&b"two"[..]));
}

#[test]
fn serde_roundtrip_preserves_name_and_value() {
    let k = Key::builder("system:/a/b")
        .unwrap()
        .value([1u8, 0, 2])
        .build()
        .unwrap();
    let json = serde_json::to_string(&k).unwrap();
    let back: Key = serde_json::from_str(&json).unwrap();
    assert_eq!(back, k);
    assert_eq!(back.name(), "system:/a/b");
}

proptest! {
    #[test]
    fn size_tracks_last_write(writes in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..8)) {
        let mut k = key("user:/p");
        for bytes in &writes {
            prop_assert_eq!(k.set_value(bytes).unwrap(), bytes.len());
        }
        let last = writes.last().unwrap();
        prop_assert_eq!(k.value(), Some(last.as_slice()));
        prop_assert_eq!(k.value_size(), Some(last.len()));
    }
}
