//! Failed mutations leave the key untouched.

use crate::common::key;
use elektra::{CopyFlags, Key, KeyError, Limits, LockFlags, NameError, Namespace, ValueError};

fn snapshot(k: &Key) -> (String, Option<Vec<u8>>) {
    (k.name().to_string(), k.value().map(<[u8]>::to_vec))
}

#[test]
fn invalid_renames_keep_previous_name() {
    let mut k = key("user:/a/b");
    k.set_value(b"v").unwrap();
    let before = snapshot(&k);

    let attempts = [
        ("", NameError::Empty),
        ("usr:/x", NameError::InvalidNamespace("usr".to_string())),
        ("user:/x/../y", NameError::IllegalSegment("..".to_string())),
        ("user:/x/./y", NameError::IllegalSegment(".".to_string())),
    ];
    for (text, expected) in attempts {
        assert_eq!(k.set_name(text), Err(expected), "{text:?}");
        assert_eq!(snapshot(&k), before, "{text:?}");
    }
}

#[test]
fn malformed_escapes_are_rejected() {
    let mut k = key("user:/a");
    assert!(matches!(
        k.set_name(r"user:/a\x"),
        Err(NameError::IllegalSegment(_))
    ));
    assert!(matches!(
        k.add_segment(r"b\"),
        Err(NameError::IllegalSegment(_))
    ));
    assert_eq!(k.name(), "user:/a");
}

#[test]
fn failed_add_segment_keeps_partial_progress_invisible() {
    let mut k = key("user:/a");
    // "b" and "c" would be added before ".." fails above the root
    assert!(k.add_segment("b/c/../../../..").is_err());
    assert_eq!(k.name(), "user:/a");
}

#[test]
fn name_limit_applies_to_every_mutator() {
    let limits = Limits {
        max_name_bytes: 11,
        ..Limits::default()
    };
    let mut k = Key::builder("user:/abc").unwrap().limits(limits).build().unwrap();

    assert!(matches!(k.set_name("user:/abcdefgh"), Err(NameError::TooLong { .. })));
    assert!(matches!(k.add_segment("defgh"), Err(NameError::TooLong { .. })));
    assert!(matches!(k.add_base_segment("defgh"), Err(NameError::TooLong { .. })));
    assert!(matches!(k.set_base_segment("abcdefgh"), Err(NameError::TooLong { .. })));
    assert!(matches!(
        k.set_namespace(Namespace::Default),
        Err(NameError::TooLong { .. })
    ));
    assert_eq!(k.name(), "user:/abc");
}

#[test]
fn value_limit_keeps_previous_value() {
    let mut k = Key::builder("user:/a")
        .unwrap()
        .value(b"keep")
        .limits(Limits::with_small_limits())
        .build()
        .unwrap();
    k.clear_sync();

    let err = k.set_value(&[0u8; 32]).unwrap_err();
    assert_eq!(err, ValueError::TooLarge { actual: 32, max: 16 });
    assert_eq!(k.value(), Some(&b"keep"[..]));
    assert!(!k.needs_sync());
}

#[test]
fn limits_loaded_from_toml_are_enforced() {
    let limits = Limits::from_toml_str("max_value_bytes = 3").unwrap();
    let mut k = Key::builder("user:/a").unwrap().limits(limits).build().unwrap();
    assert_eq!(k.set_value(b"abc"), Ok(3));
    assert!(k.set_value(b"abcd").is_err());
    assert_eq!(k.value(), Some(&b"abc"[..]));
}

#[test]
fn deserialized_keys_respect_default_limits() {
    let json = format!(r#"{{"name":"user:/{}","value":null}}"#, "x".repeat(10_000));
    assert!(serde_json::from_str::<Key>(&json).is_err());

    let fits: Key = serde_json::from_str(r#"{"name":"user:/a","value":[1]}"#).unwrap();
    assert!(fits.name_size() <= fits.limits().max_name_bytes);
}

#[test]
fn locked_key_rejects_all_mutations() {
    let mut k = key("user:/a/b");
    k.set_value(b"v").unwrap();
    k.lock(LockFlags::ALL);
    let before = snapshot(&k);

    assert_eq!(k.set_name("user:/c"), Err(NameError::Locked));
    assert_eq!(k.add_segment("../c"), Err(NameError::Locked));
    assert_eq!(k.set_base_segment(""), Err(NameError::Locked));
    assert_eq!(k.set_value(b"w"), Err(ValueError::Locked));
    assert_eq!(k.clear_value(), Err(ValueError::Locked));
    assert!(matches!(
        k.copy_from(&key("system:/x"), CopyFlags::VALUE),
        Err(KeyError::Value(ValueError::Locked))
    ));
    assert_eq!(snapshot(&k), before);
}

#[test]
fn failed_copy_changes_neither_part() {
    let limits = Limits {
        max_name_bytes: 11,
        ..Limits::default()
    };
    let mut k = Key::builder("user:/a").unwrap().value(b"keep").limits(limits).build().unwrap();
    let before = snapshot(&k);

    let source = Key::builder("system:/too/long").unwrap().value(b"new").build().unwrap();
    let err = k.copy_from(&source, CopyFlags::ALL).unwrap_err();
    assert_eq!(err.reason_code(), "name_too_long");
    assert_eq!(snapshot(&k), before);
}
