//! Walkthrough of a single key's life: create, compare, extend, rename,
//! set values, destroy.

use crate::common::key;
use elektra::{NameError, Namespace};

#[test]
fn create_key_with_user_name() {
    let key1 = key("user:/test/qwe/asd");
    assert_eq!(key1.name(), "user:/test/qwe/asd");
}

#[test]
fn second_key_is_below_first() {
    let key1 = key("user:/test/qwe/asd");
    let key2 = key("user:/test/qwe/asd/qwe");
    assert!(key2.is_below(&key1));
    assert!(!key1.is_below(&key2));
}

#[test]
fn add_segment_extends_name() {
    let mut key1 = key("user:/test/qwe/asd");
    key1.add_segment("yyyyyyy").unwrap();
    assert_eq!(key1.name(), "user:/test/qwe/asd/yyyyyyy");
}

#[test]
fn rename_into_system_namespace() {
    let mut key1 = key("user:/test/qwe/asd");
    key1.add_segment("yyyyyyy").unwrap();
    key1.set_name("system:/asd/qwe/asd").unwrap();
    assert_eq!(key1.name(), "system:/asd/qwe/asd");
    assert_eq!(key1.namespace(), Namespace::System);
    assert_eq!(key1.base_segment(), "asd");
    assert_eq!(key1.base_segment_size(), 3);
}

#[test]
fn overwrite_value_of_same_length() {
    let mut key1 = key("system:/asd/qwe/asd");
    assert_eq!(key1.set_value(b"abc\0"), Ok(4));
    assert_eq!(key1.value(), Some(&b"abc\0"[..]));
    assert_eq!(key1.value_size(), Some(4));

    assert_eq!(key1.set_value(b"abcd"), Ok(4));
    assert_eq!(key1.value(), Some(&b"abcd"[..]));
    assert_eq!(key1.value_size(), Some(4));
}

/// Clearing the base segment removes one level; the name always changes.
#[test]
fn empty_base_segment_pops_one_level() {
    let mut key1 = key("system:/asd/qwe/asd");
    let before = key1.name().to_string();

    key1.set_base_segment("").unwrap();

    assert_ne!(key1.name(), before);
    assert_eq!(key1.name(), "system:/asd/qwe");
    assert_eq!(key1.base_segment(), "qwe");
}

#[test]
fn empty_base_segment_on_root_is_rejected() {
    let mut root = key("system:/");
    assert_eq!(
        root.set_base_segment(""),
        Err(NameError::IllegalSegment(String::new()))
    );
    assert_eq!(root.name(), "system:/");
}

#[test]
fn bare_name_becomes_cascading() {
    let mut k = key("testqq");
    assert_eq!(k.name(), "/testqq");
    assert_eq!(k.namespace(), Namespace::Cascading);

    k.set_name("qweqwe").unwrap();
    assert_eq!(k.name(), "/qweqwe");
    k.destroy();
}

#[test]
fn full_walkthrough() {
    let mut key1 = key("user:/test/qwe/asd");
    let key2 = key("user:/test/qwe/asd/qwe");
    assert!(key2.is_below(&key1));

    key1.add_segment("yyyyyyy").unwrap();
    assert!(!key2.is_below(&key1));

    key1.set_name("system:/asd/qwe/asd").unwrap();
    key1.set_value(b"abc\0").unwrap();
    key1.set_value(b"abcd").unwrap();

    key1.set_base_segment("").unwrap();
    assert_eq!(key1.name(), "system:/asd/qwe");
    assert_eq!(key1.value(), Some(&b"abcd"[..]));

    key2.destroy();
    key1.destroy();
}
