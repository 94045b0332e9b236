//! Shared test utilities for all integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use elektra::{Key, KeyName, Namespace};

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once so `RUST_LOG=trace` shows key
/// mutations in failing tests.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
            )
            .try_init();
    });
}

/// Create a key, panicking on an invalid name.
pub fn key(name: &str) -> Key {
    init_tracing();
    Key::new(name).unwrap_or_else(|e| panic!("invalid test key {name:?}: {e}"))
}

/// Every namespace tag that can be written in front of a path.
pub fn tagged_namespaces() -> impl Iterator<Item = Namespace> {
    Namespace::ALL
        .into_iter()
        .filter(|ns| *ns != Namespace::Cascading)
}
