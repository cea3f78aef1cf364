//! Plaintext secret collection.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::properties;
use crate::error::Result;

/// Where the plaintext secrets come from.
#[derive(Debug, Clone)]
pub enum InputKind {
    /// Bulk key-value properties file. Duplicate keys: last write wins.
    File(PathBuf),
    /// A single alias/value pair supplied with the invocation.
    Inline { alias: String, value: String },
}

/// Gather the alias → plaintext mapping for one invocation.
///
/// Non-emptiness is NOT validated here; the caller applies the shared
/// validator before any cryptographic operation.
pub fn collect(input: &InputKind) -> Result<BTreeMap<String, String>> {
    match input {
        InputKind::File(path) => properties::read(path),
        InputKind::Inline { alias, value } => {
            let mut map = BTreeMap::new();
            map.insert(alias.clone(), value.clone());
            Ok(map)
        }
    }
}
