//! Flat `.properties` file parsing and writing.
//!
//! Supports the subset the keystore-info and secret-input files use:
//! `key=value` or `key:value` pairs, one per line, `#`/`!` comments.
//! Duplicate keys: last write wins. Writes are deterministic (sorted keys).

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// Parse a properties file into a key-value map.
pub fn read(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse(&contents))
}

/// Parse properties file contents. Lines without a separator are skipped.
pub fn parse(contents: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let split = line
            .find(['=', ':'])
            .map(|idx| (&line[..idx], &line[idx + 1..]));
        if let Some((key, value)) = split {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    map
}

/// Write a map as `key=value` lines.
pub fn write(path: &Path, map: &BTreeMap<String, String>) -> Result<()> {
    let mut output = String::new();
    for (key, value) in map {
        output.push_str(key);
        output.push('=');
        output.push_str(value);
        output.push('\n');
    }
    std::fs::write(path, output)?;
    Ok(())
}
