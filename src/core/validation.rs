//! Input validation for secret operations.

use std::collections::BTreeMap;

use crate::error::{Result, ValidationError};

/// Validate that every value in the mapping is non-empty after whitespace
/// trimming.
///
/// Runs before any cryptographic call; a single offending value aborts the
/// whole operation, and every offending key is named in the error.
///
/// # Errors
///
/// Returns `ValidationError::EmptySecretValues` listing each key whose
/// value is empty or whitespace-only.
pub fn ensure_non_empty_values(inputs: &BTreeMap<String, String>) -> Result<()> {
    let offending: Vec<String> = inputs
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key.clone())
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EmptySecretValues { keys: offending }.into())
    }
}
