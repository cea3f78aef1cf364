//! Secret encryption pipeline.
//!
//! keystore properties → RSA public key → plaintext collection →
//! validation → encryption → emission. The pipeline is independent of the
//! OAuth path; it touches only the keystore and the chosen output.

pub mod sink;
pub mod source;

use std::collections::BTreeMap;
use std::path::PathBuf;

use rsa::RsaPublicKey;
use tracing::debug;

use crate::core::cipher;
use crate::core::context::Context;
use crate::core::keystore::{self, KeyStoreConfig};
use crate::core::validation;
use crate::error::Result;

pub use sink::{Emission, OutputKind};
pub use source::InputKind;

/// Transient configuration for one encryption invocation.
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub output: OutputKind,
    pub algorithm: String,
    pub input: InputKind,
}

/// Run the full pipeline for one invocation.
pub fn encrypt_secrets(ctx: &Context, config: &SecretConfig) -> Result<Emission> {
    let keystore_config = KeyStoreConfig::load(ctx)?;
    let key = keystore::encryption_key(&keystore_config)?;

    let plaintexts = source::collect(&config.input)?;
    validation::ensure_non_empty_values(&plaintexts)?;

    let encrypted = encrypt_all(&key, &config.algorithm, &plaintexts)?;
    sink::emit(ctx, &encrypted, config.output)
}

/// Encrypt every value of the mapping under the labeled scheme.
///
/// Separated from keystore loading so the cryptographic stage is testable
/// against an in-memory key.
pub fn encrypt_all(
    key: &RsaPublicKey,
    algorithm: &str,
    plaintexts: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let scheme = cipher::for_algorithm(algorithm);
    debug!(scheme = scheme.name(), count = plaintexts.len(), "encrypting secrets");

    let mut encrypted = BTreeMap::new();
    for (alias, plaintext) in plaintexts {
        encrypted.insert(alias.clone(), scheme.encrypt(key, plaintext)?);
    }
    Ok(encrypted)
}

/// Path helper for emitted artifacts.
pub(crate) fn output_path(ctx: &Context, file_name: &str) -> Result<PathBuf> {
    Ok(ctx.secret_output_dir()?.join(file_name))
}
