//! Keystore access: extract the RSA encryption key from a PKCS#12 container.
//!
//! The keystore location, passwords, and key alias come from the
//! `keystore-info.properties` file; both passwords are base64-encoded at
//! rest. Only the public half of the key pair leaves this module: the
//! decrypting party holds the private key operationally, the local keystore
//! merely happens to contain both halves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use p12_keystore::{KeyStore, KeyStoreEntry};
use rsa::pkcs8::DecodePrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::context::Context;
use crate::core::properties;
use crate::error::{KeyStoreError, Result};

/// Keystore coordinates read from `keystore-info.properties`.
#[derive(Debug)]
pub struct KeyStoreConfig {
    pub location: PathBuf,
    pub store_password: Zeroizing<String>,
    pub key_alias: String,
    pub key_password: Zeroizing<String>,
}

impl KeyStoreConfig {
    /// Load and decode the keystore properties for this context.
    pub fn load(ctx: &Context) -> Result<Self> {
        let path = ctx.keystore_properties_path();
        debug!(path = %path.display(), "reading keystore properties");
        let props = properties::read(&path)?;

        Ok(Self {
            location: PathBuf::from(require(&props, constants::PROP_KEYSTORE_LOCATION)?),
            store_password: decode_password(&props, constants::PROP_KEYSTORE_PASSWORD)?,
            key_alias: require(&props, constants::PROP_KEY_ALIAS)?,
            key_password: decode_password(&props, constants::PROP_KEY_PASSWORD)?,
        })
    }
}

fn require(props: &BTreeMap<String, String>, key: &'static str) -> Result<String> {
    props
        .get(key)
        .cloned()
        .ok_or_else(|| KeyStoreError::MissingProperty(key).into())
}

fn decode_password(
    props: &BTreeMap<String, String>,
    key: &'static str,
) -> Result<Zeroizing<String>> {
    let encoded = require(props, key)?;
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|source| KeyStoreError::BadPropertyEncoding { key, source })?;
    Ok(Zeroizing::new(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Resolve the RSA public key used for secret encryption.
pub fn encryption_key(config: &KeyStoreConfig) -> Result<RsaPublicKey> {
    let private = private_key(
        &config.location,
        &config.store_password,
        &config.key_alias,
        &config.key_password,
    )?;
    Ok(private.to_public_key())
}

/// Open the keystore and extract the named RSA private-key entry.
pub fn private_key(
    path: &Path,
    store_password: &str,
    alias: &str,
    key_password: &str,
) -> Result<RsaPrivateKey> {
    if !path.exists() {
        return Err(KeyStoreError::NotFound(path.to_path_buf()).into());
    }

    let data = std::fs::read(path)?;
    let store = KeyStore::from_pkcs12(&data, store_password)
        .map_err(|e| KeyStoreError::Open(e.to_string()))?;

    let entry = store
        .entry(alias)
        .ok_or_else(|| KeyStoreError::NoSuchAlias(alias.to_string()))?;

    let chain = match entry {
        KeyStoreEntry::PrivateKeyChain(chain) => chain,
        _ => return Err(KeyStoreError::NotAPrivateKey(alias.to_string()).into()),
    };

    parse_rsa_key(chain.key(), key_password)
}

/// Parse a PKCS#8 blob into an RSA private key. Shrouded entries that keep
/// their own encryption layer are decrypted with the key password. Any
/// non-RSA key is a fatal configuration error.
pub fn parse_rsa_key(der: &[u8], key_password: &str) -> Result<RsaPrivateKey> {
    match RsaPrivateKey::from_pkcs8_der(der) {
        Ok(key) => Ok(key),
        Err(_) => RsaPrivateKey::from_pkcs8_encrypted_der(der, key_password.as_bytes())
            .map_err(|e| KeyStoreError::UnsupportedKey(e.to_string()).into()),
    }
}
