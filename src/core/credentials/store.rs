//! Per-environment credential records.
//!
//! `keys.toml` holds one record per environment: the OAuth client id, the
//! client secret (encrypted at rest), and the account username. Records are
//! replaced whole, never partially updated. The backing file is
//! single-writer; concurrent invocations race with last-writer-wins.

use std::collections::BTreeMap;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::context::Context;
use crate::error::{CredentialError, Result};

type Aes256Ctr = Ctr128BE<Aes256>;

const IV_LEN: usize = 16;

/// Cached credentials for one environment.
///
/// `client_secret` is AES-256-CTR ciphertext under a key derived from the
/// account password, base64-encoded with the IV prepended. Neither the
/// password nor the derived key is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvKeys {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct KeysFile {
    #[serde(default)]
    environments: BTreeMap<String, EnvKeys>,
}

/// The on-disk credential store.
pub struct CredentialStore<'a> {
    ctx: &'a Context,
}

impl<'a> CredentialStore<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    fn load(&self) -> Result<KeysFile> {
        let path = self.ctx.keys_path();
        if !path.exists() {
            return Ok(KeysFile::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn save(&self, file: &KeysFile) -> Result<()> {
        std::fs::create_dir_all(self.ctx.config_dir())?;
        let contents = toml::to_string_pretty(file)?;
        std::fs::write(self.ctx.keys_path(), contents)?;
        Ok(())
    }

    /// Whether a record exists for the environment.
    pub fn exists(&self, environment: &str) -> Result<bool> {
        Ok(self.load()?.environments.contains_key(environment))
    }

    /// Fetch the record for an environment.
    pub fn get(&self, environment: &str) -> Result<EnvKeys> {
        self.load()?
            .environments
            .remove(environment)
            .ok_or_else(|| CredentialError::NotFound(environment.to_string()).into())
    }

    /// Insert or replace the record for an environment.
    pub fn put(&self, environment: &str, keys: EnvKeys) -> Result<()> {
        let mut file = self.load()?;
        debug!(environment, "persisting credential record");
        file.environments.insert(environment.to_string(), keys);
        self.save(&file)
    }

    /// Remove the record for an environment. Returns whether one existed.
    pub fn remove(&self, environment: &str) -> Result<bool> {
        let mut file = self.load()?;
        let removed = file.environments.remove(environment).is_some();
        if removed {
            self.save(&file)?;
        }
        Ok(removed)
    }
}

/// Encrypt a client secret under a key derived from the account password.
///
/// Key is `SHA-256(password)`; a random IV is prepended to the ciphertext
/// and the whole buffer base64-encoded.
pub fn encrypt_client_secret(password: &str, client_secret: &str) -> String {
    let key = Sha256::digest(password.as_bytes());

    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    let mut buf = client_secret.as_bytes().to_vec();
    let mut cipher = Aes256Ctr::new(&key, &iv.into());
    cipher.apply_keystream(&mut buf);

    let mut out = Vec::with_capacity(IV_LEN + buf.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&buf);
    BASE64.encode(out)
}

/// Decrypt a stored client secret with a freshly supplied password.
///
/// The construction is not authenticated: a wrong password yields garbage
/// plaintext rather than an error here, and is detected only when the
/// authorization server rejects the resulting token request.
pub fn decrypt_client_secret(
    environment: &str,
    password: &str,
    encrypted: &str,
) -> Result<String> {
    let data = BASE64
        .decode(encrypted)
        .map_err(|_| CredentialError::CorruptRecord(environment.to_string()))?;
    if data.len() < IV_LEN {
        return Err(CredentialError::CorruptRecord(environment.to_string()).into());
    }

    let key = Sha256::digest(password.as_bytes());
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&data[..IV_LEN]);

    let mut buf = data[IV_LEN..].to_vec();
    let mut cipher = Aes256Ctr::new(&key, &iv.into());
    cipher.apply_keystream(&mut buf);

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(user: &str) -> EnvKeys {
        EnvKeys {
            client_id: "client-id-1".to_string(),
            client_secret: encrypt_client_secret("pass", "client-secret-1"),
            username: user.to_string(),
        }
    }

    #[test]
    fn put_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path(), dir.path());
        let store = CredentialStore::new(&ctx);

        assert!(!store.exists("dev").unwrap());
        store.put("dev", record("admin")).unwrap();
        assert!(store.exists("dev").unwrap());

        let loaded = store.get("dev").unwrap();
        assert_eq!(loaded.username, "admin");
        assert_eq!(loaded.client_id, "client-id-1");
    }

    #[test]
    fn put_replaces_whole_record() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path(), dir.path());
        let store = CredentialStore::new(&ctx);

        store.put("dev", record("admin")).unwrap();
        store.put("dev", record("operator")).unwrap();

        assert_eq!(store.get("dev").unwrap().username, "operator");
    }

    #[test]
    fn remove_deletes_only_the_named_environment() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path(), dir.path());
        let store = CredentialStore::new(&ctx);

        store.put("dev", record("admin")).unwrap();
        store.put("prod", record("admin")).unwrap();

        assert!(store.remove("dev").unwrap());
        assert!(!store.remove("dev").unwrap());
        assert!(store.exists("prod").unwrap());
    }

    #[test]
    fn missing_record_is_not_found() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path(), dir.path());
        let store = CredentialStore::new(&ctx);

        assert!(store.get("dev").is_err());
    }

    #[test]
    fn secret_roundtrip_with_correct_password() {
        let encrypted = encrypt_client_secret("hunter2", "the-client-secret");
        let decrypted = decrypt_client_secret("dev", "hunter2", &encrypted).unwrap();
        assert_eq!(decrypted, "the-client-secret");
    }

    #[test]
    fn wrong_password_yields_garbage_not_error() {
        let encrypted = encrypt_client_secret("hunter2", "the-client-secret");
        let decrypted = decrypt_client_secret("dev", "wrong", &encrypted).unwrap();
        assert_ne!(decrypted, "the-client-secret");
    }

    #[test]
    fn random_iv_makes_ciphertexts_differ() {
        let a = encrypt_client_secret("pass", "secret");
        let b = encrypt_client_secret("pass", "secret");
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_ciphertext_is_rejected() {
        assert!(decrypt_client_secret("dev", "pass", "not base64!").is_err());
        assert!(decrypt_client_secret("dev", "pass", "c2hvcnQ=").is_err());
    }
}
