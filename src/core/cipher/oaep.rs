//! OAEP encryption with SHA-1 digest and SHA-1 MGF1, no label.
//!
//! SHA-1 here is an interoperability requirement of the decrypting
//! deployment, not a local choice.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::{Oaep, RsaPublicKey};
use sha1::Sha1;

use super::AsymmetricCipher;
use crate::core::constants;
use crate::error::{CryptoError, Result};

/// RSA-OAEP with SHA-1 as both hash and MGF1 hash.
pub struct OaepSha1;

impl AsymmetricCipher for OaepSha1 {
    fn encrypt(&self, key: &RsaPublicKey, plaintext: &str) -> Result<String> {
        let padding = Oaep::new::<Sha1>();
        let ciphertext = key
            .encrypt(&mut rand::thread_rng(), padding, plaintext.as_bytes())
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
        Ok(BASE64.encode(ciphertext))
    }

    fn name(&self) -> &'static str {
        constants::ALGORITHM_OAEP
    }
}
