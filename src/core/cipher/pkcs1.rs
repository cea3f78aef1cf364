//! PKCS#1 v1.5 encryption.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

use super::AsymmetricCipher;
use crate::core::constants;
use crate::error::{CryptoError, Result};

/// RSA encryption with randomized PKCS#1 v1.5 padding.
pub struct Pkcs1v15;

impl AsymmetricCipher for Pkcs1v15 {
    fn encrypt(&self, key: &RsaPublicKey, plaintext: &str) -> Result<String> {
        let ciphertext = key
            .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, plaintext.as_bytes())
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
        Ok(BASE64.encode(ciphertext))
    }

    fn name(&self) -> &'static str {
        constants::ALGORITHM_PKCS1
    }
}
