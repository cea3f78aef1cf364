//! RSA secret encryption.
//!
//! Two padding schemes sit behind one [`AsymmetricCipher`] capability and
//! are selected once, at configuration time, from the algorithm label of
//! the invocation. Ciphertext is always base64. There is no chunking: a
//! plaintext exceeding the key's single-block capacity fails the operation.

mod oaep;
mod pkcs1;

use rsa::RsaPublicKey;

use crate::core::constants;
use crate::error::Result;

pub use oaep::OaepSha1;
pub use pkcs1::Pkcs1v15;

/// One-way RSA encryption under a chosen padding scheme.
pub trait AsymmetricCipher {
    /// Encrypt `plaintext` under `key`, returning base64 ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EncryptionFailed` on padding failure or when
    /// the plaintext exceeds the key's capacity for this scheme.
    fn encrypt(&self, key: &RsaPublicKey, plaintext: &str) -> Result<String>;

    /// Scheme label for display.
    fn name(&self) -> &'static str;
}

/// Whether the label selects PKCS#1 v1.5 padding (case-insensitive).
pub fn is_pkcs1(algorithm: &str) -> bool {
    algorithm.eq_ignore_ascii_case(constants::ALGORITHM_PKCS1)
}

/// Whether the label selects OAEP padding (case-insensitive).
pub fn is_oaep(algorithm: &str) -> bool {
    algorithm.eq_ignore_ascii_case(constants::ALGORITHM_OAEP)
}

/// Select the cipher for an algorithm label. Unrecognized labels select the
/// OAEP variant.
pub fn for_algorithm(algorithm: &str) -> Box<dyn AsymmetricCipher> {
    if is_pkcs1(algorithm) {
        Box::new(Pkcs1v15)
    } else {
        Box::new(OaepSha1)
    }
}
