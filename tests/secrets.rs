//! Secret encryption pipeline tests against an in-memory RSA key.

use std::collections::BTreeMap;

use apimcli::core::secrets::{self, source, InputKind};
use apimcli::core::validation;
use apimcli::error::{Error, ValidationError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use tempfile::TempDir;

fn keypair() -> (RsaPrivateKey, RsaPublicKey) {
    let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
    let public = private.to_public_key();
    (private, public)
}

fn secret_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn oaep_roundtrip() {
    let (private, public) = keypair();
    let plaintexts = secret_map(&[("db", "s3cr3t")]);

    let encrypted =
        secrets::encrypt_all(&public, "RSA/ECB/OAEPWithSHA1AndMGF1Padding", &plaintexts).unwrap();

    let ciphertext = BASE64.decode(&encrypted["db"]).unwrap();
    let decrypted = private.decrypt(Oaep::new::<Sha1>(), &ciphertext).unwrap();
    assert_eq!(decrypted, b"s3cr3t");
}

#[test]
fn pkcs1_roundtrip_with_case_insensitive_label() {
    let (private, public) = keypair();
    let plaintexts = secret_map(&[("db", "s3cr3t")]);

    // lower-case label selects the same scheme
    let encrypted = secrets::encrypt_all(&public, "rsa/ecb/pkcs1padding", &plaintexts).unwrap();

    let ciphertext = BASE64.decode(&encrypted["db"]).unwrap();
    let decrypted = private.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap();
    assert_eq!(decrypted, b"s3cr3t");
}

#[test]
fn repeated_encryption_randomizes_ciphertext() {
    let (private, public) = keypair();
    let plaintexts = secret_map(&[("db", "same-plaintext")]);

    for label in ["RSA/ECB/OAEPWithSHA1AndMGF1Padding", "RSA/ECB/PKCS1Padding"] {
        let first = secrets::encrypt_all(&public, label, &plaintexts).unwrap();
        let second = secrets::encrypt_all(&public, label, &plaintexts).unwrap();
        assert_ne!(first["db"], second["db"], "label {label}");

        // both still decrypt to the original
        for encrypted in [&first, &second] {
            let ciphertext = BASE64.decode(&encrypted["db"]).unwrap();
            let decrypted = if label.contains("PKCS1") {
                private.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap()
            } else {
                private.decrypt(Oaep::new::<Sha1>(), &ciphertext).unwrap()
            };
            assert_eq!(decrypted, b"same-plaintext");
        }
    }
}

#[test]
fn oversize_plaintext_is_a_fatal_encryption_error() {
    let (_, public) = keypair();
    // 2048-bit key: single-block capacity is well under 300 bytes for
    // either scheme
    let plaintexts = secret_map(&[("big", &"x".repeat(300))]);

    let err = secrets::encrypt_all(&public, "RSA/ECB/PKCS1Padding", &plaintexts).unwrap_err();
    assert!(matches!(err, Error::Crypto(_)));
}

#[test]
fn empty_values_are_rejected_before_encryption() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secrets.properties");
    std::fs::write(&path, "good=value\nempty=\nblank=   \n").unwrap();

    let plaintexts = source::collect(&InputKind::File(path)).unwrap();
    let err = validation::ensure_non_empty_values(&plaintexts).unwrap_err();

    let Error::Validation(ValidationError::EmptySecretValues { keys }) = err else {
        panic!("expected validation error");
    };
    assert_eq!(keys, vec!["blank".to_string(), "empty".to_string()]);
}

#[test]
fn bulk_file_last_write_wins_end_to_end() {
    let (private, public) = keypair();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secrets.properties");
    std::fs::write(&path, "alias=first\nalias=second\n").unwrap();

    let plaintexts = source::collect(&InputKind::File(path)).unwrap();
    let encrypted =
        secrets::encrypt_all(&public, "RSA/ECB/OAEPWithSHA1AndMGF1Padding", &plaintexts).unwrap();

    let ciphertext = BASE64.decode(&encrypted["alias"]).unwrap();
    let decrypted = private.decrypt(Oaep::new::<Sha1>(), &ciphertext).unwrap();
    assert_eq!(decrypted, b"second");
}
