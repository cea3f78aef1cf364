//! Error types for apimcli operations.
//!
//! Library code never terminates the process: every failure is a typed
//! error that propagates to `main`, which alone decides exit behavior.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error wrapping the per-domain taxonomies.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Environment configuration errors (`config.toml`).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no environments configured: create {0}")]
    NotConfigured(PathBuf),
}

/// Credential resolution and storage errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(
        "no environment specified: use the -e flag or configure an environment named 'default'"
    )]
    NoEnvironment,

    #[error("details incorrect/unavailable for environment '{0}' in the environments config")]
    UnknownEnvironment(String),

    #[error(
        "username entered with flag -u for environment '{environment}' does not match \
         the username '{cached}' found in the credential store"
    )]
    Mismatch { environment: String, cached: String },

    #[error("no credentials stored for environment '{0}'")]
    NotFound(String),

    #[error("stored client secret for environment '{0}' is malformed")]
    CorruptRecord(String),
}

/// Authorization-server errors. None of these are retried: repeated
/// wrong-credential submissions risk account lockout.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("incorrect username/password combination (401 Unauthorized)")]
    AuthenticationFailed,

    #[error("client registration request did not respond 200 OK: status {status}")]
    RegistrationFailed { status: u16 },

    #[error("token request did not respond 200 OK: status {status}")]
    TokenRequestFailed { status: u16 },

    #[error("malformed response from authorization server: {0}")]
    MalformedResponse(String),

    #[error("unable to connect to authorization server: {0}")]
    Connection(String),
}

/// Keystore container and key-entry errors.
#[derive(Error, Debug)]
pub enum KeyStoreError {
    #[error("keystore not found: {0}")]
    NotFound(PathBuf),

    #[error("unable to open keystore (wrong password or corrupt file): {0}")]
    Open(String),

    #[error("no key entry with alias '{0}' in keystore")]
    NoSuchAlias(String),

    #[error("keystore entry '{0}' is not a private key")]
    NotAPrivateKey(String),

    #[error("unsupported key entry (expected an RSA private key): {0}")]
    UnsupportedKey(String),

    #[error("keystore properties file is missing key '{0}'")]
    MissingProperty(&'static str),

    #[error("keystore property '{key}' is not valid base64: {source}")]
    BadPropertyEncoding {
        key: &'static str,
        source: base64::DecodeError,
    },
}

/// Cryptographic operation errors.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Covers padding failures and plaintexts exceeding the key's
    /// single-block capacity; there is no chunking.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Input validation errors, detected before any cryptographic or network
/// call runs.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid input for {}: secret values must be non-empty", keys.join(", "))]
    EmptySecretValues { keys: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
