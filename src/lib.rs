//! apimcli - command-line client for WSO2 API Manager environments.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── envs          # List configured environments
//! │   ├── token         # Resolve credentials, obtain an access token
//! │   ├── reset_user    # Clear cached credentials for an environment
//! │   ├── secret        # Keystore setup and secret encryption
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── context       # Explicit config-dir / working-dir context
//!     ├── config        # Environments config (config.toml)
//!     ├── credentials/  # Credential store and resolver state machine
//!     ├── oauth         # Dynamic client registration + password grant
//!     ├── keystore      # PKCS#12 keystore → RSA encryption key
//!     ├── cipher/       # RSA padding strategies (PKCS1v15, OAEP)
//!     ├── secrets/      # Secret encryption pipeline (source → sink)
//!     ├── properties    # Flat .properties file parsing
//!     └── validation    # Shared input validation
//! ```
//!
//! # Features
//!
//! - Per-environment credential caching with OAuth dynamic client
//!   registration and password-grant token acquisition
//! - Client secrets encrypted at rest under a password-derived key
//! - Secret encryption against a keystore-held RSA key pair, emitted to
//!   console, properties file, or Kubernetes Secret manifest

pub mod cli;
pub mod core;
pub mod error;
