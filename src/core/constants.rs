//! Constants used throughout apimcli.
//!
//! Centralizes magic strings and fixed protocol values.

/// Config directory relative to HOME (~/.apimcli).
pub const CONFIG_DIR: &str = ".apimcli";

/// Environments config file name inside the config directory.
pub const MAIN_CONFIG_FILE: &str = "config.toml";

/// Credential store file name inside the config directory.
pub const KEYS_FILE: &str = "keys.toml";

/// Security subdirectory of the config directory holding keystore info.
pub const SECURITY_CONFIG_DIR: &str = "mi-security";

/// Keystore properties file name inside the security config directory.
pub const KEYSTORE_INFO_FILE: &str = "keystore-info.properties";

/// Output subdirectory of the working directory for emitted secrets.
pub const SECRET_OUTPUT_DIR: &str = "security";

/// Emitted properties file name.
pub const SECRET_PROPERTIES_FILE: &str = "wso2mi-secrets.properties";

/// Emitted Kubernetes Secret manifest file name.
pub const SECRET_MANIFEST_FILE: &str = "wso2mi-secrets.yaml";

/// Default name for the emitted Kubernetes Secret.
pub const SECRET_MANIFEST_NAME: &str = "wso2misecret";

/// Default namespace for the emitted Kubernetes Secret.
pub const SECRET_MANIFEST_NAMESPACE: &str = "default";

/// Keystore properties keys. Passwords are base64-encoded at rest.
pub const PROP_KEYSTORE_LOCATION: &str = "secret.keystore.location";
pub const PROP_KEYSTORE_PASSWORD: &str = "secret.keystore.password";
pub const PROP_KEY_ALIAS: &str = "secret.keystore.key.alias";
pub const PROP_KEY_PASSWORD: &str = "secret.keystore.key.password";

/// Algorithm label selecting PKCS#1 v1.5 padding (case-insensitive).
pub const ALGORITHM_PKCS1: &str = "RSA/ECB/PKCS1Padding";

/// Algorithm label selecting OAEP padding (case-insensitive). Unrecognized
/// labels also select OAEP.
pub const ALGORITHM_OAEP: &str = "RSA/ECB/OAEPWithSHA1AndMGF1Padding";

/// Fixed application descriptor sent with dynamic client registration.
pub const REGISTRATION_CLIENT_NAME: &str = "rest_api_publisher";
pub const REGISTRATION_CALLBACK_URL: &str = "www.google.lk";
pub const REGISTRATION_GRANT_TYPE: &str = "password refresh_token";
pub const REGISTRATION_OWNER: &str = "admin";
pub const REGISTRATION_TOKEN_SCOPE: &str = "Production";

/// Requested token validity period, seconds.
pub const TOKEN_VALIDITY_PERIOD: &str = "3600";

/// Scope requested with the password grant.
pub const TOKEN_SCOPE: &str = "apim:api_view";
