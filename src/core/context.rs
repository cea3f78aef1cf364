//! Execution context: explicit directory roots for all path derivations.
//!
//! Every persistent file apimcli touches hangs off one of two roots: the
//! per-user config directory (environments, cached credentials, keystore
//! info) and the invocation working directory (emitted secret artifacts).
//! The context is built once at the CLI boundary and threaded through core
//! calls; nothing in `core` reads ambient process state.

use std::path::{Path, PathBuf};

use crate::core::constants;
use crate::error::Result;

/// Directory roots for one command invocation.
#[derive(Debug, Clone)]
pub struct Context {
    config_dir: PathBuf,
    working_dir: PathBuf,
}

impl Context {
    /// Context rooted at `~/.apimcli` and the process working directory.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "unable to determine home directory",
            )
        })?;
        Ok(Self {
            config_dir: home.join(constants::CONFIG_DIR),
            working_dir: std::env::current_dir()?,
        })
    }

    /// Context over explicit roots. Tests use this with temp directories.
    pub fn new(config_dir: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Environments config (`config.toml`).
    pub fn main_config_path(&self) -> PathBuf {
        self.config_dir.join(constants::MAIN_CONFIG_FILE)
    }

    /// Credential store (`keys.toml`).
    pub fn keys_path(&self) -> PathBuf {
        self.config_dir.join(constants::KEYS_FILE)
    }

    /// Security config directory (`mi-security`).
    pub fn security_config_dir(&self) -> PathBuf {
        self.config_dir.join(constants::SECURITY_CONFIG_DIR)
    }

    /// Keystore properties file (`mi-security/keystore-info.properties`).
    pub fn keystore_properties_path(&self) -> PathBuf {
        self.security_config_dir().join(constants::KEYSTORE_INFO_FILE)
    }

    /// Secret output directory (`security` under the working directory),
    /// created if absent.
    pub fn secret_output_dir(&self) -> Result<PathBuf> {
        let dir = self.working_dir.join(constants::SECRET_OUTPUT_DIR);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_hang_off_expected_roots() {
        let ctx = Context::new("/cfg", "/work");
        assert_eq!(ctx.main_config_path(), PathBuf::from("/cfg/config.toml"));
        assert_eq!(ctx.keys_path(), PathBuf::from("/cfg/keys.toml"));
        assert_eq!(
            ctx.keystore_properties_path(),
            PathBuf::from("/cfg/mi-security/keystore-info.properties")
        );
    }

    #[test]
    fn secret_output_dir_is_created() {
        let work = TempDir::new().unwrap();
        let ctx = Context::new("/cfg", work.path());

        let dir = ctx.secret_output_dir().unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir, work.path().join("security"));
    }
}
