//! Environments configuration.
//!
//! Reads the `config.toml` table of named deployment targets. Environments
//! are created and edited by the operator; this core only loads and looks
//! them up.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::context::Context;
use crate::error::{ConfigError, CredentialError, Result};

/// A named deployment target and its three endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Management-API endpoint commands run against.
    pub api_manager_endpoint: String,
    /// Dynamic client registration endpoint.
    pub registration_endpoint: String,
    /// OAuth token endpoint.
    pub token_endpoint: String,
}

/// The environments config, keyed by environment name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MainConfig {
    #[serde(default)]
    pub environments: BTreeMap<String, Environment>,
}

impl MainConfig {
    /// Load the environments config from the context's config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if the file does not exist.
    pub fn load(ctx: &Context) -> Result<Self> {
        let path = ctx.main_config_path();
        debug!(path = %path.display(), "loading environments config");

        if !path.exists() {
            return Err(ConfigError::NotConfigured(path).into());
        }
        let contents = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&contents)?;

        debug!(environments = config.environments.len(), "config loaded");
        Ok(config)
    }

    /// Persist the config. Used by tests and setup tooling; the credential
    /// core never writes environments.
    pub fn save(&self, ctx: &Context) -> Result<()> {
        std::fs::create_dir_all(ctx.config_dir())?;
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(ctx.main_config_path(), contents)?;
        Ok(())
    }

    /// Look up an environment by name.
    ///
    /// # Errors
    ///
    /// `CredentialError::NoEnvironment` for an empty name,
    /// `CredentialError::UnknownEnvironment` for an unconfigured one.
    pub fn environment(&self, name: &str) -> Result<&Environment> {
        if let Some(env) = self.environments.get(name) {
            return Ok(env);
        }
        if name.is_empty() {
            return Err(CredentialError::NoEnvironment.into());
        }
        Err(CredentialError::UnknownEnvironment(name.to_string()).into())
    }
}
