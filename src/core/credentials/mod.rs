//! Credential resolution for environment-scoped commands.
//!
//! Every command that talks to a management API starts here: given an
//! environment name and optional flag-supplied username/password, decide
//! what credentials to use, whether to prompt, and whether a flag username
//! that contradicts the cached one must abort the operation.
//!
//! Two modes share the resolution logic. Basic mode returns a base64
//! `username:password` credential; OAuth mode additionally performs dynamic
//! client registration on first use of an environment (persisting the
//! resulting client id/secret) and a password-grant exchange for a bearer
//! token.

pub mod store;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::config::MainConfig;
use crate::core::context::Context;
use crate::core::oauth::{base64_encoded_credentials, OAuthClient, Transport};
use crate::error::{CredentialError, Result};
use store::{decrypt_client_secret, encrypt_client_secret, CredentialStore, EnvKeys};

/// Interactive credential input.
///
/// The implementations block on the controlling terminal; tests substitute
/// a scripted prompt. There is no non-interactive fallback; a human
/// operator is assumed.
pub trait Prompt {
    fn username(&self) -> Result<String>;
    /// Masked password read. `username` is echoed first so the operator
    /// knows which account the password is for.
    fn password(&self, username: &str) -> Result<String>;
}

/// Flag-supplied credentials, possibly absent.
#[derive(Debug, Default, Clone)]
pub struct FlagCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Outcome of basic-mode resolution.
#[derive(Debug)]
pub struct BasicAuth {
    /// `base64(username:password)` ready for an Authorization header.
    pub credentials_b64: String,
    /// Management-API endpoint of the resolved environment.
    pub api_manager_endpoint: String,
}

/// Outcome of OAuth-mode resolution.
#[derive(Debug)]
pub struct OAuth {
    pub access_token: String,
    pub api_manager_endpoint: String,
}

/// Resolved account identity, before mode-specific finishing.
struct Account {
    username: String,
    password: Zeroizing<String>,
    cached: Option<EnvKeys>,
}

/// The credential resolver state machine.
pub struct CredentialResolver<'a, P: Prompt> {
    ctx: &'a Context,
    config: &'a MainConfig,
    prompt: &'a P,
}

impl<'a, P: Prompt> CredentialResolver<'a, P> {
    pub fn new(ctx: &'a Context, config: &'a MainConfig, prompt: &'a P) -> Self {
        Self { ctx, config, prompt }
    }

    /// Resolve credentials for direct basic authentication.
    pub fn resolve_basic(&self, environment: &str, flags: &FlagCredentials) -> Result<BasicAuth> {
        let env = self.config.environment(environment)?;
        info!(environment, "resolving basic credentials");

        let account = self.resolve_account(environment, flags)?;
        Ok(BasicAuth {
            credentials_b64: base64_encoded_credentials(&account.username, &account.password),
            api_manager_endpoint: env.api_manager_endpoint.clone(),
        })
    }

    /// Resolve credentials and obtain an OAuth access token.
    ///
    /// On first use of an environment this registers a client application
    /// and persists the record; later invocations reuse the cached client
    /// id and decrypt the cached client secret with the freshly supplied
    /// password. A wrong password yields garbage plaintext there, which
    /// surfaces as the authorization server rejecting the token request.
    pub fn resolve_oauth<T: Transport>(
        &self,
        environment: &str,
        flags: &FlagCredentials,
        transport: &T,
    ) -> Result<OAuth> {
        let env = self.config.environment(environment)?;
        info!(environment, "resolving OAuth credentials");

        let account = self.resolve_account(environment, flags)?;
        let oauth = OAuthClient::new(transport);

        let (client_id, client_secret) = match &account.cached {
            Some(keys) => {
                debug!(client_id = %keys.client_id, "reusing registered client");
                let secret = Zeroizing::new(decrypt_client_secret(
                    environment,
                    &account.password,
                    &keys.client_secret,
                )?);
                (keys.client_id.clone(), secret)
            }
            None => {
                let (client_id, client_secret) = oauth.register(
                    &account.username,
                    &account.password,
                    &env.registration_endpoint,
                )?;
                debug!(client_id, "registered new client");

                let store = CredentialStore::new(self.ctx);
                store.put(
                    environment,
                    EnvKeys {
                        client_id: client_id.clone(),
                        client_secret: encrypt_client_secret(&account.password, &client_secret),
                        username: account.username.clone(),
                    },
                )?;
                (client_id, Zeroizing::new(client_secret))
            }
        };

        let access_token = oauth.exchange(
            &account.username,
            &account.password,
            &base64_encoded_credentials(&client_id, &client_secret),
            &env.token_endpoint,
        )?;

        Ok(OAuth {
            access_token,
            api_manager_endpoint: env.api_manager_endpoint.clone(),
        })
    }

    /// Shared resolution: decide username and password from the cached
    /// record, the flags, and the interactive prompt.
    fn resolve_account(&self, environment: &str, flags: &FlagCredentials) -> Result<Account> {
        let store = CredentialStore::new(self.ctx);

        if store.exists(environment)? {
            let keys = store.get(environment)?;

            if let Some(flag_username) = flags.username.as_deref() {
                if flag_username != keys.username {
                    // Deliberate guard: never silently authenticate as a
                    // different identity than the cached one.
                    return Err(CredentialError::Mismatch {
                        environment: environment.to_string(),
                        cached: keys.username,
                    }
                    .into());
                }
            }

            // The record never holds a recoverable password, so it is
            // re-supplied on every invocation.
            let password = match flags.password.clone() {
                Some(p) => Zeroizing::new(p),
                None => Zeroizing::new(self.prompt.password(&keys.username)?),
            };

            Ok(Account {
                username: keys.username.clone(),
                password,
                cached: Some(keys),
            })
        } else {
            // First use of this environment.
            let username = match flags.username.clone() {
                Some(u) => u,
                None => self.prompt.username()?.trim().to_string(),
            };
            let password = match flags.password.clone() {
                Some(p) => Zeroizing::new(p),
                None => Zeroizing::new(self.prompt.password(&username)?),
            };

            Ok(Account {
                username,
                password,
                cached: None,
            })
        }
    }
}
