//! Token command - resolve credentials and obtain an access token.

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompt;
use crate::core::config::MainConfig;
use crate::core::context::Context;
use crate::core::credentials::{CredentialResolver, FlagCredentials};
use crate::core::oauth::HttpTransport;
use crate::error::Result;

/// Resolve credentials for an environment and print the resulting token.
///
/// With `--basic`, prints the base64 `username:password` credential for
/// endpoints that accept direct basic authentication instead of performing
/// the OAuth flow.
pub fn execute(
    ctx: &Context,
    environment: &str,
    username: Option<String>,
    password: Option<String>,
    basic: bool,
) -> Result<()> {
    info!(environment, basic, "token command");

    let config = MainConfig::load(ctx)?;
    let prompt = TerminalPrompt;
    let resolver = CredentialResolver::new(ctx, &config, &prompt);
    let flags = FlagCredentials { username, password };

    if basic {
        let auth = resolver.resolve_basic(environment, &flags)?;
        output::kv("endpoint   ", &auth.api_manager_endpoint);
        output::kv("credentials", &auth.credentials_b64);
    } else {
        let transport = HttpTransport::new()?;
        let auth = resolver.resolve_oauth(environment, &flags, &transport)?;
        output::kv("endpoint    ", &auth.api_manager_endpoint);
        output::kv("access token", &auth.access_token);
    }

    Ok(())
}
