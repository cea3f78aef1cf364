//! Reset-user command - clear cached credentials for an environment.

use tracing::info;

use crate::cli::output;
use crate::core::context::Context;
use crate::core::credentials::store::CredentialStore;
use crate::error::Result;

/// Remove the credential record for an environment, if any.
pub fn execute(ctx: &Context, environment: &str) -> Result<()> {
    info!(environment, "resetting cached credentials");

    if CredentialStore::new(ctx).remove(environment)? {
        output::success(&format!("cleared credentials for '{environment}'"));
    } else {
        output::dimmed(&format!("no credentials stored for '{environment}'"));
    }

    Ok(())
}
