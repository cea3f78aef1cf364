//! Envs command - list configured environments.

use crate::cli::output;
use crate::core::config::MainConfig;
use crate::core::context::Context;
use crate::error::Result;

/// List every configured environment and its endpoints.
pub fn execute(ctx: &Context) -> Result<()> {
    let config = MainConfig::load(ctx)?;

    if config.environments.is_empty() {
        output::dimmed("no environments configured");
        return Ok(());
    }

    for (name, env) in &config.environments {
        output::header(name);
        output::kv("api manager ", &env.api_manager_endpoint);
        output::kv("registration", &env.registration_endpoint);
        output::kv("token       ", &env.token_endpoint);
    }

    Ok(())
}
