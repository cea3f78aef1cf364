//! apimcli - command-line client for WSO2 API Manager environments.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use apimcli::cli::output;
use apimcli::cli::{execute, Cli};
use apimcli::error::{ConfigError, CredentialError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("APIMCLI_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("apimcli=debug")
        } else {
            EnvFilter::new("apimcli=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Credential(CredentialError::Mismatch { environment, .. }) => Some(format!(
                "run: apimcli reset-user -e {environment} to clear user data"
            )),
            Error::Config(ConfigError::NotConfigured(path)) => Some(format!(
                "add environments to {}",
                path.display()
            )),
            Error::KeyStore(_) => Some("run: apimcli secret init".to_string()),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
