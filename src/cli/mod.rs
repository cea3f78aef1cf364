//! Command-line interface.

pub mod completions;
pub mod envs;
pub mod output;
pub mod prompt;
pub mod reset_user;
pub mod secret;
pub mod token;

use clap::{Parser, Subcommand};

use crate::core::context::Context;

/// apimcli - manage API Manager environments, tokens, and secrets.
#[derive(Parser)]
#[command(
    name = "apimcli",
    about = "Command-line client for WSO2 API Manager environments",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List configured environments
    Envs,

    /// Obtain an access token for an environment
    Token {
        /// Environment name
        #[arg(short, long)]
        environment: String,
        /// Account username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Account password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Print base64 basic-auth credentials instead of an OAuth token
        #[arg(long)]
        basic: bool,
    },

    /// Clear cached credentials for an environment
    ResetUser {
        /// Environment name
        #[arg(short, long)]
        environment: String,
    },

    /// Encrypt secrets against the configured keystore
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Secret subcommands.
#[derive(Subcommand)]
pub enum SecretAction {
    /// Record keystore coordinates in keystore-info.properties
    Init,

    /// Encrypt one secret (interactive) or a bulk properties file
    Create {
        /// Encryption algorithm label
        #[arg(long, default_value = "RSA/ECB/OAEPWithSHA1AndMGF1Padding")]
        cipher: String,
        /// Output form: console, file, or k8
        #[arg(long, default_value = "console")]
        output: String,
        /// Bulk properties file of alias=value pairs
        #[arg(short, long)]
        from_file: Option<String>,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    let ctx = Context::from_env()?;

    match command {
        Envs => envs::execute(&ctx),
        Token {
            environment,
            username,
            password,
            basic,
        } => token::execute(&ctx, &environment, username, password, basic),
        ResetUser { environment } => reset_user::execute(&ctx, &environment),
        Secret { action } => match action {
            SecretAction::Init => secret::init(&ctx),
            SecretAction::Create {
                cipher,
                output,
                from_file,
            } => secret::create(&ctx, &cipher, &output, from_file.as_deref()),
        },
        Completions { shell } => completions::execute(shell),
    }
}
