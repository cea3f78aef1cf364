//! Secret commands - keystore setup and secret encryption.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use dialoguer::{Input, Password};
use tracing::info;

use crate::cli::output;
use crate::core::constants;
use crate::core::context::Context;
use crate::core::properties;
use crate::core::secrets::{self, Emission, InputKind, OutputKind, SecretConfig};
use crate::error::Result;

/// Interactively record keystore coordinates in
/// `mi-security/keystore-info.properties`. Passwords are stored
/// base64-encoded.
pub fn init(ctx: &Context) -> Result<()> {
    let location: String = Input::new()
        .with_prompt("Keystore location")
        .interact_text()?;
    let store_password = Password::new().with_prompt("Keystore password").interact()?;
    let alias: String = Input::new().with_prompt("Key alias").interact_text()?;
    let key_password = Password::new().with_prompt("Key password").interact()?;

    let mut props = std::collections::BTreeMap::new();
    props.insert(constants::PROP_KEYSTORE_LOCATION.to_string(), location);
    props.insert(
        constants::PROP_KEYSTORE_PASSWORD.to_string(),
        BASE64.encode(store_password),
    );
    props.insert(constants::PROP_KEY_ALIAS.to_string(), alias);
    props.insert(
        constants::PROP_KEY_PASSWORD.to_string(),
        BASE64.encode(key_password),
    );

    std::fs::create_dir_all(ctx.security_config_dir())?;
    let path = ctx.keystore_properties_path();
    properties::write(&path, &props)?;

    info!(path = %path.display(), "keystore properties written");
    output::success(&format!(
        "keystore information saved to {}",
        output::path(&path.display().to_string())
    ));
    Ok(())
}

/// Encrypt secrets and emit them in the chosen form.
///
/// Without `--from-file`, prompts for a single alias and a masked,
/// confirmed value.
pub fn create(ctx: &Context, cipher: &str, output_label: &str, from_file: Option<&str>) -> Result<()> {
    let input = match from_file {
        Some(path) => InputKind::File(path.into()),
        None => {
            let alias: String = Input::new().with_prompt("Secret alias").interact_text()?;
            let value = Password::new()
                .with_prompt("Secret value")
                .with_confirmation("Confirm secret value", "values do not match")
                .interact()?;
            InputKind::Inline { alias, value }
        }
    };

    let config = SecretConfig {
        output: OutputKind::from_label(output_label),
        algorithm: cipher.to_string(),
        input,
    };

    match secrets::encrypt_secrets(ctx, &config)? {
        Emission::Console => {}
        Emission::PropertiesFile(path) => {
            output::success(&format!(
                "secret properties file created in {}",
                output::path(&path.display().to_string())
            ));
        }
        Emission::Manifest(path) => {
            output::success(&format!(
                "kubernetes secret file created in {} with default name and namespace",
                output::path(&path.display().to_string())
            ));
            output::warn("change the default values as required before applying");
        }
    }

    Ok(())
}
