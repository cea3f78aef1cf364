//! Interactive credential prompts.

use dialoguer::{Input, Password};

use crate::core::credentials::Prompt;
use crate::error::Result;

/// Terminal-backed prompt: blocking reads from the controlling terminal,
/// echo suppressed for passwords.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn username(&self) -> Result<String> {
        Ok(Input::new().with_prompt("Username").interact_text()?)
    }

    fn password(&self, username: &str) -> Result<String> {
        println!("For username: {username}");
        Ok(Password::new().with_prompt("Password").interact()?)
    }
}
