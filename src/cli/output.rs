//! Shared CLI output helpers for consistent terminal output.
//!
//! Styling goes through `console`, which already honors NO_COLOR and
//! non-tty streams.

use std::fmt::Display;

use console::style;

/// Print a success message with checkmark (green).
///
/// Example: `✓ credentials cleared`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ keystore not found`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ default name and namespace in use`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ run: apimcli reset-user -e dev`
pub fn hint(msg: &str) {
    println!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  token endpoint  https://localhost:8243/token`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", style(label).dim(), style(value).bold());
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Format a path string in cyan for inline use.
pub fn path(p: &str) -> String {
    style(p).cyan().to_string()
}

/// Format a command string in green for inline use.
pub fn cmd(c: &str) -> String {
    style(c).green().to_string()
}
