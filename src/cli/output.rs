//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (off with `--nocolor`, `no_color = true` or NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings, prompts
//! - Cyan: paths, account names, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::style;

use crate::core::store::Renamed;

/// Turn styling off for the rest of the process.
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

/// Whether NO_COLOR is set in the environment.
pub fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ saved.`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ ambiguous account (2 matches)`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ no match.`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Warn once per account kept under a new name on load.
///
/// Example: `⚠ duplicate account name 'gmail' kept as 'gmail (2)'.`
pub fn renamed(renamed: &[Renamed]) {
    for account in renamed {
        warn(&format!(
            "duplicate account name '{}' kept as '{}'.",
            account.from, account.to
        ));
    }
}

/// Print a plain informational line.
pub fn info(msg: &str) {
    println!("{}", msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ type help for the list of commands`
pub fn hint(msg: &str) {
    println!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Print a labelled field, label in the prompt color.
///
/// Example: `   pseudo: alice`
pub fn field(label: &str, value: impl Display) {
    println!("   {} {}", style(format!("{}:", label)).yellow(), value);
}

/// Print one numbered search result.
///
/// Example: `  [0] Bank A`
pub fn result(index: usize, name: &str) {
    println!("  [{}] {}", style(index).dim(), name);
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Print an empty line.
pub fn blank() {
    println!();
}

/// Print raw text without decoration.
pub fn raw(text: &str) {
    println!("{}", text);
}

/// Format a path string in cyan.
pub fn path(p: impl Display) -> String {
    style(p.to_string()).cyan().to_string()
}

/// Format an account name in cyan.
pub fn name(n: &str) -> String {
    style(n).cyan().to_string()
}

/// Format a command string in green.
pub fn cmd(c: &str) -> String {
    style(c).green().to_string()
}

/// Format secondary text, dimmed.
pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}

/// Format an interactive prompt in yellow.
pub fn prompt(p: &str) -> String {
    style(p).yellow().to_string()
}
