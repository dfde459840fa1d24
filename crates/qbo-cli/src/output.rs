//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use qbosdk::QuickbooksOnline;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as JSON, pretty or compact.
pub fn record<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        json_pretty(value)
    } else {
        json(value)
    }
}

/// Warn that connecting rotated the refresh token, and show the new one.
///
/// Goes to stderr so record output on stdout stays parseable.
pub fn rotated_refresh_token(qbo: &QuickbooksOnline) {
    eprintln!(
        "{} {}",
        "!".yellow(),
        "The refresh token was rotated; the previous one no longer works.".dimmed()
    );
    eprintln!("{}: {}", "QBO_REFRESH_TOKEN".dimmed(), qbo.refresh_token().as_str());
}
