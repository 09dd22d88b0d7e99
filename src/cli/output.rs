//! Terminal output formatting helpers.
//!
//! Consistent colored symbols and structured field output for the CLI
//! surfaces. Diagnostics go through `tracing`; these helpers are for the
//! user-facing result of a command.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print a success line with a green check.
pub fn success(message: impl Display) {
    println!("{} {message}", "✓".green().bold());
}

/// Print a warning line with a yellow marker.
pub fn warning(message: impl Display) {
    println!("{} {message}", "!".yellow().bold());
}

/// Print an error line with a red cross to stderr.
pub fn error(message: impl Display) {
    eprintln!("{} {message}", "✗".red().bold());
}

/// Print a bold section header.
pub fn section(title: impl Display) {
    println!();
    println!("{}", title.to_string().bold());
}

/// Print an indented `label: value` field.
pub fn field(label: impl Display, value: impl Display) {
    println!("  {}: {value}", label.to_string().dimmed());
}
