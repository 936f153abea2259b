//! User-facing output utilities for clean, colored terminal messages
//!
//! These helpers print warnings and errors in a friendly, colored format
//! without internal logging noise (timestamps, log levels, crate names).

use owo_colors::OwoColorize;

/// Display a warning message to the user in yellow with padding
///
/// # Example
/// ```ignore
/// output::warn("Index has no checksum footer - integrity not verified.");
/// ```
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Display an error message to the user in red with padding
///
/// # Example
/// ```ignore
/// output::error("Search index unavailable: symdex.idx is malformed.");
/// ```
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

/// Display an informational message to the user in default color with padding
pub fn info(message: &str) {
    eprintln!("\n{}\n", message);
}
