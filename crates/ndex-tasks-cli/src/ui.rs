//! Terminal status messages and formatting helpers.
//!
//! Status lines go to stderr so command output stays pipeable. Color is
//! resolved once at startup from the --no-color flag, NO_COLOR and
//! FORCE_COLOR, falling back to terminal detection.

use owo_colors::{OwoColorize, Stream};
use std::time::Duration;

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!(
        "{} {}",
        "✓".if_supports_color(Stream::Stderr, |s| s.green()),
        message
    );
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!(
        "{} {}",
        "ℹ".if_supports_color(Stream::Stderr, |s| s.blue()),
        message
    );
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stream::Stderr, |s| s.yellow()),
        message.if_supports_color(Stream::Stderr, |s| s.yellow())
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        "✗".if_supports_color(Stream::Stderr, |s| s.red()),
        message.if_supports_color(Stream::Stderr, |s| s.red())
    );
}

/// Resolve the color override for this process.
///
/// Precedence: `--no-color` and `NO_COLOR` disable, `FORCE_COLOR` enables,
/// otherwise owo-colors falls back to stderr terminal detection.
pub fn init_colors(no_color: bool) {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        owo_colors::set_override(false);
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        owo_colors::set_override(true);
    }
}

/// Format a duration for status lines: milliseconds under a second,
/// fractional seconds above.
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
