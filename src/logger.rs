//! Logging utilities with colored module prefixes.
//!
//! Provides the `log!` macro for formatted terminal output:
//!
//! ```ignore
//! log!("build"; "rendered {} pages", count);
//! log!("error"; "{}: {:#}", path.display(), err);
//! ```
//!
//! Errors go to stderr, everything else to stdout, so diagnostics survive
//! output redirection.

use colored::{ColoredString, Colorize};
use crossterm::terminal::size;
use std::{
    io::{Write, stderr, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to the terminal width; multiline
/// messages (command output, error chains) are printed as-is.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let is_error = module.eq_ignore_ascii_case("error");

    let line = if message.contains('\n') {
        format!("{prefix} {message}\n")
    } else {
        // "[module] " overhead: brackets plus trailing space
        let width = get_terminal_width() as usize;
        let max_msg_len = width.saturating_sub(module.len() + 3);
        format!("{prefix} {}\n", truncate_str(message, max_msg_len))
    };

    if is_error {
        stderr().write_all(line.as_bytes()).ok();
    } else {
        stdout().write_all(line.as_bytes()).ok();
    }
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "sync" => prefix.bright_blue().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_short() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_long() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_str_utf8_boundary() {
        // "日" is 3 bytes; truncating mid-character must back off.
        let s = "日本語";
        assert_eq!(truncate_str(s, 4), "日");
        assert_eq!(truncate_str(s, 3), "日");
        assert_eq!(truncate_str(s, 2), "");
    }

    #[test]
    fn test_colorize_prefix_contains_module() {
        let p = colorize_prefix("build");
        assert!(p.to_string().contains("build"));
    }
}
