//! Terminal styling and text helpers.
//!
//! This module provides ANSI escape code definitions, color detection,
//! and the small formatting helpers the result renderer relies on.

use chrono::{DateTime, Utc};

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold for emphasis (repository names).
    pub const BOLD: &str = "\x1b[1m";
    /// Gray for secondary elements (info tags, timestamps).
    pub const GRAY: &str = "\x1b[90m";
    /// Yellow for private-repository info tags.
    pub const YELLOW: &str = "\x1b[33m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub gray: &'static str,
    pub yellow: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            bold: colors::BOLD,
            gray: colors::GRAY,
            yellow: colors::YELLOW,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            bold: "",
            gray: "",
            yellow: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Collapse runs of whitespace (including newlines) into single spaces.
///
/// Repository descriptions may contain embedded newlines and tabs that
/// would break single-line table rows.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format how long ago `then` was, relative to `now`, in compact form.
///
/// Durations under an hour render as minutes (`42m`), under a day as
/// hours (`7h`), under roughly a month as days (`12d`); anything older
/// renders as an absolute date (`Mar 1, 2024`).
#[must_use]
pub fn fuzzy_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let ago = now.signed_duration_since(then);
    let minutes = ago.num_minutes().max(0);
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = ago.num_hours();
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = ago.num_days();
    if days < 30 {
        return format!("{}d", days);
    }
    then.format("%b %-d, %Y").to_string()
}

/// Reduce a URL to its host and path for human-facing messages.
#[must_use]
pub fn display_url(url: &str) -> String {
    let trimmed = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    match trimmed.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => trimmed.to_string(),
    }
}
