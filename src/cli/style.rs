//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the ANSI codes when stdout
//! is not a terminal or `NO_COLOR` is set.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display {
    /// Headings and key values
    fn emphasis(&self) -> String {
        self.style(Style::new().bold()).to_string()
    }

    /// Names the user acts on (branches, remotes, counts)
    fn accent(&self) -> String {
        self.style(Style::new().cyan()).to_string()
    }

    /// Secondary information
    fn muted(&self) -> String {
        self.style(Style::new().dimmed()).to_string()
    }

    /// Completed actions
    fn success(&self) -> String {
        self.style(Style::new().green()).to_string()
    }

    /// Things that need the user's attention
    fn warn(&self) -> String {
        self.style(Style::new().yellow()).to_string()
    }

    /// Fatal errors
    fn error(&self) -> String {
        self.style(Style::new().red().bold()).to_string()
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled list arrow
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for long-running git operations
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
