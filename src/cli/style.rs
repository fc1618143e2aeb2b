//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when stdout is not
//! a terminal, so styling here is unconditional.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used for completed steps
pub const CHECK: &str = "✔";

/// Cross used for fatal errors
pub const CROSS: &str = "✘";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold heading text
    fn emphasis(&self) -> String;
    /// Highlighted value (names, counts)
    fn accent(&self) -> String;
    /// De-emphasized secondary text
    fn muted(&self) -> String;
    /// Green success text
    fn success(&self) -> String;
    /// Yellow warning/informational text
    fn warn(&self) -> String;
    /// Red error text
    fn error(&self) -> String;
}

impl<T: Display + ?Sized> Stylize for T {
    fn emphasis(&self) -> String {
        self.to_string().bold().to_string()
    }

    fn accent(&self) -> String {
        self.to_string().cyan().to_string()
    }

    fn muted(&self) -> String {
        self.to_string().bright_black().to_string()
    }

    fn success(&self) -> String {
        self.to_string().green().to_string()
    }

    fn warn(&self) -> String {
        self.to_string().bright_yellow().to_string()
    }

    fn error(&self) -> String {
        self.to_string().red().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error()
}

/// Spinner style shared by every phase
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
