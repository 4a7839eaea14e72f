//! Status lines printed to stderr.

use owo_colors::OwoColorize;

pub fn success(message: &str) {
    if super::should_use_color() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

pub fn info(message: &str) {
    if super::should_use_color() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

/// Warnings are printed in yellow.
pub fn warning(message: &str) {
    if super::should_use_color() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}
