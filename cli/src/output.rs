//! Terminal output for CLI commands

use colored::{ColoredString, Colorize};
use std::fmt::Display;

fn status(marker: ColoredString, msg: &str) {
    println!("{} {}", marker, msg);
}

pub fn success(msg: &str) {
    status("✓".green(), msg);
}

pub fn info(msg: &str) {
    status("ℹ".blue(), msg);
}

/// Warnings go to stderr so piped output stays clean
pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow(), msg);
}

/// Print a `label: value` pair with the label highlighted
pub fn field(label: &str, value: impl Display) {
    status(format!("{}:", label).bold(), &value.to_string());
}
