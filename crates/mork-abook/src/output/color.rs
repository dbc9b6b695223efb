//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Info/Reference: cyan   (phone numbers, row addresses)
//!   - Warning:        yellow (skipped cells, unresolved atoms)
//!   - Muted:          dimmed (field labels, number types)
//!   - Emphasis:       bold   (contact names, section headers)

use colored::Colorize;
use mork::PhoneType;

use super::OutputConfig;

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Icon for a phone type, with ASCII fallback support.
pub(crate) fn phone_icon(kind: PhoneType, config: &OutputConfig) -> &'static str {
    match (kind, config.use_ascii) {
        (PhoneType::Home | PhoneType::Work, true) => "T",
        (PhoneType::Mobile, true) => "M",
        (PhoneType::FaxHome, true) => "F",
        (PhoneType::Home | PhoneType::Work, false) => "☎",
        (PhoneType::Mobile, false) => "✆",
        (PhoneType::FaxHome, false) => "⎙",
    }
}
