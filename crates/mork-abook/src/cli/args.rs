//! CLI argument structs for the commands that take arguments.

use clap::Parser;

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ListArgs {
    /// Maximum number of contacts to show
    #[arg(short, long, value_parser = parse_limit)]
    pub limit: Option<usize>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Text contained in the contact name (case-insensitive)
    #[arg(value_parser = validate_name)]
    pub name: String,
}

/// Arguments for the `search` command
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Phone number or part of one
    #[arg(value_parser = validate_number)]
    pub number: String,
}

fn parse_limit(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid limit '{s}': {e}")),
    }
}

fn validate_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

fn validate_number(s: &str) -> Result<String, String> {
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("'{s}' contains no digits"));
    }
    Ok(s.to_string())
}
