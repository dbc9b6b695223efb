//! Output formatting for CLI commands.
//!
//! Every command can print human-readable text or JSON. The `write_*`
//! functions take any writer so they can be tested; the `print_*` functions
//! write to stdout with settings from the environment.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)
//! - `json`: JSON serialization for programmatic output

pub mod color;
mod json;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use mork::{Contact, MorkDocument};

pub use color::{info, warning};

use color::{bold, dimmed, phone_icon};
use json::{print_book_json, print_contacts_json, print_rows_json};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `MORK_ABOOK_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `MORK_ABOOK_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let use_ascii = match env::var("MORK_ABOOK_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "MORK_ABOOK_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("MORK_ABOOK_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// What the `books` command reports about one address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    /// Path of the book.
    pub path: PathBuf,
    /// Number of imported contacts.
    pub contacts: usize,
    /// Number of decoded rows.
    pub rows: usize,
    /// Number of cells dropped during projection.
    pub skipped_cells: usize,
    /// Decode or read failure, if any.
    pub error: Option<String>,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a contact list in the specified format
pub fn print_contacts(contacts: &[Contact], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_contacts_text(&mut handle, contacts, &OutputConfig::from_env()),
        OutputMode::Json => print_contacts_json(&mut handle, contacts),
    }
}

/// Print full contact details in the specified format
pub fn print_contact_details(contacts: &[Contact], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_details_text(&mut handle, contacts, &OutputConfig::from_env()),
        OutputMode::Json => print_contacts_json(&mut handle, contacts),
    }
}

/// Print decoded rows in the specified format
pub fn print_rows(document: &MorkDocument, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_rows_text(&mut handle, document, &OutputConfig::from_env()),
        OutputMode::Json => print_rows_json(&mut handle, document),
    }
}

/// Print a book summary in the specified format
pub fn print_book(summary: &BookSummary, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_book_text(&mut handle, summary, &OutputConfig::from_env()),
        OutputMode::Json => print_book_json(&mut handle, summary),
    }
}

// ============================================================================
// Text Output
// ============================================================================

/// Write one line per contact plus one indented line per number.
pub fn write_contacts_text<W: Write>(
    w: &mut W,
    contacts: &[Contact],
    config: &OutputConfig,
) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(w, "No contacts found.");
    }

    for contact in contacts {
        write!(w, "{}", bold(&contact.name, config))?;
        if let Some(company) = &contact.company {
            write!(w, " {}", dimmed(&format!("({company})"), config))?;
        }
        writeln!(w)?;
        for number in &contact.numbers {
            writeln!(
                w,
                "  {} {:<10} {}",
                phone_icon(number.kind, config),
                dimmed(&number.kind.to_string(), config),
                info(&number.number, config)
            )?;
        }
    }
    writeln!(w)?;
    writeln!(w, "{} contact(s)", contacts.len())
}

/// Write every field of each contact.
pub fn write_details_text<W: Write>(
    w: &mut W,
    contacts: &[Contact],
    config: &OutputConfig,
) -> io::Result<()> {
    for (index, contact) in contacts.iter().enumerate() {
        if index > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}", bold(&contact.name, config))?;
        if let Some(company) = &contact.company {
            writeln!(w, "  {} {company}", dimmed("Company:", config))?;
        }
        if !contact.numbers.is_empty() {
            writeln!(w, "  {}", dimmed("Numbers:", config))?;
            for number in &contact.numbers {
                writeln!(
                    w,
                    "    {} {:<10} {}",
                    phone_icon(number.kind, config),
                    number.kind,
                    info(&number.number, config)
                )?;
            }
        }
        for address in &contact.addresses {
            writeln!(w, "  {}", dimmed(&format!("Address ({}):", address.kind), config))?;
            if !address.street.is_empty() {
                writeln!(w, "    {}", address.street)?;
            }
            let locality = format!("{} {}", address.zip, address.city);
            if !locality.trim().is_empty() {
                writeln!(w, "    {}", locality.trim())?;
            }
        }
        if let Some(photo) = &contact.photo {
            writeln!(w, "  {} {photo}", dimmed("Photo:", config))?;
        }
    }
    Ok(())
}

/// Write each row address followed by its resolved cells.
pub fn write_rows_text<W: Write>(
    w: &mut W,
    document: &MorkDocument,
    config: &OutputConfig,
) -> io::Result<()> {
    for (key, cells) in &document.store {
        writeln!(w, "{}", info(&key.to_string(), config))?;
        for (column_id, value_id) in cells.iter() {
            let column = document.columns.lookup(column_id).map_or_else(
                || warning(&format!("<column {column_id:X}>"), config),
                str::to_string,
            );
            let value = document.values.lookup(value_id).map_or_else(
                || warning(&format!("<value {value_id:X}>"), config),
                str::to_string,
            );
            writeln!(w, "  {column} = {value}")?;
        }
    }
    writeln!(
        w,
        "{} row(s), {} column atom(s), {} value atom(s)",
        document.store.len(),
        document.columns.len(),
        document.values.len()
    )
}

/// Write the summary of one book.
pub fn write_book_text<W: Write>(
    w: &mut W,
    summary: &BookSummary,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold(&summary.path.display().to_string(), config))?;
    if let Some(error) = &summary.error {
        return writeln!(w, "  {}", warning(error, config));
    }
    writeln!(
        w,
        "  {} contact(s) from {} row(s)",
        summary.contacts, summary.rows
    )?;
    if summary.skipped_cells > 0 {
        let text = format!("{} unresolvable cell(s) skipped", summary.skipped_cells);
        writeln!(w, "  {}", warning(&text, config))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mork::{Address, AddressKind, PhoneNumber, PhoneType};

    fn plain() -> OutputConfig {
        OutputConfig::new(true, false)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn jane() -> Contact {
        Contact {
            name: "Jane Doe".to_string(),
            numbers: vec![PhoneNumber {
                number: "555-1234".to_string(),
                kind: PhoneType::Home,
            }],
            company: Some("ACME".to_string()),
            addresses: vec![Address {
                kind: AddressKind::Work,
                street: "Main St 1".to_string(),
                zip: "12345".to_string(),
                city: "Springfield".to_string(),
            }],
            photo: Some("Photos/jane.jpg".to_string()),
        }
    }

    #[test]
    fn contact_list_text() {
        let text = render(|w| write_contacts_text(w, &[jane()], &plain()));
        assert_eq!(
            text,
            "Jane Doe (ACME)\n  T home       555-1234\n\n1 contact(s)\n"
        );
    }

    #[test]
    fn empty_contact_list_text() {
        let text = render(|w| write_contacts_text(w, &[], &plain()));
        assert_eq!(text, "No contacts found.\n");
    }

    #[test]
    fn details_include_address_and_photo() {
        let text = render(|w| write_details_text(w, &[jane()], &plain()));
        assert!(text.contains("Address (work):\n    Main St 1\n    12345 Springfield\n"));
        assert!(text.contains("Photo: Photos/jane.jpg"));
    }

    #[test]
    fn rows_text_marks_unresolved_atoms() {
        let document = mork::decode(b"< <(a=c)> (80=DisplayName)> [1(^80=Jane)(^81^A0)]").unwrap();
        let text = render(|w| write_rows_text(w, &document, &plain()));
        assert!(text.starts_with("[1:80] in {1:80}\n  DisplayName = Jane\n  <column 81> = <value A0>\n"));
        assert!(text.ends_with("1 row(s), 1 column atom(s), 1 value atom(s)\n"));
    }

    #[test]
    fn book_summary_reports_error() {
        let summary = BookSummary {
            path: PathBuf::from("/p/abook.mab"),
            contacts: 0,
            rows: 0,
            skipped_cells: 0,
            error: Some("bad".to_string()),
        };
        let text = render(|w| write_book_text(w, &summary, &plain()));
        assert_eq!(text, "/p/abook.mab\n  bad\n");
    }

    #[test]
    fn contacts_json_is_an_array() {
        let text = render(|w| print_contacts_json(w, &[jane()]));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["name"], "Jane Doe");
        assert_eq!(value[0]["numbers"][0]["type"], "home");
    }

    #[test]
    fn rows_json_lists_cells() {
        let document = mork::decode(b"< <(a=c)> (80=DisplayName)> [1(^80=Jane)]").unwrap();
        let text = render(|w| print_rows_json(w, &document));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["row"], "[1:80] in {1:80}");
        assert_eq!(value[0]["cells"][0]["column"], "DisplayName");
        assert_eq!(value[0]["cells"][0]["value"], "Jane");
    }
}
