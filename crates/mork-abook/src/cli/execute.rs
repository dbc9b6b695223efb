//! Command execution logic.

use anyhow::{Result, bail};
use mork::Contact;

use super::args::{ListArgs, SearchArgs, ShowArgs};
use crate::app::App;
use crate::config::Config;
use crate::output::{self, BookSummary, OutputMode};

/// Execute the list command
pub fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let mut contacts = app.address_book_or_empty().contacts;
    if let Some(limit) = args.limit {
        contacts.truncate(limit);
    }
    output::print_contacts(&contacts, output_mode)?;
    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let needle = args.name.to_lowercase();
    let matches: Vec<Contact> = app
        .address_book_or_empty()
        .contacts
        .into_iter()
        .filter(|contact| contact.name.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        bail!("No contact matching '{}'", args.name);
    }
    output::print_contact_details(&matches, output_mode)?;
    Ok(())
}

/// Execute the search command
pub fn execute_search(app: &App, args: &SearchArgs, output_mode: OutputMode) -> Result<()> {
    let matches: Vec<Contact> = app
        .address_book_or_empty()
        .contacts
        .into_iter()
        .filter(|contact| has_number(contact, &args.number))
        .collect();

    if matches.is_empty() {
        bail!("No contact with number '{}'", args.number);
    }
    output::print_contacts(&matches, output_mode)?;
    Ok(())
}

/// Returns `true` if the digits of any number of `contact` contain the
/// digits of `query`. Formatting on either side is ignored; a query without
/// digits matches nothing.
fn has_number(contact: &Contact, query: &str) -> bool {
    let query = digits(query);
    if query.is_empty() {
        return false;
    }
    contact
        .numbers
        .iter()
        .any(|number| digits(&number.number).contains(&query))
}

fn digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Execute the dump command
pub fn execute_dump(app: &App, output_mode: OutputMode) -> Result<()> {
    let document = app.document()?;
    output::print_rows(&document, output_mode)?;
    Ok(())
}

/// Execute the books command
///
/// A missing or malformed book is reported in the summary rather than
/// failing the command.
pub async fn execute_books(config: Config, output_mode: OutputMode) -> Result<()> {
    let path = config.book.clone();
    let outcome = match App::load(config).await {
        Ok(app) => app.address_book(),
        Err(err) => Err(err),
    };

    let summary = match outcome {
        Ok(book) => BookSummary {
            path,
            contacts: book.contacts.len(),
            rows: book.rows_seen,
            skipped_cells: book.warnings.len(),
            error: None,
        },
        Err(err) => BookSummary {
            path,
            contacts: 0,
            rows: 0,
            skipped_cells: 0,
            error: Some(err.to_string()),
        },
    };

    output::print_book(&summary, output_mode)?;
    Ok(())
}
