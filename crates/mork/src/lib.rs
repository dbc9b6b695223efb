//! A decoder for Mozilla's legacy Mork database format.
//!
//! Mork is the flat-file format Thunderbird historically used for its
//! address books (`abook.mab`, `history.mab`). This crate reads such a file
//! from an in-memory buffer, rebuilds its table/row/cell structure and
//! projects the rows into address-book [`Contact`]s.
//!
//! The work is split in two stages:
//!
//! 1. [`decode`] runs the grammar over the buffer and returns a
//!    [`MorkDocument`]: the column and value atom dictionaries plus the
//!    row [`Store`].
//! 2. [`project`] walks the store and turns every row with a display name
//!    into a [`Contact`], sorted by name.
//!
//! [`read_address_book`] does both in one call.
//!
//! # Examples
//!
//! ```
//! use mork::{read_address_book, ProjectOptions};
//!
//! let data = b"< <(a=c)> (80=DisplayName)(81=HomePhone)>\n\
//!              {1:^80 {(k^BF:c)(s=9)} [1(^80=Jane Doe)(^81=555-1234)]}";
//!
//! let book = read_address_book(data, &ProjectOptions::default()).unwrap();
//! assert_eq!(book.contacts.len(), 1);
//! assert_eq!(book.contacts[0].name, "Jane Doe");
//! assert_eq!(book.contacts[0].numbers[0].number, "555-1234");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod atom;
pub mod cell;
pub mod contact;
pub mod error;
pub mod parser;
pub mod projector;
pub mod scanner;
pub mod store;
pub mod warning;

pub use atom::{AtomId, AtomTable};
pub use contact::{Address, AddressKind, Contact, PhoneNumber, PhoneType};
pub use error::{Error, Result};
pub use parser::{MorkDocument, decode};
pub use projector::{ProjectOptions, project, project_collecting};
pub use store::{CellMap, RowKey, Store};
pub use warning::Warning;

/// Contacts read from one address-book buffer.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    /// Contacts sorted by name.
    pub contacts: Vec<Contact>,
    /// Cells that were dropped because their column or value did not resolve.
    pub warnings: Vec<Warning>,
    /// Number of rows that were considered as contact candidates.
    pub rows_seen: usize,
}

/// Decodes `data` and projects the result into an [`AddressBook`].
///
/// # Errors
///
/// Returns [`Error::UnexpectedCharacter`] when the buffer violates the Mork
/// grammar. No partial book is returned in that case.
pub fn read_address_book(data: &[u8], options: &ProjectOptions) -> Result<AddressBook> {
    let document = decode(data)?;
    let mut warnings = Vec::new();
    let contacts = project_collecting(&document, options, &mut warnings);

    Ok(AddressBook {
        contacts,
        warnings,
        rows_seen: document.store.len(),
    })
}
