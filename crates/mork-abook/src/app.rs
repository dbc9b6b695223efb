//! Application context for CLI command execution.
//!
//! [`App`] owns the raw bytes of the selected address book. Decoding is
//! done on demand by the command that needs it, on the calling thread.

use std::path::Path;

use mork::{AddressBook, MorkDocument, ProjectOptions};

use crate::config::Config;
use crate::error::Result;

/// Loaded address book and where it came from.
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
    data: Vec<u8>,
}

impl App {
    /// Reads the book named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read.
    pub async fn load(config: Config) -> Result<Self> {
        let data = tokio::fs::read(&config.book).await?;
        tracing::debug!(book = %config.book.display(), bytes = data.len(), "Loaded address book");
        Ok(Self::from_bytes(config, data))
    }

    /// Wraps an already loaded book.
    #[must_use]
    pub fn from_bytes(config: Config, data: Vec<u8>) -> Self {
        Self { config, data }
    }

    /// Path of the book.
    #[must_use]
    pub fn book_path(&self) -> &Path {
        &self.config.book
    }

    /// Projection settings for this book: photos live next to it.
    #[must_use]
    pub fn project_options(&self) -> ProjectOptions {
        ProjectOptions {
            profile_dir: self.config.profile_dir().map(Path::to_path_buf),
        }
    }

    /// Decodes the book without projecting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::error::Error::Decode) for malformed
    /// data.
    pub fn document(&self) -> Result<MorkDocument> {
        Ok(mork::decode(&self.data)?)
    }

    /// Decodes the book and projects its contacts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::error::Error::Decode) for malformed
    /// data.
    pub fn address_book(&self) -> Result<AddressBook> {
        let book = mork::read_address_book(&self.data, &self.project_options())?;
        for warning in &book.warnings {
            tracing::debug!(%warning, "Skipped cell");
        }
        tracing::info!(
            contacts = book.contacts.len(),
            rows = book.rows_seen,
            skipped_cells = book.warnings.len(),
            "Read address book"
        );
        Ok(book)
    }

    /// Like [`address_book`](Self::address_book), but a malformed book is
    /// logged and treated as empty.
    #[must_use]
    pub fn address_book_or_empty(&self) -> AddressBook {
        self.address_book().unwrap_or_else(|err| {
            tracing::warn!(
                book = %self.book_path().display(),
                error = %err,
                "Address book unavailable, treating it as empty"
            );
            AddressBook::default()
        })
    }
}
