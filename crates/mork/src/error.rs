//! Error types for Mork decoding.
//!
//! Only grammar violations are fatal. Two other failure shapes are not
//! raised:
//!
//! - Running out of input inside a dictionary, table, row or group closes the
//!   construct implicitly. Truncated files decode as far as they go.
//! - A cell whose column or value id has no atom is dropped during
//!   projection and reported as a [`Warning`](crate::warning::Warning).

use thiserror::Error;

/// The error type for Mork decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A structural position held a character the grammar does not allow.
    #[error("unexpected character '{}' at offset {at}", char::from(*found))]
    UnexpectedCharacter {
        /// Byte offset of the offending character.
        at: usize,
        /// The offending byte.
        found: u8,
    },
}

/// A specialized Result type for Mork decoding.
pub type Result<T> = std::result::Result<T, Error>;
