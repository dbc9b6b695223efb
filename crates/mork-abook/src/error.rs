//! Error types for mork-abook operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for mork-abook operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The address book is not valid Mork.
    #[error("Cannot decode address book: {0}")]
    Decode(#[from] mork::Error),

    /// No Thunderbird profile could be found.
    #[error("No Thunderbird profile found (looked for {})", .0.display())]
    ProfileNotFound(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for mork-abook operations.
pub type Result<T> = std::result::Result<T, Error>;
