//! Error handling for the focustally binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for focustally operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that end the process with a failure status.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors (runtime startup, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Store load or flush failed.
    #[error("{0}")]
    Tally(#[from] tally::Error),
}
