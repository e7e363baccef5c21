//! Error types for the activity store and run loop.

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;
use tokio::task::JoinError;

/// Convenient result type for the tally crate.
pub type Result<T> = StdResult<T, Error>;

/// Unrecoverable failures of the activity store and run loop.
///
/// Every variant halts the sampler: callers report the cause and exit.
/// Recoverable conditions (an unreadable window title, a missing file during
/// `stats`) never surface as an `Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// The persisted file exists and is non-empty but is not a flat JSON
    /// object of label to count.
    #[error("corrupt activity store {}: {source}", .path.display())]
    Corrupt {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The initial empty store file could not be created.
    #[error("cannot create activity store {}: {source}", .path.display())]
    Create {
        /// File that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The persisted file exists but could not be read.
    #[error("cannot read activity store {}: {source}", .path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Flushing the store to disk failed.
    #[error("cannot write activity store {}: {source}", .path.display())]
    Write {
        /// Destination of the failed flush.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The store could not be serialized.
    #[error("cannot serialize activity store: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The sampler task panicked or was aborted before handing back the store.
    #[error("sampler task failed: {0}")]
    Sampler(#[from] JoinError),
}
