//! Error types shared by every shim operation.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::mode::ModeError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The native operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `mkdir(2)`.
    MakeDirectory,
    /// `opendir(3)` / `readdir(3)`.
    ScanDirectory,
    /// `rename(2)`.
    RenameFile,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Operation::MakeDirectory => "make directory",
            Operation::ScanDirectory => "search directory",
            Operation::RenameFile => "rename file",
        };

        f.write_str(action)
    }
}

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A native filesystem call reported a failure.
    #[error("Failed to {operation} '{path}'{}: {source}", destination_suffix(.destination))]
    OperationFailed {
        operation: Operation,
        path: String,
        /// Only set for renames.
        destination: Option<String>,
        #[source]
        source: io::Error,
    },

    /// The permission mode string could not be parsed.
    #[error("Invalid mode '{mode}': {source}")]
    InvalidMode {
        mode: String,
        #[source]
        source: ModeError,
    },

    /// The path cannot be handed to libc.
    #[error("Path contains an interior nul byte: {0:?}")]
    InvalidPath(String),

    /// Integer entry type filter outside the known codes.
    #[error("Invalid entry type filter {0}: expected -1 or 0..=4")]
    InvalidFilter(i32),
}

impl Error {
    pub(crate) fn failed(operation: Operation, path: &str, source: io::Error) -> Self {
        Error::OperationFailed {
            operation,
            path: path.to_string(),
            destination: None,
            source,
        }
    }

    /// The OS error code behind an [`Error::OperationFailed`], if any.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::OperationFailed { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

fn destination_suffix(destination: &Option<String>) -> String {
    match destination {
        Some(to) => format!(" to '{}'", to),
        None => String::new(),
    }
}
