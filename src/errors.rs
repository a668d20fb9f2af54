/*!
 * Error types for the tenhance application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while assembling or processing a document batch.
///
/// These are per-entry failures: the batch processor records them and
/// continues with the remaining documents.
#[derive(Error, Debug)]
pub enum BatchError {
    /// An entry's bytes are not valid UTF-8 text
    #[error("Entry '{name}' is not valid UTF-8 text")]
    Decode {
        /// Name of the offending entry
        name: String,
    },

    /// Two entries in the same batch share a name
    #[error("Duplicate document name in batch: '{0}'")]
    DuplicateName(String),
}

impl BatchError {
    /// Name of the document the failure refers to
    pub fn document_name(&self) -> &str {
        match self {
            Self::Decode { name } => name,
            Self::DuplicateName(name) => name,
        }
    }
}

/// Errors that can occur when unpacking or packing an archive.
///
/// Unlike [`BatchError`], an invalid container is fatal for the whole
/// request: no documents are produced.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The supplied bytes are not a valid zip archive
    #[error("Not a valid zip archive: {0}")]
    InvalidFormat(String),

    /// An entry could not be read out of the archive
    #[error("Failed to read archive entry #{index}: {message}")]
    EntryRead {
        /// Zero-based index of the entry inside the archive
        index: usize,
        /// Underlying error message
        message: String,
    },

    /// The output archive could not be written
    #[error("Failed to write archive: {0}")]
    Write(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from archive handling
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Error from batch processing
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
