//! Error types for writing tables.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing output files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// Failed to create an output directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write CSV data.
    #[error("Failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The configured delimiter cannot be written as a single byte.
    #[error("Delimiter {delimiter:?} is not a single ASCII character")]
    InvalidDelimiter { delimiter: char },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
