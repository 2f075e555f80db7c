//! Error types for vocab-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LoadError.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Structural problems found while validating a translation table.
///
/// Rows are reported 1-based (as they appear in the file), columns 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file contains less than 2 rows (found {found})")]
    TooFewRows { found: usize },

    #[error("row {row} has a word without a translation")]
    MissingTranslationField { row: usize },

    #[error("row {row}, column {column} cannot be read as text")]
    UnparsableField { row: usize, column: usize },
}

/// Errors that can occur while loading a dictionary file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read dictionary file: {0}")]
    Read(#[from] csv::Error),

    #[error("dictionary file is not valid UTF-8 (line {line})")]
    Decode {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("invalid dictionary file: {0}")]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// True for errors raised while opening, reading or decoding the file,
    /// as opposed to a file that was read but rejected.
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read(_) | Self::Decode { .. })
    }
}

/// Errors raised by quiz session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no dictionary loaded")]
    Inactive,

    #[error("dictionary has no rows")]
    EmptyDictionary,
}
