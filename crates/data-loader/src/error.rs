//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading the catalog and ratings files.
///
/// Loading errors are fatal at startup: the service must not serve traffic
/// without its stores. Individual malformed rows are not errors; they are
/// skipped during parsing (see `parser`).
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading a file
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV header is missing a required column
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// The file has no header row at all
    #[error("{file} is empty (no header row)")]
    EmptyFile { file: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
