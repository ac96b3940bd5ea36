#![allow(missing_docs)]
//! Project-wide error types for trandb.
//!
//! This module defines a `thiserror`-based `Error` enum and a `Result<T>` alias
//! that are intended to be used across the crate.

use thiserror::Error;

/// Project-level error enum.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rustyline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Storage engine error: {0}")]
    Storage(#[from] rusqlite::Error),

    // Domain-specific errors
    #[error("Cannot read log file '{path}': {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Row {row} has {found} values but the insert expects {expected}")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("Unknown column '{column}' in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("Store handle is closed")]
    Closed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience result alias using the crate's `Error`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Convenience constructor for `Other` variant.
    pub fn other<S: Into<String>>(s: S) -> Self {
        Error::Other(s.into())
    }

    /// Convenience constructor for `MalformedExpression` variant.
    pub fn expression<S: Into<String>>(s: S) -> Self {
        Error::MalformedExpression(s.into())
    }
}
