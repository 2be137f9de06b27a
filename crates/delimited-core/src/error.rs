//! Error types for parsing, table mutation, and document loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, mutating, or loading delimited tables.
///
/// Malformed input is not an error in lenient mode: the tokenizer accepts any
/// text and cell classification always succeeds. Errors come from strict row
/// checking, shape violations on mutation, and I/O.
#[derive(Error, Debug)]
pub enum DelimitedError {
    /// Reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row's width differs from the table's column count (strict policy only).
    /// `row` is the zero-based row index reported by the tokenizer.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row or column vector has the wrong length for the table.
    #[error("shape mismatch: expected {expected} cells, found {found}")]
    Shape { expected: usize, found: usize },

    /// A row or column index is outside the table.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The mutation would leave the table without any rows or columns.
    #[error("a table must keep at least one row and one column")]
    WouldBeEmpty,

    /// A search range is out of bounds or does not fall on character boundaries.
    #[error("invalid range {start}..{end} for text of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The document-search pattern failed to compile.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience alias used throughout delimited-core.
pub type Result<T> = std::result::Result<T, DelimitedError>;
