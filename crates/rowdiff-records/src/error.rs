//! Error types for the records crate.

use crate::record::{RecordKey, Side};

/// Errors produced while loading, writing, or indexing record sets.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A data row does not have the same number of fields as the header.
    #[error("malformed input at line {line}: expected {expected} fields, found {found}")]
    MalformedInput {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The header names the same column more than once.
    #[error("duplicate column {column:?} in header")]
    DuplicateColumn { column: String },

    /// Two records in the same set share an index key.
    #[error("duplicate key {key} in {side} records")]
    DuplicateKey { side: Side, key: RecordKey },

    /// A column named as an index or ignored column is missing from a header.
    #[error("unknown column {column:?} in {side} header")]
    UnknownColumn { side: Side, column: String },

    /// The delimited reader or writer failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output stream failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for record results.
pub type RecordResult<T> = Result<T, RecordError>;
