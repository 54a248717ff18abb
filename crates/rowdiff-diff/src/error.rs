//! Error types for the diff crate.

use rowdiff_records::RecordError;

/// Errors that can occur while computing, saving, or loading a diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Loading or indexing one of the record sets failed.
    #[error(transparent)]
    Records(#[from] RecordError),

    /// No index columns were given, so rows cannot be keyed.
    #[error("at least one index column is required")]
    NoIndexColumns,

    /// A patch document is missing required keys or is otherwise corrupt.
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    /// Serializing the patch document failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
