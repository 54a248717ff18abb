//! Error types for the patch crate.

use rowdiff_diff::DiffError;
use rowdiff_records::{RecordError, RecordKey};

/// Errors raised while applying a patch.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// The source record no longer matches what the patch recorded.
    #[error("stale source at key {key}: {detail}")]
    StaleSource { key: RecordKey, detail: String },

    /// An added record's key already exists in the source.
    #[error("conflict: key {key} already exists in the source")]
    Conflict { key: RecordKey },

    /// A removed or changed entry references a key the source lacks.
    #[error("missing key {key} in the source")]
    MissingKey { key: RecordKey },

    /// Indexing the source failed.
    #[error(transparent)]
    Records(#[from] RecordError),

    /// The patch itself is not well formed.
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;
