use thiserror::Error;

/// Errors produced by similarity scoring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimilarityError {
    /// Scoring needs at least one match weight and two non-empty sets.
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

/// Convenience alias for similarity results.
pub type SimilarityResult<T> = Result<T, SimilarityError>;
