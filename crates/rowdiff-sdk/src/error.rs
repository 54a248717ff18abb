use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error(transparent)]
    Records(#[from] rowdiff_records::RecordError),

    #[error(transparent)]
    Diff(#[from] rowdiff_diff::DiffError),

    #[error(transparent)]
    Patch(#[from] rowdiff_patch::PatchError),

    #[error(transparent)]
    Similarity(#[from] rowdiff_similarity::SimilarityError),
}

pub type SdkResult<T> = Result<T, SdkError>;
