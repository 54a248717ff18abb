//! High-level rowdiff API.
//!
//! Ties the record, diff, patch, and similarity crates together behind
//! file- and stream-level operations. This is the entry point for the CLI
//! and for applications embedding rowdiff.

pub mod compare;
pub mod error;
pub mod files;
pub mod options;
pub mod rank;

pub use compare::compare;
pub use error::{SdkError, SdkResult};
pub use files::{diff_files, load_records, patch_streams, FileComparison};
pub use options::CompareOptions;
pub use rank::{collect_candidates, rank_candidates, RankReport};

// Re-export key types
pub use rowdiff_diff::{Comparison, Diff, DiffSummary, FieldDelta, RowChange};
pub use rowdiff_patch::ApplyMode;
pub use rowdiff_records::{Record, RecordKey, RecordSet, DEFAULT_SEPARATOR};
pub use rowdiff_similarity::Ranked;
