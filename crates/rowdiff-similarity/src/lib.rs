//! Similarity scoring for rowdiff.
//!
//! Turns the match weights of one comparison, together with the sizes of the
//! two record sets, into a single score in `[0, 1]`, and ranks candidates by
//! that score.

pub mod error;
pub mod rank;
pub mod score;

pub use error::{SimilarityError, SimilarityResult};
pub use rank::{top_k, Ranked};
pub use score::{score, score_comparison, SIZE_RATIO_WEIGHT, MEAN_WEIGHT, PERFECT_SHARE_WEIGHT};
