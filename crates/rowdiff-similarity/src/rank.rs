//! Ranking candidates by similarity.

use serde::Serialize;
use tracing::debug;

/// A scored candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub candidate: T,
    pub score: f64,
}

/// Keep the `k` best-scoring candidates, highest first.
///
/// Ties keep their input order.
pub fn top_k<T>(mut scored: Vec<Ranked<T>>, k: usize) -> Vec<Ranked<T>> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    debug!(kept = scored.len(), "candidates ranked");
    scored
}
