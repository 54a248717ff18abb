//! The similarity score.
//!
//! `score = 0.3 * mean(weights) + 0.4 * share(weights == 1.0) + 0.3 * size_ratio`
//! where `size_ratio` is the smaller record count over the larger one.

use rowdiff_diff::{Comparison, PERFECT_MATCH};

use crate::error::{SimilarityError, SimilarityResult};

/// Contribution of the mean match weight.
pub const MEAN_WEIGHT: f64 = 0.3;
/// Contribution of the share of perfect matches.
pub const PERFECT_SHARE_WEIGHT: f64 = 0.4;
/// Contribution of the smaller-to-larger record count ratio.
pub const SIZE_RATIO_WEIGHT: f64 = 0.3;

/// Score one comparison from its match weights and the two set sizes.
pub fn score(weights: &[f64], from_count: usize, to_count: usize) -> SimilarityResult<f64> {
    if weights.is_empty() {
        return Err(SimilarityError::InsufficientData("no match weights".into()));
    }
    if from_count == 0 || to_count == 0 {
        return Err(SimilarityError::InsufficientData(format!(
            "record counts must be positive (from {from_count}, to {to_count})"
        )));
    }

    let n = weights.len() as f64;
    let mean = weights.iter().sum::<f64>() / n;
    let perfect = weights.iter().filter(|w| **w == PERFECT_MATCH).count() as f64 / n;
    let ratio = from_count.min(to_count) as f64 / from_count.max(to_count) as f64;

    Ok(MEAN_WEIGHT * mean + PERFECT_SHARE_WEIGHT * perfect + SIZE_RATIO_WEIGHT * ratio)
}

/// Score a [`Comparison`] by its own match weights.
pub fn score_comparison(
    comparison: &Comparison,
    from_count: usize,
    to_count: usize,
) -> SimilarityResult<f64> {
    score(&comparison.weights, from_count, to_count)
}
