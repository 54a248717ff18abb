//! Per-field match weights.
//!
//! Every field compared on a row present in both record sets contributes
//! one weight in `[0, 1]`. The weights say nothing about patch correctness;
//! they feed the similarity score used to rank candidate datasets.

use similar::{DiffTag, TextDiff};

/// Weight of a field whose values are identical.
pub const PERFECT_MATCH: f64 = 1.0;

/// Match weight of one field.
///
/// Equal values weigh [`PERFECT_MATCH`]. Differing values weigh their
/// character similarity `2 * lcs / (len_old + len_new)`, which is symmetric
/// and strictly below 1. A column present on only one side weighs 0.
pub fn field_weight(old: Option<&str>, new: Option<&str>) -> f64 {
    match (old, new) {
        (Some(a), Some(b)) if a == b => PERFECT_MATCH,
        (Some(a), Some(b)) => char_similarity(a, b),
        _ => 0.0,
    }
}

fn char_similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return PERFECT_MATCH;
    }
    let diff = TextDiff::from_chars(a, b);
    let matched: usize = diff
        .ops()
        .iter()
        .filter(|op| op.tag() == DiffTag::Equal)
        .map(|op| op.old_range().len())
        .sum();
    2.0 * matched as f64 / total as f64
}
