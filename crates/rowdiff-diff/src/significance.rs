//! Numeric significance filtering.
//!
//! A delta whose old and new values are both numeric and agree when rounded
//! to N significant figures is not a real change. Rounding is done in one
//! place, [`round_significant`]: the value is formatted in scientific
//! notation with `N - 1` fractional digits (exact decimal expansion of the
//! binary value, ties to even) and parsed back.

use std::num::NonZeroU32;

use crate::diff::{Diff, FieldDelta, RowChange};

/// Parse a field as a finite number, ignoring surrounding whitespace.
pub fn parse_numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest fractional precision worth formatting; an `f64` carries at most
/// 17 significant decimal digits.
const MAX_PRECISION: u32 = 16;

/// Round `value` to `figures` significant figures.
///
/// Requests beyond the precision of an `f64` return the value unchanged.
pub fn round_significant(value: f64, figures: NonZeroU32) -> f64 {
    let precision = (figures.get() - 1).min(MAX_PRECISION) as usize;
    format!("{:.*e}", precision, value).parse().unwrap_or(value)
}

/// Drop numeric deltas that vanish at `figures` significant figures.
///
/// Rows left without deltas are dropped too. Non-numeric deltas pass
/// through. The result is a fixed point: filtering it again changes nothing.
pub fn filter_significance(diff: &Diff, figures: NonZeroU32) -> Diff {
    let changed = diff
        .changed
        .iter()
        .filter_map(|change| {
            let fields: std::collections::BTreeMap<_, _> = change
                .fields
                .iter()
                .filter(|(_, delta)| is_significant(delta, figures))
                .map(|(column, delta)| (column.clone(), delta.clone()))
                .collect();
            if fields.is_empty() {
                None
            } else {
                Some(RowChange {
                    key: change.key.clone(),
                    fields,
                })
            }
        })
        .collect();

    Diff {
        index: diff.index.clone(),
        added: diff.added.clone(),
        removed: diff.removed.clone(),
        changed,
    }
}

fn is_significant(delta: &FieldDelta, figures: NonZeroU32) -> bool {
    let old = delta.old.as_deref().and_then(parse_numeric);
    let new = delta.new.as_deref().and_then(parse_numeric);
    match (old, new) {
        (Some(a), Some(b)) => round_significant(a, figures) != round_significant(b, figures),
        _ => true,
    }
}
