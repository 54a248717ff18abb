//! Keyed comparison of two record sets.
//!
//! Rows are matched by their index key. Keys only in "to" are added, keys
//! only in "from" are removed, and keys on both sides are compared field by
//! field, skipping index and ignored columns.

use std::collections::BTreeSet;

use rowdiff_records::{Record, RecordKey, RecordSet, Side};
use tracing::debug;

use crate::diff::{Diff, FieldDelta, RowChange};
use crate::error::{DiffError, DiffResult};
use crate::weight::field_weight;

/// What to compare.
///
/// Ignored columns must not overlap the index columns; that is checked by
/// the caller before the engine runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Columns forming the row key, in key order.
    pub index: Vec<String>,
    /// Columns excluded from field comparison.
    pub ignore: Vec<String>,
}

impl DiffOptions {
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            ignore: Vec::new(),
        }
    }

    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    fn skips(&self, column: &str) -> bool {
        self.index.iter().any(|c| c == column) || self.ignore.iter().any(|c| c == column)
    }
}

/// Engine output: the diff plus the match weights of this comparison.
///
/// The weights are owned by the comparison that produced them, so any number
/// of comparisons may run side by side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comparison {
    pub diff: Diff,
    /// One weight per compared field of every row present on both sides.
    pub weights: Vec<f64>,
}

/// Compare `from` against `to`.
///
/// Fails before producing anything if an index or ignored column is missing
/// from either header, or if either set repeats an index key.
/// `added`, `removed` and `changed` come out sorted by key.
pub fn create(from: &RecordSet, to: &RecordSet, options: &DiffOptions) -> DiffResult<Comparison> {
    if options.index.is_empty() {
        return Err(DiffError::NoIndexColumns);
    }
    for (set, side) in [(from, Side::From), (to, Side::To)] {
        set.require_columns(&options.index, side)?;
        set.require_columns(&options.ignore, side)?;
    }

    let from_map = from.index_by(&options.index, Side::From)?;
    let to_map = to.index_by(&options.index, Side::To)?;

    let mut diff = Diff::new(options.index.clone());
    let mut weights = Vec::new();

    for (key, from_record) in &from_map {
        match to_map.get(key) {
            Some(to_record) => {
                if let Some(change) = compare_rows(key, from_record, to_record, options, &mut weights) {
                    diff.changed.push(change);
                }
            }
            None => diff.removed.push((*from_record).clone()),
        }
    }

    for (key, to_record) in &to_map {
        if !from_map.contains_key(key) {
            diff.added.push((*to_record).clone());
        }
    }

    debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        weights = weights.len(),
        "comparison complete"
    );

    Ok(Comparison { diff, weights })
}

/// Compare `from` against `to`, discarding the match weights.
pub fn diff_records(from: &RecordSet, to: &RecordSet, options: &DiffOptions) -> DiffResult<Diff> {
    create(from, to, options).map(|c| c.diff)
}

fn compare_rows(
    key: &RecordKey,
    from: &Record,
    to: &Record,
    options: &DiffOptions,
    weights: &mut Vec<f64>,
) -> Option<RowChange> {
    let columns: BTreeSet<&String> = from
        .keys()
        .chain(to.keys())
        .filter(|c| !options.skips(c))
        .collect();

    let mut change = RowChange {
        key: key.clone(),
        fields: Default::default(),
    };
    for column in columns {
        let old = from.get(column);
        let new = to.get(column);
        weights.push(field_weight(old.map(String::as_str), new.map(String::as_str)));
        if old != new {
            change.fields.insert(
                column.clone(),
                FieldDelta {
                    old: old.cloned(),
                    new: new.cloned(),
                },
            );
        }
    }

    if change.fields.is_empty() {
        None
    } else {
        Some(change)
    }
}
