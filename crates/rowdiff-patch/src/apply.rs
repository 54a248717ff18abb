//! Rebuild a "to" record set from a "from" record set and a diff.
//!
//! Entries are replayed in the order removed, added, changed. Surviving
//! source records keep their position; added records are appended in patch
//! order. The input set is never mutated.

use std::collections::BTreeMap;

use rowdiff_diff::{Diff, DiffError};
use rowdiff_records::{Record, RecordKey, RecordSet, Side};
use tracing::{debug, warn};

use crate::columns::output_columns;
use crate::error::{PatchError, PatchResult};

/// How to treat a source that no longer matches the patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyMode {
    /// Every touched record must match what the patch recorded.
    #[default]
    Strict,
    /// Apply best-effort: overwrite on conflict, skip missing keys, and set
    /// new values without checking old ones.
    Lenient,
}

impl ApplyMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Apply `diff` to `from`, producing the patched record set.
///
/// The result's header puts the index columns first and the rest in
/// lexicographic order (see [`output_columns`]).
pub fn apply(diff: &Diff, from: &RecordSet, mode: ApplyMode) -> PatchResult<RecordSet> {
    diff.validate()?;
    from.require_columns(&diff.index, Side::From)?;

    let mut slots: Vec<Option<Record>> = from.records.iter().cloned().map(Some).collect();
    let mut positions = from.positions(&diff.index, Side::From)?;

    for snapshot in &diff.removed {
        let key = key_of(snapshot, &diff.index)?;
        match positions.remove(&key) {
            Some(position) => {
                if mode.is_strict() && slots[position].as_ref() != Some(snapshot) {
                    return Err(PatchError::StaleSource {
                        key,
                        detail: "record to remove differs from the patch snapshot".into(),
                    });
                }
                slots[position] = None;
            }
            None if mode.is_strict() => return Err(PatchError::MissingKey { key }),
            None => warn!(%key, "removed record not in source; skipping"),
        }
    }

    for record in &diff.added {
        let key = key_of(record, &diff.index)?;
        match positions.get(&key) {
            Some(_) if mode.is_strict() => return Err(PatchError::Conflict { key }),
            Some(&position) => {
                warn!(%key, "added record already in source; overwriting");
                slots[position] = Some(record.clone());
            }
            None => {
                positions.insert(key, slots.len());
                slots.push(Some(record.clone()));
            }
        }
    }

    for change in &diff.changed {
        let slot = positions
            .get(&change.key)
            .and_then(|&position| slots[position].as_mut());
        let Some(record) = slot else {
            if mode.is_strict() {
                return Err(PatchError::MissingKey {
                    key: change.key.clone(),
                });
            }
            warn!(key = %change.key, "changed record not in source; skipping");
            continue;
        };

        if mode.is_strict() {
            for (column, delta) in &change.fields {
                let current = record.get(column);
                if current != delta.old.as_ref() {
                    return Err(PatchError::StaleSource {
                        key: change.key.clone(),
                        detail: format!(
                            "column {column:?} is {}, patch expects {}",
                            describe(current),
                            describe(delta.old.as_ref())
                        ),
                    });
                }
            }
        }

        for (column, delta) in &change.fields {
            match &delta.new {
                Some(value) => {
                    record.insert(column.clone(), value.clone());
                }
                None => {
                    record.remove(column);
                }
            }
        }
    }

    let records: Vec<Record> = slots.into_iter().flatten().collect();
    let header = output_columns(&records, &diff.index, &from.header);
    debug!(rows = records.len(), columns = header.len(), ?mode, "patch applied");
    Ok(RecordSet::new(header, records))
}

fn key_of(record: &Record, index: &[String]) -> PatchResult<RecordKey> {
    RecordKey::of(record, index).ok_or_else(|| {
        PatchError::Diff(DiffError::InvalidPatch(
            "patch record lacks an index column".into(),
        ))
    })
}

fn describe(value: Option<&String>) -> String {
    match value {
        Some(v) => format!("{v:?}"),
        None => "absent".into(),
    }
}

/// Key every record of `set`, for comparing patched output with an expected
/// set regardless of row order.
pub fn keyed(set: &RecordSet, index: &[String]) -> PatchResult<BTreeMap<RecordKey, Record>> {
    Ok(set
        .index_by(index, Side::To)?
        .into_iter()
        .map(|(key, record)| (key, record.clone()))
        .collect())
}
