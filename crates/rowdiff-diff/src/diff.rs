//! The diff data model, which is also the patch document.
//!
//! Field order of the serialized form is fixed by struct order:
//! `_index`, `added`, `removed`, `changed`.

use std::collections::BTreeMap;

use rowdiff_records::{Record, RecordKey};
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// The difference between a "from" and a "to" record set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    /// Index columns defining the row key, in key order.
    #[serde(rename = "_index")]
    pub index: Vec<String>,
    /// Full records whose key exists only in "to".
    pub added: Vec<Record>,
    /// Full records whose key exists only in "from".
    pub removed: Vec<Record>,
    /// Field-level changes for keys present on both sides.
    pub changed: Vec<RowChange>,
}

/// The changed fields of one row present on both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowChange {
    pub key: RecordKey,
    /// Never empty; a row without deltas is not a change.
    pub fields: BTreeMap<String, FieldDelta>,
}

/// Old and new value of one field. Serialized as `[old, new]`.
///
/// `None` means the column is absent on that side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Option<String>, Option<String>)", into = "(Option<String>, Option<String>)")]
pub struct FieldDelta {
    pub old: Option<String>,
    pub new: Option<String>,
}

impl FieldDelta {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: Some(old.into()),
            new: Some(new.into()),
        }
    }
}

impl From<(Option<String>, Option<String>)> for FieldDelta {
    fn from((old, new): (Option<String>, Option<String>)) -> Self {
        Self { old, new }
    }
}

impl From<FieldDelta> for (Option<String>, Option<String>) {
    fn from(delta: FieldDelta) -> Self {
        (delta.old, delta.new)
    }
}

impl Diff {
    /// Create an empty diff over the given index columns.
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Returns `true` if nothing was added, removed, or changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of affected rows.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Number of field-level deltas across all changed rows.
    pub fn field_changes(&self) -> usize {
        self.changed.iter().map(|c| c.fields.len()).sum()
    }

    /// Check the structural invariants a patch must satisfy.
    ///
    /// Used when loading untrusted documents; diffs built by the engine
    /// always pass.
    pub fn validate(&self) -> DiffResult<()> {
        if self.index.is_empty() {
            return Err(DiffError::InvalidPatch("empty _index".into()));
        }
        for (section, records) in [("added", &self.added), ("removed", &self.removed)] {
            for record in records {
                if let Some(column) = self.index.iter().find(|c| !record.contains_key(*c)) {
                    return Err(DiffError::InvalidPatch(format!(
                        "{section} record lacks index column {column:?}"
                    )));
                }
            }
        }
        for change in &self.changed {
            if change.key.len() != self.index.len() {
                return Err(DiffError::InvalidPatch(format!(
                    "changed key {} has {} values, index has {} columns",
                    change.key,
                    change.key.len(),
                    self.index.len()
                )));
            }
            if change.fields.is_empty() {
                return Err(DiffError::InvalidPatch(format!(
                    "changed key {} has no fields",
                    change.key
                )));
            }
            if let Some(column) = change.fields.keys().find(|f| self.index.contains(*f)) {
                return Err(DiffError::InvalidPatch(format!(
                    "changed key {} modifies index column {column:?}",
                    change.key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn change(key: &str, field: &str, old: &str, new: &str) -> RowChange {
        RowChange {
            key: RecordKey::new(vec![key.into()]),
            fields: [(field.to_string(), FieldDelta::new(old, new))].into(),
        }
    }

    #[test]
    fn empty_diff() {
        let diff = Diff::new(vec!["id".into()]);
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
        assert!(diff.validate().is_ok());
    }

    #[test]
    fn counts() {
        let mut diff = Diff::new(vec!["id".into()]);
        diff.added.push(record(&[("id", "3")]));
        diff.changed.push(change("1", "name", "a", "b"));
        assert!(!diff.is_empty());
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.field_changes(), 1);
    }

    #[test]
    fn delta_serializes_as_pair() {
        let json = serde_json::to_string(&FieldDelta::new("a", "b")).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let absent = FieldDelta { old: None, new: Some("x".into()) };
        assert_eq!(serde_json::to_string(&absent).unwrap(), r#"[null,"x"]"#);
    }

    #[test]
    fn validate_rejects_empty_index() {
        let diff = Diff::default();
        assert!(matches!(diff.validate(), Err(DiffError::InvalidPatch(_))));
    }

    #[test]
    fn validate_rejects_short_key() {
        let mut diff = Diff::new(vec!["a".into(), "b".into()]);
        diff.changed.push(change("1", "v", "x", "y"));
        assert!(matches!(diff.validate(), Err(DiffError::InvalidPatch(_))));
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let mut diff = Diff::new(vec!["id".into()]);
        diff.changed.push(RowChange {
            key: RecordKey::new(vec!["1".into()]),
            fields: BTreeMap::new(),
        });
        assert!(matches!(diff.validate(), Err(DiffError::InvalidPatch(_))));
    }

    #[test]
    fn validate_rejects_index_field_delta() {
        let mut diff = Diff::new(vec!["id".into()]);
        diff.changed.push(change("1", "id", "1", "2"));
        assert!(matches!(diff.validate(), Err(DiffError::InvalidPatch(_))));
    }

    #[test]
    fn validate_rejects_record_without_index() {
        let mut diff = Diff::new(vec!["id".into()]);
        diff.removed.push(record(&[("name", "a")]));
        assert!(matches!(diff.validate(), Err(DiffError::InvalidPatch(_))));
    }
}
