use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single row: column name to raw field value.
///
/// Keys are kept sorted so serialized records are stable. Column order for
/// output is carried separately by [`crate::RecordSet::header`].
pub type Record = BTreeMap<String, String>;

/// Which input of a comparison a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The original ("from") record set.
    From,
    /// The target ("to") record set.
    To,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::From => "from",
            Side::To => "to",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite index key: the values of the index columns, in index order.
///
/// Serializes as a plain JSON array of strings.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(Vec<String>);

impl RecordKey {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Extract the key of `record` for the given index columns.
    ///
    /// Returns `None` if the record lacks any of the columns.
    pub fn of(record: &Record, index: &[String]) -> Option<Self> {
        index
            .iter()
            .map(|column| record.get(column).cloned())
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordKey({:?})", self.0)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

impl From<Vec<String>> for RecordKey {
    fn from(values: Vec<String>) -> Self {
        Self(values)
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

    #[test]
    fn key_follows_index_order() {
        let r = record(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let key = RecordKey::of(&r, &["c".into(), "a".into()]).unwrap();
        assert_eq!(key.values(), &["3".to_string(), "1".to_string()]);
    }

    #[test]
    fn key_missing_column_is_none() {
        let r = record(&[("a", "1")]);
        assert!(RecordKey::of(&r, &["b".into()]).is_none());
    }

    #[test]
    fn key_serializes_as_array() {
        let key = RecordKey::new(vec!["1".into(), "x".into()]);
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"["1","x"]"#);
    }

    #[test]
    fn key_display() {
        let key = RecordKey::new(vec!["1".into(), "x".into()]);
        assert_eq!(key.to_string(), "(1, x)");
    }

    #[test]
    fn keys_order_lexicographically() {
        let a = RecordKey::new(vec!["1".into(), "b".into()]);
        let b = RecordKey::new(vec!["1".into(), "c".into()]);
        assert!(a < b);
    }
}
