use std::collections::BTreeSet;

use rowdiff_records::Record;

/// Field order for a patched record set.
///
/// Index columns come first in their declared order, then every other column
/// in lexicographic order. With no records there is nothing to order, so
/// `fallback` (usually the source header) is used as is.
pub fn output_columns(records: &[Record], index: &[String], fallback: &[String]) -> Vec<String> {
    if records.is_empty() {
        return fallback.to_vec();
    }
    let rest: BTreeSet<&String> = records
        .iter()
        .flat_map(|r| r.keys())
        .filter(|c| !index.contains(*c))
        .collect();
    index.iter().cloned().chain(rest.into_iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn index_first_then_sorted() {
        let record: Record = [("z", "1"), ("id", "2"), ("a", "3"), ("k", "4")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            output_columns(&[record], &cols(&["k", "id"]), &[]),
            cols(&["k", "id", "a", "z"])
        );
    }

    #[test]
    fn empty_uses_fallback() {
        assert_eq!(
            output_columns(&[], &cols(&["id"]), &cols(&["name", "id"])),
            cols(&["name", "id"])
        );
    }
}
