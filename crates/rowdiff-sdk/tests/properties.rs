// Property tests for the diff / patch round trip.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use proptest::prelude::*;
use rowdiff_diff::{create, filter_significance, load_str, to_string, DiffOptions};
use rowdiff_patch::{apply, keyed, ApplyMode};
use rowdiff_records::{Record, RecordSet};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn header() -> Vec<String> {
    vec!["id".to_string(), "amount".to_string(), "label".to_string()]
}

fn index() -> Vec<String> {
    vec!["id".to_string()]
}

/// Mostly numeric, sometimes text, sometimes empty.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"-?[0-9]{1,5}(\.[0-9]{1,3})?",
        1 => r"[a-z ]{0,8}",
        1 => Just(String::new()),
    ]
}

/// A record set with unique ids drawn from a small pool, so two sets
/// generated independently overlap.
fn arb_set() -> impl Strategy<Value = RecordSet> {
    proptest::collection::btree_map(0u8..20, (arb_value(), arb_value()), 0..12).prop_map(|rows| {
        let records = rows
            .into_iter()
            .map(|(id, (amount, label))| {
                let mut r = Record::new();
                r.insert("id".into(), id.to_string());
                r.insert("amount".into(), amount);
                r.insert("label".into(), label);
                r
            })
            .collect();
        RecordSet::new(header(), records)
    })
}

fn as_map(set: &RecordSet) -> BTreeMap<rowdiff_records::RecordKey, Record> {
    keyed(set, &index()).unwrap()
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn apply_of_create_rebuilds_target(a in arb_set(), b in arb_set()) {
        let diff = create(&a, &b, &DiffOptions::new(index())).unwrap().diff;
        let patched = apply(&diff, &a, ApplyMode::Strict).unwrap();
        prop_assert_eq!(as_map(&patched), as_map(&b));
    }

    #[test]
    fn codec_roundtrip(a in arb_set(), b in arb_set(), compact in any::<bool>()) {
        let diff = create(&a, &b, &DiffOptions::new(index())).unwrap().diff;
        let text = to_string(&diff, compact).unwrap();
        prop_assert_eq!(load_str(&text).unwrap(), diff);
    }

    #[test]
    fn self_diff_is_empty(a in arb_set()) {
        let cmp = create(&a, &a, &DiffOptions::new(index())).unwrap();
        prop_assert!(cmp.diff.is_empty());
        prop_assert!(cmp.weights.iter().all(|w| *w == 1.0));
    }

    #[test]
    fn significance_filter_idempotent(a in arb_set(), b in arb_set(), n in 1u32..6) {
        let figures = NonZeroU32::new(n).unwrap();
        let diff = create(&a, &b, &DiffOptions::new(index())).unwrap().diff;
        let once = filter_significance(&diff, figures);
        let twice = filter_significance(&once, figures);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn weights_in_unit_range(a in arb_set(), b in arb_set()) {
        let cmp = create(&a, &b, &DiffOptions::new(index())).unwrap();
        prop_assert!(cmp.weights.iter().all(|w| (0.0..=1.0).contains(w)));
    }

    #[test]
    fn keys_partition(a in arb_set(), b in arb_set()) {
        let diff = create(&a, &b, &DiffOptions::new(index())).unwrap().diff;
        let mut seen = std::collections::BTreeSet::new();
        for r in diff.added.iter().chain(&diff.removed) {
            prop_assert!(seen.insert(vec![r["id"].clone()]));
        }
        for c in &diff.changed {
            prop_assert!(seen.insert(c.key.values().to_vec()));
            prop_assert!(!c.fields.is_empty());
            prop_assert!(!c.fields.contains_key("id"));
        }
    }
}
