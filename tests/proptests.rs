// Property-based tests for in-place document editing.
//
// Sizes stay small to keep CI fast.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use cbor_doc::{Document, DocumentLimits, ErrorCode};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z]{0,12}"
}

fn arb_entries() -> impl Strategy<Value = BTreeMap<String, u64>> {
    proptest::collection::btree_map(arb_key(), any::<u64>(), 0..24)
}

fn build(entries: &BTreeMap<String, u64>) -> Document {
    let mut doc = Document::new();
    for (k, v) in entries {
        doc.assign_key(k, *v).unwrap();
    }
    doc
}

fn uint_len(v: u64) -> usize {
    match v {
        0..=23 => 1,
        24..=0xff => 2,
        0x100..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

proptest! {
    #[test]
    fn assigned_values_read_back(entries in arb_entries()) {
        let mut doc = build(&entries);
        prop_assert_eq!(doc.entry_count().unwrap(), entries.len());
        prop_assert_eq!(doc.map_end(), doc.len());
        for (k, v) in &entries {
            prop_assert_eq!(doc.get::<u64>(k).unwrap(), Some(*v));
        }
    }

    #[test]
    fn update_preserves_siblings(
        entries in arb_entries(),
        key in arb_key(),
        value in any::<u64>(),
    ) {
        let mut doc = build(&entries);
        doc.assign_key(&key, value).unwrap();

        let mut expected = entries.clone();
        expected.insert(key, value);
        prop_assert_eq!(doc.entry_count().unwrap(), expected.len());
        for (k, v) in &expected {
            prop_assert_eq!(doc.get::<u64>(k).unwrap(), Some(*v));
        }
        prop_assert_eq!(doc.error(), None);
    }

    #[test]
    fn update_order_matches_insertion_order(
        entries in arb_entries(),
        value in any::<u64>(),
    ) {
        prop_assume!(!entries.is_empty());
        let mut doc = build(&entries);
        let first = entries.keys().next().unwrap().clone();
        doc.assign_key(&first, value).unwrap();

        let mut rebuilt = entries.clone();
        rebuilt.insert(first, value);
        let rebuilt_doc = build(&rebuilt);
        prop_assert_eq!(doc.as_bytes(), rebuilt_doc.as_bytes());
    }

    #[test]
    fn heads_are_minimal(v in any::<u64>()) {
        let mut doc = Document::new();
        doc.write_uint(v).unwrap();
        prop_assert_eq!(doc.len(), uint_len(v));
        doc.set_cursor(0);
        prop_assert_eq!(doc.read_uint().unwrap(), v);
        prop_assert_eq!(doc.data_item_size().unwrap(), doc.len());
    }

    #[test]
    fn signed_values_read_back(v in any::<i64>()) {
        let mut doc = Document::new();
        doc.assign_key("v", v).unwrap();
        prop_assert_eq!(doc.get::<i64>("v").unwrap(), Some(v));
    }

    #[test]
    fn text_values_read_back(s in "\\PC{0,40}") {
        let mut doc = Document::new();
        doc.assign_key("s", s.as_str()).unwrap();
        prop_assert_eq!(doc.get::<String>("s").unwrap(), Some(s));
    }

    #[test]
    fn bounded_search_never_crosses_map_end(
        entries in arb_entries(),
        key in arb_key(),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut doc = build(&entries);
        let end = cut.index(doc.len() + 1);
        doc.set_map_end(end);
        if doc.find_key(&key).unwrap() {
            let value_end = doc.cursor() + doc.data_item_size().unwrap();
            prop_assert!(value_end <= end);
        } else {
            prop_assert!(doc.cursor() <= doc.len());
        }
    }

    #[test]
    fn latched_error_never_changes(
        entries in arb_entries(),
        more in arb_entries(),
    ) {
        let limits = DocumentLimits::for_bytes(16);
        let mut doc = Document::with_limits(0, limits).unwrap();
        let mut first = None;
        for (k, v) in entries.iter().chain(more.iter()) {
            let before = doc.as_bytes().to_vec();
            match doc.assign_key(k, *v) {
                Ok(()) => prop_assert!(first.is_none()),
                Err(err) => {
                    prop_assert_eq!(doc.as_bytes(), before.as_slice());
                    match first {
                        None => {
                            prop_assert_eq!(err.code, ErrorCode::InsufficientSpace);
                            first = Some(err);
                        }
                        Some(latched) => prop_assert_eq!(err, latched),
                    }
                }
            }
            prop_assert_eq!(doc.error(), first);
        }
        prop_assert!(doc.len() <= 16);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut doc = Document::from_bytes(&bytes).unwrap();
        let _ = doc.find_key("a");
        let _ = doc.to_diagnostic();
        let _ = doc.entry_count();
        let _ = doc.data_item_size();
        let _ = doc.assign_key("a", 1u8);
        prop_assert!(doc.cursor() <= doc.len());
        prop_assert!(doc.map_end() <= doc.len());
    }
}
