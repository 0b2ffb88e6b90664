use cbor_doc::{Document, ErrorCode};
use hex_literal::hex;

const TWO_ENTRIES: [u8; 11] = hex!("bf 61 31 18 23 61 32 19 73 92 ff");

#[test]
fn find_key_leaves_cursor_at_value() {
    let mut doc = Document::from_bytes(&TWO_ENTRIES).unwrap();
    assert!(doc.find_key("2").unwrap());
    assert_eq!(doc.cursor(), 7);
    assert_eq!(doc.read_uint().unwrap(), 0x7392);

    assert!(doc.find_key("1").unwrap());
    assert_eq!(doc.cursor(), 3);
    assert_eq!(doc.read_uint().unwrap(), 0x23);
}

#[test]
fn miss_stops_at_break() {
    let mut doc = Document::from_bytes(&TWO_ENTRIES).unwrap();
    assert!(!doc.find_key("3").unwrap());
    assert_eq!(doc.cursor(), 10);
    assert!(!doc.contains_key("12").unwrap());
    assert_eq!(doc.error(), None);
}

#[test]
fn empty_document_has_no_keys() {
    let mut doc = Document::new();
    assert!(!doc.find_key("a").unwrap());
    assert_eq!(doc.cursor(), 0);
    assert_eq!(doc.entry_count().unwrap(), 0);
}

#[test]
fn key_matching_is_exact() {
    let mut doc = Document::from_bytes(&hex!("bf 62 61 62 01 61 61 02 ff")).unwrap();
    assert!(doc.find_key("a").unwrap());
    assert_eq!(doc.read_uint().unwrap(), 2);
    assert!(!doc.find_key("ab ").unwrap());
    assert!(!doc.find_key("").unwrap());
}

#[test]
fn non_text_keys_never_match() {
    // {1: 2, "a": 3}
    let mut doc = Document::from_bytes(&hex!("bf 01 02 61 61 03 ff")).unwrap();
    assert!(doc.find_key("a").unwrap());
    assert_eq!(doc.cursor(), 5);
    assert!(!doc.find_key("\u{1}").unwrap());
}

#[test]
fn nested_keys_are_not_visible() {
    // {"m": {"a": 1}, "a": 2}
    let mut doc = Document::from_bytes(&hex!("bf 61 6d bf 61 61 01 ff 61 61 02 ff")).unwrap();
    assert!(doc.find_key("a").unwrap());
    assert_eq!(doc.cursor(), 10);
    assert_eq!(doc.read_uint().unwrap(), 2);
}

#[test]
fn search_respects_map_end() {
    let mut doc = Document::from_bytes(&hex!("bf 61 61 01 61 62 02 ff")).unwrap();

    doc.set_map_end(4);
    assert!(doc.find_key("a").unwrap());
    assert!(!doc.find_key("b").unwrap());
    assert_eq!(doc.cursor(), 4);

    // An entry that straddles the boundary is never matched.
    doc.set_map_end(3);
    assert!(!doc.find_key("a").unwrap());
    assert_eq!(doc.cursor(), 1);
}

#[test]
fn search_for_key_continues_from_cursor() {
    let mut doc = Document::from_bytes(&hex!("bf 61 61 01 61 61 02 ff")).unwrap();
    assert!(doc.find_key("a").unwrap());
    assert_eq!(doc.read_uint().unwrap(), 1);
    doc.skip_item().unwrap();
    assert!(doc.search_for_key("a").unwrap());
    assert_eq!(doc.read_uint().unwrap(), 2);
    doc.skip_item().unwrap();
    assert!(!doc.search_for_key("a").unwrap());
}

#[test]
fn definite_maps_are_searchable() {
    let mut doc = Document::from_bytes(&hex!("a2 61 61 01 61 62 02")).unwrap();
    assert!(doc.find_key("b").unwrap());
    assert_eq!(doc.read_uint().unwrap(), 2);
    assert!(!doc.find_key("c").unwrap());
    assert_eq!(doc.cursor(), 7);
    assert_eq!(doc.entry_count().unwrap(), 2);
}

#[test]
fn definite_map_ignores_trailing_items() {
    // {"a": 1} followed by the items "b", 2
    let mut doc = Document::from_bytes(&hex!("a1 61 61 01 61 62 02")).unwrap();
    assert!(!doc.find_key("b").unwrap());
    assert_eq!(doc.cursor(), 4);

    assert!(doc.find_key("a").unwrap());
    doc.skip_item().unwrap();
    assert!(!doc.search_for_key("b").unwrap());
    assert_eq!(doc.entry_count().unwrap(), 1);
    assert_eq!(doc.error(), None);
}

#[test]
fn truncated_definite_map_fails_at_the_missing_value() {
    // {"a": 1, "b": <missing>}
    let mut doc = Document::from_bytes(&hex!("a2 61 61 01 61 62")).unwrap();
    assert!(doc.find_key("a").unwrap());
    let err = doc.find_key("b").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.offset, 6);
}

#[test]
fn non_map_document_is_unsupported() {
    let mut doc = Document::from_bytes(&hex!("01")).unwrap();
    let err = doc.find_key("a").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedOperation);
    assert_eq!(doc.error(), Some(err));
}

#[test]
fn truncated_entry_is_reported() {
    let mut doc = Document::from_bytes(&hex!("bf 61")).unwrap();
    let err = doc.find_key("a").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.offset, 2);
}

#[test]
fn entry_count_walks_indefinite_maps() {
    let mut doc = Document::from_bytes(&TWO_ENTRIES).unwrap();
    assert_eq!(doc.entry_count().unwrap(), 2);
}

#[test]
fn entry_count_respects_map_end() {
    let mut doc = Document::from_bytes(&hex!("bf 61 61 01 61 62 02 ff")).unwrap();
    doc.set_map_end(4);
    assert_eq!(doc.entry_count().unwrap(), 1);
    assert!(!doc.find_key("b").unwrap());

    // An entry that straddles the boundary is not counted.
    doc.set_map_end(3);
    assert_eq!(doc.entry_count().unwrap(), 0);
}

#[test]
fn get_reads_typed_values() {
    let mut doc = Document::from_bytes(&hex!("bf 61 6e 21 61 74 62 68 69 ff")).unwrap();
    assert_eq!(doc.get::<i64>("n").unwrap(), Some(-2));
    assert_eq!(doc.get::<String>("t").unwrap().as_deref(), Some("hi"));
    assert_eq!(doc.get::<u64>("x").unwrap(), None);
    assert_eq!(
        doc.get::<u64>("t").unwrap_err().code,
        ErrorCode::TypeMismatch
    );
}
