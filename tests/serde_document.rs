#![cfg(feature = "serde")]

use cbor_doc::Document;
use hex_literal::hex;
use serde_json::json;

#[test]
fn document_serializes_as_json_object() {
    let mut doc = Document::new();
    doc.assign_key("answer", 42u64).unwrap();
    doc.assign_key("delta", -2i64).unwrap();
    doc.assign_key("name", "gauge").unwrap();

    let mut child = Document::new();
    child.assign_key("on", 1u8).unwrap();
    doc.assign_key("cfg", &child).unwrap();

    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        v,
        json!({"answer": 42, "delta": -2, "name": "gauge", "cfg": {"on": 1}})
    );
}

#[test]
fn empty_document_is_empty_object() {
    let v = serde_json::to_value(Document::new()).unwrap();
    assert_eq!(v, json!({}));
}

#[test]
fn loaded_items_map_to_json() {
    // {"a": [1, true, null], "b": 1.5, "c": 1(7), "d": (_ "x", "y")}
    let doc = Document::from_bytes(&hex!(
        "bf 61 61 83 01 f5 f6 61 62 f9 3e 00 61 63 c1 07 61 64 7f 61 78 61 79 ff ff"
    ))
    .unwrap();
    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        v,
        json!({"a": [1, true, null], "b": 1.5, "c": 7, "d": "xy"})
    );
}

#[test]
fn malformed_document_fails_to_serialize() {
    let doc = Document::from_bytes(&hex!("bf 61")).unwrap();
    assert!(serde_json::to_value(&doc).is_err());
}
