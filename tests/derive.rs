use cbor_doc::{Document, ErrorCode, FromDocument, IntoDocument};
use hex_literal::hex;

#[derive(Debug, PartialEq, IntoDocument, FromDocument)]
struct Gauge {
    id: u32,
    #[cbor(rename = "n")]
    name: String,
    note: Option<String>,
    #[cbor(default)]
    retries: u8,
    #[cbor(skip)]
    cached: u64,
}

#[derive(IntoDocument, FromDocument)]
struct Envelope {
    seq: i64,
    body: Document,
}

#[derive(Debug, PartialEq, IntoDocument, FromDocument)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn fields_encode_in_declaration_order() {
    let gauge = Gauge {
        id: 7,
        name: "x".into(),
        note: None,
        retries: 0,
        cached: 99,
    };
    let doc = gauge.to_document().unwrap();
    assert_eq!(
        doc.as_bytes(),
        &hex!("bf 62 69 64 07 61 6e 61 78 67 72 65 74 72 69 65 73 00 ff")
    );
}

#[test]
fn decode_restores_fields() {
    let gauge = Gauge {
        id: 300,
        name: "sensor".into(),
        note: Some("warm".into()),
        retries: 2,
        cached: 99,
    };
    let mut doc = gauge.to_document().unwrap();
    let back = Gauge::from_document(&mut doc).unwrap();
    assert_eq!(
        back,
        Gauge {
            cached: 0,
            ..gauge
        }
    );
}

#[test]
fn missing_required_key_fails() {
    let mut doc = Document::new();
    doc.assign_key("id", 1u8).unwrap();
    let err = Gauge::from_document(&mut doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingKey);
}

#[test]
fn missing_default_and_optional_keys_are_filled() {
    let mut doc = Document::new();
    doc.assign_key("id", 1u8).unwrap();
    doc.assign_key("n", "a").unwrap();
    let gauge = Gauge::from_document(&mut doc).unwrap();
    assert_eq!(gauge.note, None);
    assert_eq!(gauge.retries, 0);
}

#[test]
fn write_into_updates_existing_document() {
    let mut doc = Document::new();
    doc.assign_key("other", 5u8).unwrap();
    doc.assign_key("id", 1u8).unwrap();

    let gauge = Gauge {
        id: 2,
        name: "b".into(),
        note: None,
        retries: 1,
        cached: 0,
    };
    gauge.write_into(&mut doc).unwrap();
    assert_eq!(doc.entry_count().unwrap(), 4);
    assert_eq!(doc.get::<u32>("id").unwrap(), Some(2));
    assert_eq!(doc.get::<u8>("other").unwrap(), Some(5));
}

#[test]
fn wrong_field_type_fails() {
    let mut doc = Document::new();
    doc.assign_key("id", "seven").unwrap();
    doc.assign_key("n", "a").unwrap();
    let err = Gauge::from_document(&mut doc).unwrap_err();
    assert_eq!(err.code, ErrorCode::TypeMismatch);
}

#[test]
fn nested_document_fields() {
    let mut body = Document::new();
    body.assign_key("k", 1u8).unwrap();
    let env = Envelope { seq: -3, body };
    let mut doc = env.to_document().unwrap();
    assert_eq!(
        doc.as_bytes(),
        &hex!("bf 63 73 65 71 22 64 62 6f 64 79 bf 61 6b 01 ff ff")
    );

    let back = Envelope::from_document(&mut doc).unwrap();
    assert_eq!(back.seq, -3);
    assert_eq!(back.body.as_bytes(), &hex!("bf 61 6b 01 ff"));
}

#[test]
fn generic_fields() {
    let w = Wrapper { inner: 9u16 };
    let mut doc = w.to_document().unwrap();
    assert_eq!(Wrapper::<u16>::from_document(&mut doc).unwrap(), w);
}
