use cbor_doc::{CborKind, Document, ErrorCode};
use hex_literal::hex;

fn uint_bytes(v: u64) -> Vec<u8> {
    let mut doc = Document::new();
    doc.write_uint(v).unwrap();
    doc.into_bytes()
}

fn int_bytes(v: i64) -> Vec<u8> {
    let mut doc = Document::new();
    doc.write_int(v).unwrap();
    doc.into_bytes()
}

#[test]
fn unsigned_heads_are_minimal() {
    let vectors: &[(u64, &[u8])] = &[
        (0, &hex!("00")),
        (23, &hex!("17")),
        (24, &hex!("18 18")),
        (255, &hex!("18 ff")),
        (256, &hex!("19 01 00")),
        (0x1234, &hex!("19 12 34")),
        (65535, &hex!("19 ff ff")),
        (65536, &hex!("1a 00 01 00 00")),
        (0xffff_ffff, &hex!("1a ff ff ff ff")),
        (0x1_0000_0000, &hex!("1b 00 00 00 01 00 00 00 00")),
        (u64::MAX, &hex!("1b ff ff ff ff ff ff ff ff")),
    ];
    for (v, expected) in vectors {
        assert_eq!(uint_bytes(*v), *expected, "value {v}");
    }
}

#[test]
fn negative_heads_are_minimal() {
    let vectors: &[(i64, &[u8])] = &[
        (-1, &hex!("20")),
        (-24, &hex!("37")),
        (-25, &hex!("38 18")),
        (-256, &hex!("38 ff")),
        (-257, &hex!("39 01 00")),
        (i64::MIN, &hex!("3b 7f ff ff ff ff ff ff ff")),
        (7, &hex!("07")),
    ];
    for (v, expected) in vectors {
        assert_eq!(int_bytes(*v), *expected, "value {v}");
    }
}

#[test]
fn text_uses_major_three() {
    let mut doc = Document::new();
    doc.write_text("").unwrap();
    doc.write_text("a").unwrap();
    assert_eq!(doc.as_bytes(), &hex!("60 61 61"));

    let long = "abcdefghijklmnopqrstuvwx";
    let mut doc = Document::new();
    doc.write_text(long).unwrap();
    assert_eq!(&doc.as_bytes()[..2], &hex!("78 18"));
    assert_eq!(&doc.as_bytes()[2..], long.as_bytes());
}

#[test]
fn reads_accept_every_width() {
    let cases: &[(&[u8], u64)] = &[
        (&hex!("17"), 23),
        (&hex!("18 2a"), 42),
        (&hex!("19 73 92"), 0x7392),
        (&hex!("1a 00 01 00 00"), 65536),
        (&hex!("1b 00 00 00 01 00 00 00 00"), 0x1_0000_0000),
        // Overlong forms from foreign encoders are read as-is.
        (&hex!("19 00 05"), 5),
    ];
    for (bytes, expected) in cases {
        let mut doc = Document::from_bytes(bytes).unwrap();
        assert_eq!(doc.read_uint().unwrap(), *expected);
        assert_eq!(doc.cursor(), 0);
    }
}

#[test]
fn read_int_covers_both_signs() {
    let mut doc = Document::from_bytes(&hex!("3b 7f ff ff ff ff ff ff ff")).unwrap();
    assert_eq!(doc.read_int().unwrap(), i64::MIN);

    let mut doc = Document::from_bytes(&hex!("38 ff")).unwrap();
    assert_eq!(doc.read_int().unwrap(), -256);

    let mut doc = Document::from_bytes(&hex!("18 2a")).unwrap();
    assert_eq!(doc.read_int().unwrap(), 42);
}

#[test]
fn read_int_out_of_range() {
    let mut doc = Document::from_bytes(&hex!("3b ff ff ff ff ff ff ff ff")).unwrap();
    assert_eq!(
        doc.read_int().unwrap_err().code,
        ErrorCode::IntegerOutOfRange
    );

    let mut doc = Document::from_bytes(&hex!("1b ff ff ff ff ff ff ff ff")).unwrap();
    assert_eq!(
        doc.read_int().unwrap_err().code,
        ErrorCode::IntegerOutOfRange
    );
}

#[test]
fn narrow_reads_check_range() {
    let mut doc = Document::from_bytes(&hex!("19 01 00")).unwrap();
    assert_eq!(doc.read::<u16>().unwrap(), 256);
    assert_eq!(
        doc.read::<u8>().unwrap_err().code,
        ErrorCode::IntegerOutOfRange
    );

    let mut doc = Document::from_bytes(&hex!("38 7f")).unwrap();
    assert_eq!(doc.read::<i8>().unwrap(), -128);
}

#[test]
fn reserved_additional_info_is_rejected() {
    let mut doc = Document::from_bytes(&hex!("1c")).unwrap();
    assert_eq!(
        doc.read_uint().unwrap_err().code,
        ErrorCode::ReservedAdditionalInfo
    );
}

#[test]
fn truncated_argument_is_eof() {
    let mut doc = Document::from_bytes(&hex!("19 01")).unwrap();
    let err = doc.read_uint().unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.offset, 1);
}

#[test]
fn read_text_validates_utf8() {
    let mut doc = Document::from_bytes(&hex!("62 ff fe")).unwrap();
    assert_eq!(doc.read_text().unwrap_err().code, ErrorCode::Utf8Invalid);

    let mut doc = Document::from_bytes(&hex!("63 e2 82 ac")).unwrap();
    assert_eq!(doc.read_text().unwrap(), "\u{20ac}");
}

#[test]
fn chunked_text_cannot_be_read() {
    let mut doc = Document::from_bytes(&hex!("7f 61 61 61 62 ff")).unwrap();
    assert_eq!(
        doc.read_text().unwrap_err().code,
        ErrorCode::IndefiniteLengthString
    );
    // It can still be measured.
    assert_eq!(doc.data_item_size().unwrap(), 6);
}

#[test]
fn kind_classifies_initial_byte() {
    let cases: &[(&[u8], CborKind)] = &[
        (&hex!("00"), CborKind::Unsigned),
        (&hex!("20"), CborKind::Negative),
        (&hex!("40"), CborKind::Bytes),
        (&hex!("60"), CborKind::Text),
        (&hex!("80"), CborKind::Array),
        (&hex!("bf ff"), CborKind::Map),
        (&hex!("c1 00"), CborKind::Tag),
        (&hex!("f9 3c 00"), CborKind::Float),
        (&hex!("f5"), CborKind::Simple),
        (&hex!("ff"), CborKind::Break),
    ];
    for (bytes, kind) in cases {
        let doc = Document::from_bytes(bytes).unwrap();
        assert_eq!(doc.kind().unwrap(), *kind);
    }
    assert_eq!(
        Document::new().kind().unwrap_err().code,
        ErrorCode::UnexpectedEof
    );
}

#[test]
fn data_item_size_and_skip() {
    let mut doc = Document::from_bytes(&hex!("a1 61 61 82 01 02 18 2a")).unwrap();
    assert_eq!(doc.data_item_size().unwrap(), 6);
    doc.skip_item().unwrap();
    assert_eq!(doc.cursor(), 6);
    assert_eq!(doc.read_uint().unwrap(), 42);
}

#[test]
fn depth_limit_applies_to_measurement() {
    let mut limits = cbor_doc::DocumentLimits::default();
    limits.max_depth = 1;
    let mut doc = Document::from_bytes_with_limits(&hex!("81 81 00"), limits).unwrap();
    assert_eq!(
        doc.data_item_size().unwrap_err().code,
        ErrorCode::DepthLimitExceeded
    );
}
