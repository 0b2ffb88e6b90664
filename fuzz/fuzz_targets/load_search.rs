#![no_main]

use libfuzzer_sys::fuzz_target;

use cbor_doc::{Document, DocumentLimits};

fn fuzz_limits(input_len: usize) -> DocumentLimits {
    let mut limits = DocumentLimits::for_bytes(input_len.saturating_mul(2).max(64));
    limits.max_depth = 64;
    limits
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut doc) = Document::from_bytes_with_limits(data, fuzz_limits(data.len())) else {
        return;
    };

    let _ = doc.kind();
    let _ = doc.entry_count();
    let _ = doc.to_diagnostic();

    if let Ok(true) = doc.find_key("a") {
        // A match always lies inside the map.
        let start = doc.cursor();
        if let Ok(size) = doc.data_item_size() {
            assert!(start + size <= doc.map_end());
        }
        let _ = doc.read_uint();
        let _ = doc.read_text();
        if let Ok(sub) = doc.read_map() {
            assert_eq!(sub.map_end(), sub.len());
        }
    }

    let before = doc.as_bytes().to_vec();
    if doc.assign_key("a", 1u8).is_err() {
        assert_eq!(doc.as_bytes(), before.as_slice());
    }
    assert!(doc.cursor() <= doc.len());
    assert!(doc.map_end() <= doc.len());
});
