#![no_main]

use libfuzzer_sys::fuzz_target;

use cbor_doc::Document;

// Each op is two bytes: an opcode and an argument. Keys come from a small alphabet so updates
// hit existing entries often.
fuzz_target!(|data: &[u8]| {
    let mut doc = Document::new();
    let mut shadow: Vec<(String, u64)> = Vec::new();

    for op in data.chunks_exact(2) {
        let key = String::from(char::from(b'a' + op[1] % 8));
        let value = u64::from(op[1]).pow(u32::from(op[0] % 5));
        match op[0] % 3 {
            0 => {
                doc.assign_key(&key, value).expect("assign");
                match shadow.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => shadow.push((key, value)),
                }
            }
            1 => {
                let mut child = Document::new();
                child.assign_key("n", value).expect("child");
                doc.assign_key(&key, &child).expect("nested");
                shadow.retain(|(k, _)| *k != key);
            }
            _ => {
                let found = doc.find_key(&key).expect("find");
                let expected = shadow.iter().find(|(k, _)| *k == key);
                if let Some((_, v)) = expected {
                    assert!(found);
                    assert_eq!(doc.read_uint().expect("read"), *v);
                }
            }
        }
        assert_eq!(doc.map_end(), doc.len());
    }

    for (k, v) in &shadow {
        assert_eq!(doc.get::<u64>(k).expect("get"), Some(*v));
    }
});
