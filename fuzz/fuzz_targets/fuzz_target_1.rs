#![no_main]
use libfuzzer_sys::fuzz_target;

use arbor_json::parse_str;

fuzz_target!(|data: &[u8]| {
    // The fuzzer hands us raw bytes; only valid UTF-8 can be JSON
    // text. We are hunting panics, so the parse result itself is
    // discarded.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = parse_str(s) {
            // Walk the whole tree so bad links would be exercised.
            if let Some(root) = doc.root_id() {
                let mut stack = vec![root];
                while let Some(id) = stack.pop() {
                    for (child, _) in doc.children(id) {
                        stack.push(child);
                    }
                }
            }
        }
    }
});
