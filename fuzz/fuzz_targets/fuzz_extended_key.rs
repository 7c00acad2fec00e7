#![no_main]

use flipbip_hd_key::HDNode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary strings must be rejected without panicking
    if let Ok(node) = HDNode::from_extended_key(data) {
        let reencoded = if node.is_private() {
            node.to_xprv().expect("private node serializes").to_string()
        } else {
            node.to_xpub()
        };
        assert_eq!(reencoded, data.trim());
    }
});
