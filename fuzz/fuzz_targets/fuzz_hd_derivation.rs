#![no_main]

use arbitrary::Arbitrary;
use flipbip_hd_key::{HDNode, HARDENED_BIT};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DerivationInput {
    seed: Vec<u8>,
    path_segments: Vec<u32>,
    hardened_flags: Vec<bool>,
}

fuzz_target!(|input: DerivationInput| {
    let Ok(mut node) = HDNode::from_seed(&input.seed) else {
        return;
    };

    for (i, &segment) in input.path_segments.iter().take(10).enumerate() {
        let hardened = input.hardened_flags.get(i).copied().unwrap_or(false);
        let child = if hardened {
            node.derive_hardened(segment)
        } else {
            node.derive_normal(segment)
        };
        match child {
            Ok(child) => {
                assert!(segment < HARDENED_BIT);
                assert_eq!(child.parent_fingerprint(), node.fingerprint());
                assert_eq!(child.depth(), node.depth() + 1);
                if !hardened {
                    let public = node.neuter().derive_normal(segment).expect("public derivation");
                    assert_eq!(public.public_key(), child.public_key());
                }
                node = child;
            }
            Err(_) if segment >= HARDENED_BIT => {}
            Err(e) => panic!("derivation failed for {segment}: {e}"),
        }
    }
});
