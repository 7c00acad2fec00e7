#![no_main]

use flipbip_mnemonics::{check, validate, Mnemonic};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing must never panic, only reject
    let parsed = Mnemonic::parse(data);
    assert_eq!(parsed.is_ok(), validate(data));
    assert_eq!(check(data).is_ok(), validate(data));

    if let Ok(mnemonic) = parsed {
        assert!(matches!(mnemonic.word_count(), 12 | 18 | 24));
        let again = Mnemonic::parse(mnemonic.phrase()).expect("canonical phrase parses");
        assert_eq!(again.phrase(), mnemonic.phrase());
    }
});
