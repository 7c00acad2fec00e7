//! End-to-end wallet flows over a real keystore file

use flipbip_core::{
    FlipbipError, KeystoreFile, MemoryStore, Mnemonic, MnemonicStrength, SecretStore,
    SessionState, WalletConfig, WalletSession,
};
use flipbip_hd_key::{derive_address, CoinProfile, HDNode, KeyTree};
use flipbip_mnemonics::Seed;
use flipbip_testing::vectors::*;
use flipbip_testing::{contains_subslice, is_zeroed, FixedEntropy};
use rand::rngs::OsRng;
use zeroize::Zeroize;

const ITERATIONS: u32 = 16;

fn keystore(dir: &tempfile::TempDir, password: &str) -> KeystoreFile {
    KeystoreFile::new(dir.path().join("wallet.json"), password).with_iterations(ITERATIONS)
}

#[test]
fn test_import_then_view_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = WalletSession::new(keystore(&dir, "pw"), WalletConfig::default()).unwrap();
    let imported = first.import(ABANDON_ABOUT, "", "BTC").unwrap();

    let mut second = WalletSession::new(keystore(&dir, "pw"), WalletConfig::default()).unwrap();
    let viewed = second.view("", "BTC").unwrap();

    assert_eq!(imported, viewed);
    assert_eq!(viewed.addresses[0], ABANDON_ABOUT_BTC_ADDRESS_0);
    assert_eq!(viewed.addresses.len(), 6);
    assert_eq!(second.state(), SessionState::Done);
}

#[test]
fn test_view_with_wrong_password() {
    let dir = tempfile::tempdir().unwrap();
    WalletSession::new(keystore(&dir, "right"), WalletConfig::default())
        .unwrap()
        .import(ABANDON_ABOUT, "", "ETH")
        .unwrap();

    let mut session =
        WalletSession::new(keystore(&dir, "wrong"), WalletConfig::default()).unwrap();
    let err = session.view("", "ETH").unwrap_err();
    assert!(matches!(err, FlipbipError::StorageLoadFailure(_)));
    assert_eq!(session.state(), SessionState::StorageLoadFailed);
}

#[test]
fn test_generate_with_os_entropy_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = WalletConfig {
        display_mnemonic: true,
        ..WalletConfig::default()
    };
    let mut session = WalletSession::new(keystore(&dir, "pw"), config).unwrap();
    let keys = session
        .generate(&mut OsRng, MnemonicStrength::Bits256, "extra words", "DOGE")
        .unwrap();

    let phrase = keys.mnemonic.clone().unwrap();
    assert_eq!(phrase.split_whitespace().count(), 24);
    let stored = keystore(&dir, "pw").load_secret().unwrap().unwrap();
    assert_eq!(stored.as_str(), phrase);
    assert!(keys.addresses.iter().all(|a| a.starts_with('D')));
    assert!(keys.xprv_root.starts_with("dgpv"));
}

#[test]
fn test_chain_xpub_reproduces_session_addresses() {
    let mut session = WalletSession::new(
        MemoryStore::new(),
        WalletConfig {
            address_count: 10,
            ..WalletConfig::default()
        },
    )
    .unwrap();
    let keys = session
        .generate(&mut FixedEntropy::new(vec![0x42]), MnemonicStrength::Bits192, "", "BTC")
        .unwrap();

    let watch_only = HDNode::from_extended_key(&keys.xpub_chain).unwrap();
    for (index, address) in keys.addresses.iter().enumerate() {
        assert_eq!(
            &derive_address(&watch_only, &CoinProfile::BTC, index as u32).unwrap(),
            address
        );
    }
}

#[test]
fn test_second_account() {
    let config = WalletConfig {
        account: 1,
        ..WalletConfig::default()
    };
    let mut session = WalletSession::new(MemoryStore::new(), config).unwrap();
    let keys = session.import(ABANDON_ABOUT, "", "BTC").unwrap();
    assert_eq!(keys.path, "m/44'/0'/1'/0");
    assert_ne!(keys.addresses[0], ABANDON_ABOUT_BTC_ADDRESS_0);
}

#[test]
fn test_completed_session_leaves_no_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let mut seed = Seed::from_mnemonic(&Mnemonic::parse(ABANDON_ABOUT).unwrap(), "");

    let mut session = WalletSession::new(keystore(&dir, "pw"), WalletConfig::default()).unwrap();
    let mut keys = session.import(ABANDON_ABOUT, "", "BTC").unwrap();

    // the keystore file only holds ciphertext
    let on_disk = std::fs::read(dir.path().join("wallet.json")).unwrap();
    assert!(!contains_subslice(&on_disk, ABANDON_ABOUT.as_bytes()));
    assert!(!contains_subslice(&on_disk, seed.as_bytes()));
    assert!(!contains_subslice(&on_disk, hex::encode(seed.as_bytes()).as_bytes()));
    assert!(!dir.path().join("wallet.tmp").exists());

    let debug = format!("{session:?} {keys:?}");
    for secret in [
        ABANDON_ABOUT,
        keys.xprv_root.as_str(),
        keys.xprv_account.as_str(),
        keys.xprv_chain.as_str(),
    ] {
        assert!(!contains_subslice(debug.as_bytes(), secret.as_bytes()));
    }

    keys.zeroize();
    assert!(keys.mnemonic.is_none());
    assert!(keys.xprv_root.is_empty());
    assert!(keys.xprv_account.is_empty());
    assert!(keys.xprv_chain.is_empty());

    // seed and chain node are wiped in place
    let mut chain = KeyTree::from_seed(seed.as_bytes(), &CoinProfile::BTC)
        .unwrap()
        .chain()
        .clone();
    assert!(!is_zeroed(chain.chain_code()));
    seed.zeroize();
    assert!(is_zeroed(seed.as_bytes()));
    chain.zeroize();
    assert!(chain.private_key().is_none());
    assert!(is_zeroed(chain.chain_code()));
}

#[test]
fn test_failed_sessions_leave_no_secrets() {
    let config = WalletConfig {
        display_mnemonic: true,
        ..WalletConfig::default()
    };

    // save fails after the phrase was accepted
    let mut session = WalletSession::new(MemoryStore::failing_save(), config.clone()).unwrap();
    let err = session.import(ABANDON_ABOUT, "", "BTC").unwrap_err();
    assert_eq!(session.state(), SessionState::StorageSaveFailed);
    assert!(session.store().is_empty());
    let report = format!("{err} {err:?} {session:?}");
    assert!(!contains_subslice(report.as_bytes(), b"abandon"));

    // bad checksum
    let bad_phrase = "abandon ".repeat(12);
    let mut session = WalletSession::new(MemoryStore::new(), config.clone()).unwrap();
    let err = session.import(&bad_phrase, "", "BTC").unwrap_err();
    assert_eq!(session.state(), SessionState::MnemonicInvalid);
    assert!(session.store().is_empty());
    let report = format!("{err} {err:?} {session:?}");
    assert!(!contains_subslice(report.as_bytes(), b"abandon"));

    // wrong password against a real keystore
    let dir = tempfile::tempdir().unwrap();
    WalletSession::new(keystore(&dir, "s3cret-right"), config.clone())
        .unwrap()
        .import(ABANDON_ABOUT, "", "BTC")
        .unwrap();
    let mut session = WalletSession::new(keystore(&dir, "s3cret-wrong"), config).unwrap();
    let err = session.view("", "BTC").unwrap_err();
    assert_eq!(session.state(), SessionState::StorageLoadFailed);
    let report = format!("{err} {err:?} {session:?} {:?}", session.store());
    assert!(!contains_subslice(report.as_bytes(), b"abandon"));
    assert!(!contains_subslice(report.as_bytes(), b"s3cret"));
}
