//! One-shot wallet sessions.
//!
//! A [`WalletSession`] walks the derivation pipeline exactly once through
//! `Loading → MnemonicReady → SeedDerived → RootDerived → AccountDerived →
//! ChainDerived → AddressesDerived(n) → Done`. Any failure parks the session
//! in a terminal error state; a finished or failed session refuses further
//! runs with [`FlipbipError::InvalidState`].

use std::fmt;

use flipbip_error::{FlipbipError, Result};
use flipbip_hd_key::{account_node, chain_node, CoinProfile, CoinTable, HDNode, KeyTree};
use flipbip_mnemonics::{EntropySource, Mnemonic, MnemonicStrength, Seed};
use tracing::{debug, info, warn};

use crate::config::WalletConfig;
use crate::keyset::DerivedKeySet;
use crate::storage::SecretStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Loading,
    MnemonicReady,
    SeedDerived,
    RootDerived,
    AccountDerived,
    ChainDerived,
    AddressesDerived(u32),
    Done,
    MnemonicInvalid,
    DerivationFailed,
    StorageLoadFailed,
    StorageSaveFailed,
}

impl SessionState {
    /// True for `Done` and the error states
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Done
                | Self::MnemonicInvalid
                | Self::DerivationFailed
                | Self::StorageLoadFailed
                | Self::StorageSaveFailed
        )
    }

    pub fn is_failure(self) -> bool {
        self.is_terminal() && self != Self::Done
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressesDerived(n) => write!(f, "AddressesDerived({n})"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// Derivation pipeline bound to a secret store and a configuration
pub struct WalletSession<S> {
    store: S,
    config: WalletConfig,
    coins: CoinTable,
    state: SessionState,
    history: Vec<SessionState>,
}

impl<S: SecretStore> WalletSession<S> {
    /// Validates `config` and prepares a fresh session
    pub fn new(store: S, config: WalletConfig) -> Result<Self> {
        config.validate()?;
        let coins = config.coin_table()?;
        Ok(Self {
            store,
            config,
            coins,
            state: SessionState::Loading,
            history: vec![SessionState::Loading],
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every state entered so far, starting with `Loading`
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn coins(&self) -> &CoinTable {
        &self.coins
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the stored mnemonic and derives keys from it
    pub fn view(&mut self, passphrase: &str, coin: &str) -> Result<DerivedKeySet> {
        let coin = self.start("view", coin)?;
        let stored = match self.store.load_secret() {
            Ok(Some(phrase)) => phrase,
            Ok(None) => {
                return Err(self.fail(
                    SessionState::StorageLoadFailed,
                    FlipbipError::StorageLoadFailure("no stored mnemonic".into()),
                ))
            }
            Err(e) => return Err(self.fail(SessionState::StorageLoadFailed, e)),
        };
        let mnemonic = match Mnemonic::parse(&stored) {
            Ok(mnemonic) => mnemonic,
            Err(e) => return Err(self.fail(SessionState::MnemonicInvalid, e)),
        };
        drop(stored);
        self.advance(SessionState::MnemonicReady);
        self.derive(&mnemonic, passphrase, &coin)
    }

    /// Generates a new mnemonic, stores it and derives keys from it
    pub fn generate<E: EntropySource + ?Sized>(
        &mut self,
        entropy: &mut E,
        strength: MnemonicStrength,
        passphrase: &str,
        coin: &str,
    ) -> Result<DerivedKeySet> {
        let coin = self.start("generate", coin)?;
        let mnemonic = match Mnemonic::generate(entropy, strength) {
            Ok(mnemonic) => mnemonic,
            Err(e) => return Err(self.fail(SessionState::DerivationFailed, e)),
        };
        self.advance(SessionState::MnemonicReady);
        self.persist(&mnemonic)?;
        self.derive(&mnemonic, passphrase, &coin)
    }

    /// Validates a user supplied phrase, stores it and derives keys from it
    pub fn import(&mut self, phrase: &str, passphrase: &str, coin: &str) -> Result<DerivedKeySet> {
        let coin = self.start("import", coin)?;
        let mnemonic = match Mnemonic::parse(phrase) {
            Ok(mnemonic) => mnemonic,
            Err(e) => return Err(self.fail(SessionState::MnemonicInvalid, e)),
        };
        self.advance(SessionState::MnemonicReady);
        self.persist(&mnemonic)?;
        self.derive(&mnemonic, passphrase, &coin)
    }

    fn start(&mut self, flow: &str, ticker: &str) -> Result<CoinProfile> {
        if self.state != SessionState::Loading {
            return Err(FlipbipError::InvalidState(format!(
                "session already in state {}",
                self.state
            )));
        }
        let coin = self.coins.get(ticker)?.clone();
        info!(flow, coin = %coin.ticker, account = self.config.account, "session started");
        Ok(coin)
    }

    fn persist(&mut self, mnemonic: &Mnemonic) -> Result<()> {
        match self.store.save_secret(mnemonic.phrase()) {
            Ok(()) => {
                debug!("mnemonic stored");
                Ok(())
            }
            Err(e) => Err(self.fail(SessionState::StorageSaveFailed, e)),
        }
    }

    fn derive(
        &mut self,
        mnemonic: &Mnemonic,
        passphrase: &str,
        coin: &CoinProfile,
    ) -> Result<DerivedKeySet> {
        let seed = Seed::from_mnemonic(mnemonic, passphrase);
        self.advance(SessionState::SeedDerived);

        let root = self.step(HDNode::from_seed(seed.as_bytes()))?;
        drop(seed);
        self.advance(SessionState::RootDerived);

        let account = self.step(account_node(&root, coin, self.config.account))?;
        self.advance(SessionState::AccountDerived);

        let chain = self.step(chain_node(&account, flipbip_hd_key::EXTERNAL_CHAIN))?;
        self.advance(SessionState::ChainDerived);

        let tree = KeyTree::from_parts(coin.clone(), self.config.account, root, account, chain);
        let count = self.config.address_count;
        let addresses = self.step(tree.addresses(0..count, self.config.eth_format()))?;
        self.advance(SessionState::AddressesDerived(count));

        let keys = DerivedKeySet {
            coin: coin.ticker.to_string(),
            path: tree.path(),
            mnemonic: self
                .config
                .display_mnemonic
                .then(|| mnemonic.phrase().to_string()),
            xprv_root: self.step(tree.root_xprv())?.to_string(),
            xprv_account: self.step(tree.account_xprv())?.to_string(),
            xpub_account: tree.account_xpub(),
            xprv_chain: self.step(tree.chain_xprv())?.to_string(),
            xpub_chain: tree.chain_xpub(),
            addresses,
        };
        self.advance(SessionState::Done);
        info!(coin = %keys.coin, path = %keys.path, addresses = keys.addresses.len(), "session done");
        Ok(keys)
    }

    fn step<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|e| self.fail(SessionState::DerivationFailed, e))
    }

    fn advance(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
        self.history.push(next);
    }

    fn fail(&mut self, terminal: SessionState, error: FlipbipError) -> FlipbipError {
        warn!(from = %self.state, to = %terminal, error = %error, "session failed");
        self.state = terminal;
        self.history.push(terminal);
        error
    }
}

impl<S> fmt::Debug for WalletSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("state", &self.state)
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use flipbip_testing::vectors::*;
    use flipbip_testing::{FailingEntropy, FixedEntropy};
    use SessionState::*;

    fn session(store: MemoryStore) -> WalletSession<MemoryStore> {
        WalletSession::new(store, WalletConfig::default()).unwrap()
    }

    #[test]
    fn test_view_walks_every_state() {
        let mut s = session(MemoryStore::with_secret(ABANDON_ABOUT));
        let keys = s.view("", "BTC").unwrap();
        assert_eq!(keys.addresses[0], ABANDON_ABOUT_BTC_ADDRESS_0);
        assert_eq!(keys.xpub_account, ABANDON_ABOUT_BTC_ACCOUNT_XPUB);
        assert_eq!(
            s.history(),
            &[
                Loading,
                MnemonicReady,
                SeedDerived,
                RootDerived,
                AccountDerived,
                ChainDerived,
                AddressesDerived(6),
                Done
            ]
        );
    }

    #[test]
    fn test_view_without_stored_mnemonic() {
        let mut s = session(MemoryStore::new());
        let err = s.view("", "BTC").unwrap_err();
        assert!(matches!(err, FlipbipError::StorageLoadFailure(_)));
        assert_eq!(s.state(), StorageLoadFailed);
        assert_eq!(err.status_message(), "Load error");
    }

    #[test]
    fn test_view_load_failure() {
        let mut s = session(MemoryStore::failing_load());
        assert!(s.view("", "ETH").is_err());
        assert_eq!(s.history(), &[Loading, StorageLoadFailed]);
    }

    #[test]
    fn test_view_corrupt_stored_mnemonic() {
        let mut s = session(MemoryStore::with_secret(&"abandon ".repeat(12)));
        assert!(matches!(s.view("", "BTC"), Err(FlipbipError::MnemonicChecksumInvalid)));
        assert_eq!(s.state(), MnemonicInvalid);
    }

    #[test]
    fn test_generate_persists_mnemonic() {
        let mut s = session(MemoryStore::new());
        let keys = s
            .generate(&mut FixedEntropy::zeros(), MnemonicStrength::Bits128, "", "BTC")
            .unwrap();
        assert_eq!(keys.addresses[0], ABANDON_ABOUT_BTC_ADDRESS_0);
        assert!(keys.mnemonic.is_none());
        assert_eq!(s.state(), Done);
        assert_eq!(s.store().load_secret().unwrap().unwrap().as_str(), ABANDON_ABOUT);
    }

    #[test]
    fn test_generate_entropy_failure() {
        let mut s = session(MemoryStore::new());
        let err = s
            .generate(&mut FailingEntropy, MnemonicStrength::Bits256, "", "BTC")
            .unwrap_err();
        assert!(matches!(err, FlipbipError::EntropyFailure(_)));
        assert_eq!(s.state(), DerivationFailed);
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_generate_save_failure() {
        let mut s = session(MemoryStore::failing_save());
        let err = s
            .generate(&mut FixedEntropy::zeros(), MnemonicStrength::Bits128, "", "BTC")
            .unwrap_err();
        assert_eq!(err.status_message(), "Save error");
        assert_eq!(s.history(), &[Loading, MnemonicReady, StorageSaveFailed]);
    }

    #[test]
    fn test_import_rejects_bad_phrase() {
        let mut s = session(MemoryStore::new());
        assert!(s.import("abandon abandon", "", "BTC").is_err());
        assert_eq!(s.state(), MnemonicInvalid);
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_import_eth_with_display() {
        let config = WalletConfig {
            display_mnemonic: true,
            eth_checksum: true,
            address_count: 3,
            ..WalletConfig::default()
        };
        let mut s = WalletSession::new(MemoryStore::new(), config).unwrap();
        let keys = s.import(ABANDON_ABOUT, "", "eth").unwrap();
        assert_eq!(keys.addresses.len(), 3);
        assert_eq!(keys.addresses[0], ABANDON_ABOUT_ETH_ADDRESS_0_EIP55);
        assert_eq!(keys.mnemonic.as_deref(), Some(ABANDON_ABOUT));
        assert_eq!(keys.path, "m/44'/60'/0'/0");
        assert_eq!(s.history().last(), Some(&Done));
    }

    #[test]
    fn test_session_runs_once() {
        let mut s = session(MemoryStore::with_secret(ABANDON_ABOUT));
        s.view("", "BTC").unwrap();
        assert!(matches!(s.view("", "BTC"), Err(FlipbipError::InvalidState(_))));

        let mut failed = session(MemoryStore::new());
        let _ = failed.view("", "BTC");
        assert!(matches!(
            failed.import(ABANDON_ABOUT, "", "BTC"),
            Err(FlipbipError::InvalidState(_))
        ));
        assert_eq!(failed.state(), StorageLoadFailed);
    }

    #[test]
    fn test_unknown_coin_leaves_session_unstarted() {
        let mut s = session(MemoryStore::with_secret(ABANDON_ABOUT));
        assert!(matches!(s.view("", "XYZ"), Err(FlipbipError::UnknownCoin(_))));
        assert_eq!(s.history(), &[Loading]);
        assert!(s.view("", "DOGE").is_ok());
    }

    #[test]
    fn test_passphrase_changes_keys() {
        let plain = session(MemoryStore::with_secret(ABANDON_ABOUT)).view("", "BTC").unwrap();
        let salted = session(MemoryStore::with_secret(ABANDON_ABOUT))
            .view("TREZOR", "BTC")
            .unwrap();
        assert_ne!(plain.xprv_root, salted.xprv_root);
        assert_ne!(plain.addresses, salted.addresses);
    }
}
