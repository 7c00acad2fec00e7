use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Everything a session hands back to the caller.
///
/// Extended private keys and the optional mnemonic are wiped when the set
/// is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeySet {
    /// Ticker of the coin the keys were derived for
    pub coin: String,
    /// BIP-44 path of the chain node, e.g. `m/44'/60'/0'/0`
    pub path: String,
    /// Mnemonic text, only filled in when display was requested
    pub mnemonic: Option<String>,
    pub xprv_root: String,
    pub xprv_account: String,
    pub xpub_account: String,
    pub xprv_chain: String,
    pub xpub_chain: String,
    /// Addresses `0..n` on the external chain
    pub addresses: Vec<String>,
}

impl DerivedKeySet {
    /// Path of address `index`
    pub fn address_path(&self, index: usize) -> String {
        format!("{}/{}", self.path, index)
    }
}

impl fmt::Debug for DerivedKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeySet")
            .field("coin", &self.coin)
            .field("path", &self.path)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("xprv_root", &"<redacted>")
            .field("xprv_account", &"<redacted>")
            .field("xpub_account", &self.xpub_account)
            .field("xprv_chain", &"<redacted>")
            .field("xpub_chain", &self.xpub_chain)
            .field("addresses", &self.addresses)
            .finish()
    }
}
