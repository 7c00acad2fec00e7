use std::ops::Range;

use flipbip_error::Result;
use tracing::debug;
use zeroize::Zeroizing;

use crate::address::{derive_address_formatted, derive_addresses, EthereumFormat};
use crate::coin::CoinProfile;
use crate::node::HDNode;
use crate::serialize::{serialize_private, serialize_public};

/// BIP-44 purpose level
pub const BIP44_PURPOSE: u32 = 44;

/// External (receive) chain
pub const EXTERNAL_CHAIN: u32 = 0;

/// `m/44'/coin'/account'` below `root`
pub fn account_node(root: &HDNode, coin: &CoinProfile, account: u32) -> Result<HDNode> {
    root.derive_hardened(BIP44_PURPOSE)?
        .derive_hardened(coin.bip44_coin_index)?
        .derive_hardened(account)
}

/// `…/change` below an account node
pub fn chain_node(account: &HDNode, change: u32) -> Result<HDNode> {
    account.derive_normal(change)
}

/// Root, account and external chain nodes of one coin.
///
/// All three nodes are kept so their extended keys can be exported and the
/// chain node can be reused for any number of address lookups.
#[derive(Debug, Clone)]
pub struct KeyTree {
    coin: CoinProfile,
    account_index: u32,
    root: HDNode,
    account: HDNode,
    chain: HDNode,
}

impl KeyTree {
    /// Tree for account 0
    pub fn from_seed(seed: &[u8], coin: &CoinProfile) -> Result<Self> {
        Self::with_account(seed, coin, 0)
    }

    /// Tree for an arbitrary (non-hardened form) account index
    pub fn with_account(seed: &[u8], coin: &CoinProfile, account_index: u32) -> Result<Self> {
        let root = HDNode::from_seed(seed)?;
        Self::from_root(root, coin, account_index)
    }

    /// Tree below an existing master node
    pub fn from_root(root: HDNode, coin: &CoinProfile, account_index: u32) -> Result<Self> {
        let account = account_node(&root, coin, account_index)?;
        debug!(coin = %coin.ticker, account_index, "account node derived");
        let chain = chain_node(&account, EXTERNAL_CHAIN)?;
        debug!(coin = %coin.ticker, depth = chain.depth(), "chain node derived");
        Ok(Self::from_parts(coin.clone(), account_index, root, account, chain))
    }

    /// Assembles a tree from nodes derived elsewhere
    pub fn from_parts(
        coin: CoinProfile,
        account_index: u32,
        root: HDNode,
        account: HDNode,
        chain: HDNode,
    ) -> Self {
        Self {
            coin,
            account_index,
            root,
            account,
            chain,
        }
    }

    pub fn coin(&self) -> &CoinProfile {
        &self.coin
    }

    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    pub fn root(&self) -> &HDNode {
        &self.root
    }

    pub fn account(&self) -> &HDNode {
        &self.account
    }

    pub fn chain(&self) -> &HDNode {
        &self.chain
    }

    /// BIP-44 path of the chain node, e.g. `m/44'/0'/0'/0`
    pub fn path(&self) -> String {
        format!(
            "m/{}'/{}'/{}'/{}",
            BIP44_PURPOSE, self.coin.bip44_coin_index, self.account_index, EXTERNAL_CHAIN
        )
    }

    pub fn root_xprv(&self) -> Result<Zeroizing<String>> {
        serialize_private(&self.root, [0; 4], self.coin.xprv_version)
    }

    pub fn account_xprv(&self) -> Result<Zeroizing<String>> {
        serialize_private(&self.account, self.account.parent_fingerprint(), self.coin.xprv_version)
    }

    pub fn account_xpub(&self) -> String {
        serialize_public(&self.account, self.account.parent_fingerprint(), self.coin.xpub_version)
    }

    pub fn chain_xprv(&self) -> Result<Zeroizing<String>> {
        serialize_private(&self.chain, self.chain.parent_fingerprint(), self.coin.xprv_version)
    }

    pub fn chain_xpub(&self) -> String {
        serialize_public(&self.chain, self.chain.parent_fingerprint(), self.coin.xpub_version)
    }

    /// Address `index` on the external chain
    pub fn address(&self, index: u32, eth_format: EthereumFormat) -> Result<String> {
        derive_address_formatted(&self.chain, &self.coin, index, eth_format)
    }

    /// Addresses for `range` on the external chain
    pub fn addresses(&self, range: Range<u32>, eth_format: EthereumFormat) -> Result<Vec<String>> {
        derive_addresses(&self.chain, &self.coin, range, eth_format)
    }
}
