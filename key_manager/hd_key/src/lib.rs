//! # FlipBip HD Key
//!
//! BIP-32 hierarchical deterministic keys on secp256k1, laid out along the
//! BIP-44 path `m/44'/coin'/account'/0/index`:
//!
//! - [`HDNode`] holds one node and derives hardened or normal children
//! - [`KeyTree`] keeps the root, account and external chain nodes of a coin
//! - [`serialize_private`] / [`serialize_public`] / [`parse_extended_key`]
//!   handle xprv and xpub strings
//! - [`derive_address`] renders P2PKH or Ethereum addresses from a chain node
//! - [`CoinTable`] maps tickers to [`CoinProfile`]s
//!
//! ```
//! use flipbip_hd_key::{CoinProfile, EthereumFormat, KeyTree};
//! use flipbip_mnemonics::{Mnemonic, Seed};
//!
//! let phrase = "abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon about";
//! let seed = Seed::from_mnemonic(&Mnemonic::parse(phrase)?, "");
//! let tree = KeyTree::from_seed(seed.as_bytes(), &CoinProfile::BTC)?;
//! assert_eq!(
//!     tree.address(0, EthereumFormat::default())?,
//!     "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"
//! );
//! # Ok::<(), flipbip_error::FlipbipError>(())
//! ```

#![forbid(unsafe_code)]

pub mod address;
pub mod coin;
pub mod hash;
mod node;
mod serialize;
mod tree;

pub use address::{
    derive_address, derive_address_formatted, derive_addresses, eip55_checksum,
    ethereum_address, p2pkh_address, private_key_wif, EthereumFormat,
};
pub use coin::{AddressFormat, CoinProfile, CoinTable};
pub use node::{HDNode, HARDENED_BIT};
pub use serialize::{
    parse_extended_key, serialize_private, serialize_public, EXTENDED_KEY_LEN, XPRV_VERSION,
    XPUB_VERSION,
};
pub use tree::{account_node, chain_node, KeyTree, BIP44_PURPOSE, EXTERNAL_CHAIN};

pub use flipbip_error::{FlipbipError, Result};
