//! Address rendering for chain nodes.
//!
//! Each call derives its own scratch child from the borrowed chain node; the
//! scratch is dropped (and wiped) before the function returns, so calls can
//! happen in any order and never disturb the chain node.

use std::ops::Range;

use flipbip_error::{FlipbipError, Result};
use tracing::debug;
use zeroize::Zeroizing;

use crate::coin::{AddressFormat, CoinProfile};
use crate::hash::{base58check_encode, hash160, keccak256};
use crate::node::HDNode;

/// Rendering of Ethereum addresses
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthereumFormat {
    /// EIP-55 mixed-case checksum
    Checksummed,
    /// All lowercase hex
    #[default]
    NonChecksummed,
}

impl EthereumFormat {
    /// Maps the configuration flag to a format
    pub fn from_checksum_flag(checksummed: bool) -> Self {
        if checksummed {
            Self::Checksummed
        } else {
            Self::NonChecksummed
        }
    }
}

/// Address of child `index` of `chain_node`, Ethereum addresses in lowercase
pub fn derive_address(chain_node: &HDNode, coin: &CoinProfile, index: u32) -> Result<String> {
    derive_address_formatted(chain_node, coin, index, EthereumFormat::NonChecksummed)
}

/// Address of child `index` of `chain_node` with an explicit Ethereum format
pub fn derive_address_formatted(
    chain_node: &HDNode,
    coin: &CoinProfile,
    index: u32,
    eth_format: EthereumFormat,
) -> Result<String> {
    let scratch = chain_node.derive_normal(index).map_err(|e| {
        debug!(coin = %coin.ticker, index, error = %e, "address derivation failed");
        e
    })?;
    match coin.addr_format {
        AddressFormat::P2pkhSha256d => Ok(p2pkh_address(scratch.public_key(), coin.addr_version)),
        AddressFormat::EthereumKeccak => {
            let address = ethereum_address(&scratch)?;
            Ok(match eth_format {
                EthereumFormat::Checksummed => eip55_checksum(&address),
                EthereumFormat::NonChecksummed => format!("0x{}", hex::encode(address)),
            })
        }
    }
}

/// Addresses for every index in `range`, in order
pub fn derive_addresses(
    chain_node: &HDNode,
    coin: &CoinProfile,
    range: Range<u32>,
    eth_format: EthereumFormat,
) -> Result<Vec<String>> {
    range
        .map(|index| derive_address_formatted(chain_node, coin, index, eth_format))
        .collect()
}

/// Base58Check(version || HASH160(compressed public key))
pub fn p2pkh_address(public_key: &[u8; 33], version: u8) -> String {
    let mut payload = [0u8; 21];
    payload[0] = version;
    payload[1..].copy_from_slice(&hash160(public_key));
    base58check_encode(&payload)
}

/// Raw 20-byte Ethereum address of a node
pub fn ethereum_address(node: &HDNode) -> Result<[u8; 20]> {
    let uncompressed = node.uncompressed_public_key()?;
    let hash = keccak256(&uncompressed[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Ok(out)
}

/// EIP-55 checksummed "0x…" rendering of a 20-byte address
pub fn eip55_checksum(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Wallet import format of the node's private key
pub fn private_key_wif(node: &HDNode, coin: &CoinProfile, compressed: bool) -> Result<Zeroizing<String>> {
    let private_key = node.private_key().ok_or(FlipbipError::MissingPrivateKey)?;
    let mut payload = Zeroizing::new(Vec::with_capacity(34));
    payload.push(coin.wif_version);
    payload.extend_from_slice(private_key);
    if compressed {
        payload.push(0x01);
    }
    Ok(Zeroizing::new(base58check_encode(&payload)))
}
