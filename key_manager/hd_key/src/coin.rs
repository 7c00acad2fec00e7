use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use flipbip_error::{FlipbipError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::serialize::{XPRV_VERSION, XPUB_VERSION};

/// How a public key is turned into an address string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFormat {
    /// Base58Check(version || RIPEMD160(SHA256(compressed pubkey)))
    P2pkhSha256d,
    /// "0x" || last 20 bytes of Keccak256(uncompressed pubkey without prefix)
    EthereumKeccak,
}

/// Version bytes and address rules of one BIP-44 coin.
///
/// Version fields serialize as `"0x…"` strings; plain integers are accepted
/// when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinProfile {
    /// Short symbol used for lookup, e.g. "BTC"
    pub ticker: Cow<'static, str>,
    /// Human readable name
    pub name: Cow<'static, str>,
    /// `coin_type` in `m/44'/coin_type'/…`
    pub bip44_coin_index: u32,
    /// Extended private key version bytes
    #[serde(with = "hex_version")]
    pub xprv_version: u32,
    /// Extended public key version bytes
    #[serde(with = "hex_version")]
    pub xpub_version: u32,
    /// P2PKH address version byte
    pub addr_version: u8,
    /// WIF version byte
    pub wif_version: u8,
    /// Address rendering algorithm
    pub addr_format: AddressFormat,
}

impl CoinProfile {
    /// Bitcoin mainnet
    pub const BTC: CoinProfile = CoinProfile {
        ticker: Cow::Borrowed("BTC"),
        name: Cow::Borrowed("Bitcoin"),
        bip44_coin_index: 0,
        xprv_version: XPRV_VERSION,
        xpub_version: XPUB_VERSION,
        addr_version: 0x00,
        wif_version: 0x80,
        addr_format: AddressFormat::P2pkhSha256d,
    };

    /// Ethereum mainnet. Extended keys use the Bitcoin version bytes.
    pub const ETH: CoinProfile = CoinProfile {
        ticker: Cow::Borrowed("ETH"),
        name: Cow::Borrowed("Ethereum"),
        bip44_coin_index: 60,
        xprv_version: XPRV_VERSION,
        xpub_version: XPUB_VERSION,
        addr_version: 0x00,
        wif_version: 0x80,
        addr_format: AddressFormat::EthereumKeccak,
    };

    /// Dogecoin mainnet
    pub const DOGE: CoinProfile = CoinProfile {
        ticker: Cow::Borrowed("DOGE"),
        name: Cow::Borrowed("Dogecoin"),
        bip44_coin_index: 3,
        xprv_version: 0x02fa_c398,
        xpub_version: 0x02fa_cafd,
        addr_version: 0x1e,
        wif_version: 0x9e,
        addr_format: AddressFormat::P2pkhSha256d,
    };

    /// Ticker as written in the profile
    pub fn ticker(&self) -> &str {
        &self.ticker
    }
}

impl fmt::Display for CoinProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ticker)
    }
}

/// Coin profiles indexed by upper-cased ticker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinTable {
    profiles: BTreeMap<String, CoinProfile>,
}

impl CoinTable {
    /// Table with BTC, ETH and DOGE
    pub fn builtin() -> Self {
        let profiles = [CoinProfile::BTC, CoinProfile::ETH, CoinProfile::DOGE]
            .into_iter()
            .map(|p| (p.ticker.to_ascii_uppercase(), p))
            .collect();
        Self { profiles }
    }

    /// Built-in table extended with `extra`. Any ticker clash is a
    /// configuration error.
    pub fn with_extra<I>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = CoinProfile>,
    {
        let mut table = Self::builtin();
        for profile in extra {
            table.insert(profile)?;
        }
        Ok(table)
    }

    /// Adds a profile, rejecting duplicate tickers
    pub fn insert(&mut self, profile: CoinProfile) -> Result<()> {
        let key = profile.ticker.trim().to_ascii_uppercase();
        if key.is_empty() {
            return Err(FlipbipError::ConfigError("coin profile with empty ticker".into()));
        }
        if self.profiles.contains_key(&key) {
            return Err(FlipbipError::ConfigError(format!("duplicate coin ticker {key}")));
        }
        self.profiles.insert(key, profile);
        Ok(())
    }

    /// Case-insensitive lookup by ticker
    pub fn get(&self, ticker: &str) -> Result<&CoinProfile> {
        self.profiles
            .get(&ticker.trim().to_ascii_uppercase())
            .ok_or_else(|| FlipbipError::UnknownCoin(ticker.to_string()))
    }

    /// Profiles in ticker order
    pub fn iter(&self) -> impl Iterator<Item = &CoinProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for CoinTable {
    fn default() -> Self {
        Self::builtin()
    }
}

mod hex_version {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#010x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => {
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .unwrap_or(&s);
                u32::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
            }
        }
    }
}
