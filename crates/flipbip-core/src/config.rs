//! Configuration

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use flipbip_error::{FlipbipError, Result};
use flipbip_hd_key::{CoinProfile, CoinTable, EthereumFormat};
use flipbip_mnemonics::MnemonicStrength;
use serde::{Deserialize, Serialize};

use crate::storage::{DEFAULT_KDF_ITERATIONS, MAX_KDF_ITERATIONS};

/// Largest number of addresses a single session will render
pub const MAX_ADDRESS_COUNT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Strength used by `generate`
    pub strength: MnemonicStrength,
    /// Addresses rendered per session
    pub address_count: u32,
    /// BIP-44 account index
    pub account: u32,
    /// Render ETH addresses with EIP-55 casing
    pub eth_checksum: bool,
    /// Return the mnemonic text in the derived key set
    pub display_mnemonic: bool,
    pub keystore: KeystoreConfig,
    /// Profiles added to the built-in BTC/ETH/DOGE table
    pub coins: Vec<CoinProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystoreConfig {
    pub path: PathBuf,
    /// PBKDF2-HMAC-SHA256 rounds for newly sealed secrets
    pub iterations: u32,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("flipbip_keystore.json"),
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            strength: MnemonicStrength::default(),
            address_count: 6,
            account: 0,
            eth_checksum: false,
            display_mnemonic: false,
            keystore: KeystoreConfig::default(),
            coins: Vec::new(),
        }
    }
}

impl WalletConfig {
    /// Parses and validates a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FlipbipError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| FlipbipError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Writes the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ADDRESS_COUNT).contains(&self.address_count) {
            return Err(FlipbipError::ConfigError(format!(
                "address_count must be within 1..={MAX_ADDRESS_COUNT}, got {}",
                self.address_count
            )));
        }
        if self.account >= flipbip_hd_key::HARDENED_BIT {
            return Err(FlipbipError::ConfigError(format!(
                "account index {} must be below 2^31",
                self.account
            )));
        }
        if !(1..=MAX_KDF_ITERATIONS).contains(&self.keystore.iterations) {
            return Err(FlipbipError::ConfigError(format!(
                "keystore iterations must be within 1..={MAX_KDF_ITERATIONS}"
            )));
        }
        let mut seen = HashSet::new();
        for coin in &self.coins {
            if !seen.insert(coin.ticker.to_ascii_uppercase()) {
                return Err(FlipbipError::ConfigError(format!(
                    "coin {} listed twice",
                    coin.ticker
                )));
            }
        }
        // clashes with the built-in tickers surface here
        self.coin_table().map(|_| ())
    }

    /// Built-in coins plus the configured extras
    pub fn coin_table(&self) -> Result<CoinTable> {
        CoinTable::with_extra(self.coins.iter().cloned())
    }

    pub fn eth_format(&self) -> EthereumFormat {
        EthereumFormat::from_checksum_flag(self.eth_checksum)
    }
}
