//! # FlipBip Core
//!
//! Ties mnemonic handling, key derivation and secret storage together:
//!
//! - [`WalletSession`] runs one `view`, `generate` or `import` flow and
//!   returns a [`DerivedKeySet`]
//! - [`SecretStore`] abstracts where the mnemonic lives, with
//!   [`MemoryStore`] and the password-sealed [`KeystoreFile`]
//! - [`WalletConfig`] carries the user settings loaded from JSON

#![forbid(unsafe_code)]

pub mod config;
mod keyset;
pub mod session;
pub mod storage;

pub use config::{KeystoreConfig, WalletConfig, MAX_ADDRESS_COUNT};
pub use keyset::DerivedKeySet;
pub use session::{SessionState, WalletSession};
pub use storage::{
    KeystoreFile, MemoryStore, SecretStore, DEFAULT_KDF_ITERATIONS, MAX_KDF_ITERATIONS,
};

pub use flipbip_error::{FlipbipError, Result};
pub use flipbip_hd_key::{CoinProfile, CoinTable, EthereumFormat};
pub use flipbip_mnemonics::{Mnemonic, MnemonicStrength};
