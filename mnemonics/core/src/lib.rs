//! # FlipBip Mnemonics
//!
//! BIP-39 mnemonic handling for the FlipBip wallet core:
//!
//! - [`Mnemonic::generate`] draws entropy from an [`EntropySource`] and maps it
//!   to 12, 18 or 24 English words with a checksum
//! - [`validate`] and [`check`] verify an externally supplied phrase
//! - [`Seed::derive`] stretches a phrase and passphrase into the 64-byte seed
//!
//! Word lists and checksums come from the `bip39` crate, the key stretching
//! from `pbkdf2`. Secret values wipe themselves on drop.
//!
//! ```
//! use flipbip_mnemonics::{Mnemonic, Seed};
//!
//! let phrase = "abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon about";
//! let mnemonic = Mnemonic::parse(phrase)?;
//! let seed = Seed::from_mnemonic(&mnemonic, "");
//! assert_eq!(seed.as_bytes()[..4], [0x5e, 0xb0, 0x0b, 0xbd]);
//! # Ok::<(), flipbip_error::FlipbipError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entropy;
mod mnemonic;
mod seed;

pub use entropy::EntropySource;
pub use mnemonic::{check, validate, Mnemonic, MnemonicStrength};
pub use seed::{Seed, PBKDF2_ROUNDS, SEED_LEN};

pub use flipbip_error::{FlipbipError, Result};
