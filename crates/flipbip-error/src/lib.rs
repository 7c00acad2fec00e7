//! # FlipBip Error
//!
//! Unified error types for the FlipBip HD wallet core. Every crate in the
//! workspace returns [`FlipbipError`] so that a derivation session can map
//! any failure to one of its terminal states and to a short status message.
//!
//! ## Error Categories
//!
//! - Entropy and mnemonic errors (generation, checksum, word list)
//! - Derivation errors (invalid scalars, child indices, missing keys)
//! - Encoding errors (extended keys, public keys)
//! - Storage and configuration errors
//!
//! ## Example
//!
//! ```
//! use flipbip_error::{FlipbipError, Result};
//!
//! fn check_word_count(words: usize) -> Result<()> {
//!     if ![12, 18, 24].contains(&words) {
//!         return Err(FlipbipError::InvalidMnemonic(format!(
//!             "unsupported word count {words}"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_word_count(11).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for FlipBip operations.
#[derive(Error, Debug)]
pub enum FlipbipError {
    // ============ Entropy / Mnemonic Errors ============
    /// The entropy source could not supply random bytes
    #[error("Entropy source failure: {0}")]
    EntropyFailure(String),

    /// The mnemonic words are valid but the checksum does not match
    #[error("Mnemonic checksum mismatch")]
    MnemonicChecksumInvalid,

    /// The mnemonic has a bad word count or contains unknown words
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Unsupported entropy strength in bits
    #[error("Invalid mnemonic strength: {0} bits (expected 128, 192 or 256)")]
    InvalidStrength(u32),

    // ============ Derivation Errors ============
    /// A derived private key fell outside the secp256k1 scalar range
    #[error("Invalid derivation at depth {depth}, index {index:#010x}: {reason}")]
    InvalidDerivation {
        /// Depth of the node that could not be produced
        depth: u8,
        /// Child number that was requested
        index: u32,
        /// Underlying reason
        reason: String,
    },

    /// Child index out of range for the requested derivation kind
    #[error("Child index {0:#010x} is not within [0, 2^31 - 1]")]
    InvalidChildIndex(u32),

    /// Private key material is required but the node is public-only
    #[error("Missing private key")]
    MissingPrivateKey,

    // ============ Encoding Errors ============
    /// Malformed public key bytes
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Malformed or unexpected extended key string
    #[error("Invalid extended key: {0}")]
    InvalidExtendedKey(String),

    /// No coin profile with that ticker
    #[error("Unknown coin: {0}")]
    UnknownCoin(String),

    // ============ Storage Errors ============
    /// Loading the persisted secret failed
    #[error("Storage load failure: {0}")]
    StorageLoadFailure(String),

    /// Persisting the secret failed
    #[error("Storage save failure: {0}")]
    StorageSaveFailure(String),

    // ============ Session / Config Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation not valid in the current session state
    #[error("Invalid session state: {0}")]
    InvalidState(String),

    // ============ IO / Parsing Errors ============
    /// File IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// JSON parse error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Convenient Result type using FlipbipError
pub type Result<T> = std::result::Result<T, FlipbipError>;

/// Extension trait that tags lower-level failures as storage errors
pub trait StorageContext<T> {
    /// Maps the error to [`FlipbipError::StorageLoadFailure`] with context
    fn load_context(self, ctx: impl Into<String>) -> Result<T>;

    /// Maps the error to [`FlipbipError::StorageSaveFailure`] with context
    fn save_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: std::fmt::Display> StorageContext<T> for std::result::Result<T, E> {
    fn load_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| FlipbipError::StorageLoadFailure(format!("{}: {}", ctx.into(), e)))
    }

    fn save_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| FlipbipError::StorageSaveFailure(format!("{}: {}", ctx.into(), e)))
    }
}

// ============ From implementations for common error types ============

impl From<std::io::Error> for FlipbipError {
    fn from(err: std::io::Error) -> Self {
        FlipbipError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for FlipbipError {
    fn from(err: serde_json::Error) -> Self {
        FlipbipError::JsonError(err.to_string())
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// Unknown error
    Unknown = 0,
    /// Entropy failure
    EntropyFailure = 1001,
    /// Mnemonic checksum mismatch
    MnemonicChecksumInvalid = 1002,
    /// Malformed mnemonic
    InvalidMnemonic = 1003,
    /// Unsupported strength
    InvalidStrength = 1004,
    /// Invalid derivation
    InvalidDerivation = 2001,
    /// Child index out of range
    InvalidChildIndex = 2002,
    /// Missing private key
    MissingPrivateKey = 2003,
    /// Bad public key
    InvalidPublicKey = 3001,
    /// Bad extended key
    InvalidExtendedKey = 3002,
    /// Unknown coin
    UnknownCoin = 3003,
    /// Storage load failure
    StorageLoadFailure = 4001,
    /// Storage save failure
    StorageSaveFailure = 4002,
    /// Configuration error
    ConfigError = 5001,
    /// Invalid session state
    InvalidState = 5002,
}

impl FlipbipError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            FlipbipError::EntropyFailure(_) => ErrorCode::EntropyFailure,
            FlipbipError::MnemonicChecksumInvalid => ErrorCode::MnemonicChecksumInvalid,
            FlipbipError::InvalidMnemonic(_) => ErrorCode::InvalidMnemonic,
            FlipbipError::InvalidStrength(_) => ErrorCode::InvalidStrength,
            FlipbipError::InvalidDerivation { .. } => ErrorCode::InvalidDerivation,
            FlipbipError::InvalidChildIndex(_) => ErrorCode::InvalidChildIndex,
            FlipbipError::MissingPrivateKey => ErrorCode::MissingPrivateKey,
            FlipbipError::InvalidPublicKey(_) => ErrorCode::InvalidPublicKey,
            FlipbipError::InvalidExtendedKey(_) => ErrorCode::InvalidExtendedKey,
            FlipbipError::UnknownCoin(_) => ErrorCode::UnknownCoin,
            FlipbipError::StorageLoadFailure(_) => ErrorCode::StorageLoadFailure,
            FlipbipError::StorageSaveFailure(_) => ErrorCode::StorageSaveFailure,
            FlipbipError::ConfigError(_) => ErrorCode::ConfigError,
            FlipbipError::InvalidState(_) => ErrorCode::InvalidState,
            FlipbipError::IoError(_) | FlipbipError::JsonError(_) => ErrorCode::Unknown,
        }
    }

    /// Returns true if the caller can recover by asking the user again or
    /// falling back to a "no wallet" state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FlipbipError::MnemonicChecksumInvalid
                | FlipbipError::InvalidMnemonic(_)
                | FlipbipError::StorageLoadFailure(_)
                | FlipbipError::StorageSaveFailure(_)
                | FlipbipError::UnknownCoin(_)
        )
    }

    /// Short user-visible status line for this error
    pub fn status_message(&self) -> &'static str {
        match self {
            FlipbipError::EntropyFailure(_) => "Cannot create wallet",
            FlipbipError::MnemonicChecksumInvalid | FlipbipError::InvalidMnemonic(_) => {
                "Mnemonic check error"
            }
            FlipbipError::StorageLoadFailure(_) => "Load error",
            FlipbipError::StorageSaveFailure(_) => "Save error",
            FlipbipError::ConfigError(_) | FlipbipError::UnknownCoin(_) => "Config error",
            _ => "Generation error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlipbipError::InvalidDerivation {
            depth: 3,
            index: 0x8000_0000,
            reason: "scalar out of range".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("depth 3"));
        assert!(msg.contains("0x80000000"));
        assert!(msg.contains("scalar out of range"));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            FlipbipError::MnemonicChecksumInvalid.code(),
            ErrorCode::MnemonicChecksumInvalid
        );
        assert_eq!(ErrorCode::StorageSaveFailure as u32, 4002);
        assert_eq!(FlipbipError::IoError("x".into()).code(), ErrorCode::Unknown);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            FlipbipError::StorageLoadFailure("gone".into()).status_message(),
            "Load error"
        );
        assert_eq!(
            FlipbipError::StorageSaveFailure("full".into()).status_message(),
            "Save error"
        );
        assert_eq!(
            FlipbipError::MnemonicChecksumInvalid.status_message(),
            "Mnemonic check error"
        );
        assert_eq!(
            FlipbipError::EntropyFailure("no rng".into()).status_message(),
            "Cannot create wallet"
        );
        assert_eq!(FlipbipError::MissingPrivateKey.status_message(), "Generation error");
    }

    #[test]
    fn test_recoverable() {
        assert!(FlipbipError::MnemonicChecksumInvalid.is_recoverable());
        assert!(FlipbipError::StorageLoadFailure("x".into()).is_recoverable());
        assert!(!FlipbipError::EntropyFailure("x".into()).is_recoverable());
        assert!(!FlipbipError::InvalidDerivation {
            depth: 0,
            index: 0,
            reason: String::new(),
        }
        .is_recoverable());
    }

    #[test]
    fn test_storage_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "file missing"));
        let err = result.load_context("reading keystore").unwrap_err();
        assert!(matches!(err, FlipbipError::StorageLoadFailure(_)));
        assert!(err.to_string().contains("reading keystore"));
        assert!(err.to_string().contains("file missing"));

        let result: std::result::Result<(), &str> = Err("disk full");
        let err = result.save_context("writing keystore").unwrap_err();
        assert!(matches!(err, FlipbipError::StorageSaveFailure(_)));
    }
}
