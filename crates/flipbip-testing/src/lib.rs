//! # FlipBip Testing Infrastructure
//!
//! Shared testing utilities for the FlipBip workspace:
//! - Published BIP-32 / BIP-39 / BIP-44 test vectors
//! - Deterministic and failing entropy sources
//! - Edge case key material and mnemonics
//! - Property-based testing strategies
//! - Buffer scanning helpers for zeroization checks
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flipbip_testing::*;
//!
//! let mut zeros = FixedEntropy::zeros();
//! let mnemonic = Mnemonic::generate(&mut zeros, MnemonicStrength::Bits128)?;
//! assert_eq!(mnemonic.phrase(), vectors::ABANDON_ABOUT);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proptest::prelude::*;
use rand::{CryptoRng, RngCore};

pub mod vectors;

// ============================================================================
// Entropy Doubles
// ============================================================================

/// Entropy source that cycles through a fixed byte pattern.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
    pos: usize,
}

impl FixedEntropy {
    /// Repeats `pattern` forever; an empty pattern yields zeros
    pub fn new(pattern: Vec<u8>) -> Self {
        let pattern = if pattern.is_empty() { vec![0] } else { pattern };
        Self { pattern, pos: 0 }
    }

    /// All-zero entropy
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RngCore for FixedEntropy {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.pattern[self.pos];
            self.pos = (self.pos + 1) % self.pattern.len();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for FixedEntropy {}

/// Entropy source whose every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingEntropy;

impl RngCore for FailingEntropy {
    fn next_u32(&mut self) -> u32 {
        panic!("FailingEntropy cannot produce values")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("FailingEntropy cannot produce values")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("FailingEntropy cannot produce values")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

impl CryptoRng for FailingEntropy {}

// ============================================================================
// Edge Case Key Material
// ============================================================================

/// Edge case secp256k1 private keys for testing scalar validation
pub struct EdgeCaseKeys;

impl EdgeCaseKeys {
    /// All zeros (invalid)
    pub const ALL_ZEROS: [u8; 32] = [0u8; 32];

    /// All ones (above the curve order, invalid)
    pub const ALL_ONES: [u8; 32] = [0xFF; 32];

    /// Minimum valid key
    pub const MIN_VALID: [u8; 32] = {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    };

    /// secp256k1 curve order (n), invalid as private key
    pub const SECP256K1_ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
        0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
        0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
    ];

    /// secp256k1 curve order minus 1 (n-1), the maximum valid key
    pub const SECP256K1_ORDER_MINUS_1: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
        0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
        0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x40,
    ];

    /// Key with only the top bit set
    pub const SINGLE_BIT_255: [u8; 32] = {
        let mut k = [0u8; 32];
        k[0] = 0x80;
        k
    };

    /// Returns only valid edge case keys
    pub fn valid_only() -> Vec<[u8; 32]> {
        vec![
            Self::MIN_VALID,
            Self::SINGLE_BIT_255,
            Self::SECP256K1_ORDER_MINUS_1,
        ]
    }

    /// Returns only invalid edge case keys
    pub fn invalid_only() -> Vec<[u8; 32]> {
        vec![Self::ALL_ZEROS, Self::ALL_ONES, Self::SECP256K1_ORDER]
    }
}

// ============================================================================
// Edge Case Mnemonics
// ============================================================================

/// Edge case mnemonic phrases for testing
pub struct EdgeCaseMnemonics;

impl EdgeCaseMnemonics {
    /// Mixed case (normalized on parse)
    pub const MIXED_CASE: &'static str =
        "ABANDON abandon ABANDON abandon ABANDON abandon ABANDON abandon ABANDON abandon ABANDON about";

    /// Extra whitespace (normalized on parse)
    pub const EXTRA_WHITESPACE: &'static str =
        "  abandon   abandon  abandon abandon abandon abandon abandon abandon abandon abandon abandon   about  ";

    /// Returns valid mnemonics, including ones that need normalizing
    pub fn valid() -> Vec<&'static str> {
        vec![
            vectors::ABANDON_ABOUT,
            vectors::ABANDON_ART,
            vectors::LEGAL_WINNER,
            Self::MIXED_CASE,
            Self::EXTRA_WHITESPACE,
        ]
    }

    /// Returns malformed mnemonics for error handling tests
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "",                           // Empty
            "abandon",                    // Single word
            "abandon abandon abandon",    // Too few words
            "invalid words here",         // Invalid words
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon", // 13 words
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon", // Bad checksum
        ]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Supported mnemonic strengths in bits
pub fn mnemonic_strength_bits() -> impl Strategy<Value = u32> {
    prop_oneof![Just(128u32), Just(192u32), Just(256u32)]
}

/// Raw entropy of a supported length (16, 24 or 32 bytes)
pub fn mnemonic_entropy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 16),
        prop::collection::vec(any::<u8>(), 24),
        prop::collection::vec(any::<u8>(), 32),
    ]
}

/// Non-hardened child indices
pub fn normal_child_index() -> impl Strategy<Value = u32> {
    0u32..0x8000_0000
}

/// Small address indices, the range a wallet screen actually shows
pub fn address_index() -> impl Strategy<Value = u32> {
    0u32..64
}

/// BIP-32 seeds between 128 and 512 bits
pub fn seed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 16..=64)
}

/// BIP-32 seeds of 128, 256 or 512 bits, the lengths every implementation accepts
pub fn bip32_seed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 16),
        prop::collection::vec(any::<u8>(), 32),
        prop::collection::vec(any::<u8>(), 64),
    ]
}

/// Printable passphrases
pub fn passphrase() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,16}"
}

// ============================================================================
// Buffer Scanning
// ============================================================================

/// True if `needle` occurs anywhere in `haystack`
pub fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// True if every byte of `buf` is zero
pub fn is_zeroed(buf: &[u8]) -> bool {
    buf.iter().all(|&b| b == 0)
}

// ============================================================================
// Tests
// ============================================================================
