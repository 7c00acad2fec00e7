use std::fmt;

use bip39::Language;
use flipbip_error::{FlipbipError, Result};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::EntropySource;

/// Entropy strength of a BIP-39 mnemonic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MnemonicStrength {
    /// 128 bits, 12 words
    Bits128,
    /// 192 bits, 18 words
    Bits192,
    /// 256 bits, 24 words
    #[default]
    Bits256,
}

impl MnemonicStrength {
    /// All supported strengths, weakest first
    pub const ALL: [MnemonicStrength; 3] = [
        MnemonicStrength::Bits128,
        MnemonicStrength::Bits192,
        MnemonicStrength::Bits256,
    ];

    /// Strength in bits
    pub fn bits(self) -> u32 {
        match self {
            MnemonicStrength::Bits128 => 128,
            MnemonicStrength::Bits192 => 192,
            MnemonicStrength::Bits256 => 256,
        }
    }

    /// Number of entropy bytes drawn for this strength
    pub fn entropy_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of words in a mnemonic of this strength
    pub fn word_count(self) -> usize {
        // one checksum bit per 32 entropy bits, 11 bits per word
        (self.bits() as usize + self.bits() as usize / 32) / 11
    }

    /// Strength matching a word count, if any
    pub fn from_word_count(words: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.word_count() == words)
    }
}

impl TryFrom<u32> for MnemonicStrength {
    type Error = FlipbipError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(MnemonicStrength::Bits128),
            192 => Ok(MnemonicStrength::Bits192),
            256 => Ok(MnemonicStrength::Bits256),
            other => Err(FlipbipError::InvalidStrength(other)),
        }
    }
}

impl From<MnemonicStrength> for u32 {
    fn from(strength: MnemonicStrength) -> u32 {
        strength.bits()
    }
}

impl fmt::Display for MnemonicStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

/// A checksum-validated BIP-39 English mnemonic.
///
/// The phrase is held in canonical form (lowercase words separated by a
/// single space) and wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    phrase: String,
}

impl Mnemonic {
    /// Generates a new mnemonic from `strength` bits of fresh entropy.
    ///
    /// Returns [`FlipbipError::EntropyFailure`] if the source cannot supply
    /// bytes. There is no retry.
    pub fn generate<E: EntropySource + ?Sized>(
        entropy: &mut E,
        strength: MnemonicStrength,
    ) -> Result<Self> {
        let mut bytes = Zeroizing::new(vec![0u8; strength.entropy_len()]);
        entropy.random_bytes(&mut bytes)?;
        let mnemonic = Self::from_entropy(&bytes)?;
        tracing::debug!(words = mnemonic.word_count(), "generated mnemonic");
        Ok(mnemonic)
    }

    /// Maps raw entropy (16, 24 or 32 bytes) to a mnemonic.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        MnemonicStrength::try_from(entropy.len() as u32 * 8)?;
        let inner = bip39::Mnemonic::from_entropy_in(Language::English, entropy)
            .map_err(map_bip39_error)?;
        Ok(Self {
            phrase: inner.to_string(),
        })
    }

    /// Parses and checksum-validates a phrase.
    ///
    /// Case and surrounding or repeated whitespace are ignored. Only the word
    /// counts of the supported strengths are accepted.
    pub fn parse(phrase: &str) -> Result<Self> {
        let lowered = Zeroizing::new(phrase.to_lowercase());
        let inner =
            bip39::Mnemonic::parse_in(Language::English, lowered.as_str()).map_err(map_bip39_error)?;
        let word_count = inner.word_count();
        if MnemonicStrength::from_word_count(word_count).is_none() {
            return Err(FlipbipError::InvalidMnemonic(format!(
                "unsupported word count {word_count}"
            )));
        }
        Ok(Self {
            phrase: inner.to_string(),
        })
    }

    /// The canonical phrase
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Iterates over the words
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.phrase.split(' ')
    }

    /// Number of words
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Entropy strength this mnemonic encodes
    pub fn strength(&self) -> Option<MnemonicStrength> {
        MnemonicStrength::from_word_count(self.word_count())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.word_count())
            .finish_non_exhaustive()
    }
}

/// Returns true when `phrase` is a well-formed mnemonic with a valid checksum.
///
/// A mismatch is an ordinary outcome (corrupted storage, mistyped import),
/// so this never errors.
pub fn validate(phrase: &str) -> bool {
    check(phrase).is_ok()
}

/// Like [`validate`] but reports why the phrase was rejected.
pub fn check(phrase: &str) -> Result<()> {
    Mnemonic::parse(phrase).map(|_| ())
}

fn map_bip39_error(err: bip39::Error) -> FlipbipError {
    match err {
        bip39::Error::InvalidChecksum => FlipbipError::MnemonicChecksumInvalid,
        bip39::Error::BadWordCount(n) => {
            FlipbipError::InvalidMnemonic(format!("unsupported word count {n}"))
        }
        bip39::Error::UnknownWord(i) => {
            FlipbipError::InvalidMnemonic(format!("unknown word at position {}", i + 1))
        }
        bip39::Error::BadEntropyBitCount(bits) => FlipbipError::InvalidStrength(bits as u32),
        other => FlipbipError::InvalidMnemonic(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbip_testing::vectors::{ABANDON_ABOUT, LEGAL_WINNER};
    use flipbip_testing::{FailingEntropy, FixedEntropy};

    #[test]
    fn test_strength_word_counts() {
        assert_eq!(MnemonicStrength::Bits128.word_count(), 12);
        assert_eq!(MnemonicStrength::Bits192.word_count(), 18);
        assert_eq!(MnemonicStrength::Bits256.word_count(), 24);
        assert_eq!(MnemonicStrength::Bits192.entropy_len(), 24);
        assert_eq!(MnemonicStrength::from_word_count(15), None);
    }

    #[test]
    fn test_strength_try_from() {
        assert_eq!(MnemonicStrength::try_from(128).unwrap(), MnemonicStrength::Bits128);
        assert!(matches!(
            MnemonicStrength::try_from(160),
            Err(FlipbipError::InvalidStrength(160))
        ));
    }

    #[test]
    fn test_zero_entropy_is_abandon_about() {
        let mut zeros = FixedEntropy::zeros();
        let mnemonic = Mnemonic::generate(&mut zeros, MnemonicStrength::Bits128).unwrap();
        assert_eq!(mnemonic.phrase(), ABANDON_ABOUT);
        assert_eq!(mnemonic.strength(), Some(MnemonicStrength::Bits128));
    }

    #[test]
    fn test_from_entropy_vector() {
        let mnemonic = Mnemonic::from_entropy(&[0x7f; 16]).unwrap();
        assert_eq!(mnemonic.phrase(), LEGAL_WINNER);
    }

    #[test]
    fn test_from_entropy_rejects_odd_lengths() {
        assert!(matches!(
            Mnemonic::from_entropy(&[0u8; 20]),
            Err(FlipbipError::InvalidStrength(160))
        ));
    }

    #[test]
    fn test_generate_entropy_failure() {
        let err = Mnemonic::generate(&mut FailingEntropy, MnemonicStrength::Bits256).unwrap_err();
        assert!(matches!(err, FlipbipError::EntropyFailure(_)));
    }

    #[test]
    fn test_parse_normalizes_case_and_spacing() {
        let messy = format!("  {}  ", ABANDON_ABOUT.to_uppercase().replace(' ', "   "));
        let mnemonic = Mnemonic::parse(&messy).unwrap();
        assert_eq!(mnemonic.phrase(), ABANDON_ABOUT);
    }

    #[test]
    fn test_checksum_mismatch_is_not_fatal() {
        let bad = ABANDON_ABOUT.replace("about", "abandon");
        assert!(!validate(&bad));
        assert!(matches!(check(&bad), Err(FlipbipError::MnemonicChecksumInvalid)));
    }

    #[test]
    fn test_unknown_word() {
        let bad = ABANDON_ABOUT.replace("about", "flipper");
        assert!(matches!(check(&bad), Err(FlipbipError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_bad_word_count() {
        assert!(!validate("abandon abandon abandon"));
        assert!(!validate(""));
    }

    #[test]
    fn test_debug_redacts_phrase() {
        let mnemonic = Mnemonic::parse(ABANDON_ABOUT).unwrap();
        let debug = format!("{mnemonic:?}");
        assert!(!debug.contains("abandon"));
        assert!(debug.contains("12"));
    }

    #[test]
    fn test_zeroize_clears_phrase() {
        let mut mnemonic = Mnemonic::parse(ABANDON_ABOUT).unwrap();
        mnemonic.zeroize();
        assert!(mnemonic.phrase().is_empty());
    }
}
