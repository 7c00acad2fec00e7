use std::borrow::Cow;
use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::Mnemonic;

/// PBKDF2 rounds mandated by BIP-39
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Length of a BIP-39 seed in bytes
pub const SEED_LEN: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte BIP-39 seed, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Stretches `mnemonic` and `passphrase` into a seed.
    ///
    /// Password is NFKD(mnemonic), salt is `"mnemonic" + NFKD(passphrase)`,
    /// PBKDF2-HMAC-SHA512 with 2048 rounds. The phrase is used as given, so
    /// callers that need checksum guarantees should go through
    /// [`Seed::from_mnemonic`].
    pub fn derive(mnemonic: &str, passphrase: &str) -> Self {
        let mut password = Cow::Borrowed(mnemonic);
        bip39::Mnemonic::normalize_utf8_cow(&mut password);
        let mut normalized_passphrase = Cow::Borrowed(passphrase);
        bip39::Mnemonic::normalize_utf8_cow(&mut normalized_passphrase);

        let mut salt = String::with_capacity(SALT_PREFIX.len() + normalized_passphrase.len());
        salt.push_str(SALT_PREFIX);
        salt.push_str(&normalized_passphrase);

        let mut seed = [0u8; SEED_LEN];
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed);

        salt.zeroize();
        if let Cow::Owned(mut owned) = password {
            owned.zeroize();
        }
        if let Cow::Owned(mut owned) = normalized_passphrase {
            owned.zeroize();
        }
        Seed(seed)
    }

    /// Seed for a validated mnemonic
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Self {
        Self::derive(mnemonic.phrase(), passphrase)
    }

    /// Wraps raw seed bytes
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Seed(bytes)
    }

    /// Raw seed bytes
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbip_testing::vectors::{ABANDON_ABOUT, ABANDON_ABOUT_SEED, ABANDON_ABOUT_TREZOR_SEED};

    #[test]
    fn test_empty_passphrase_vector() {
        let seed = Seed::derive(ABANDON_ABOUT, "");
        assert_eq!(hex::encode(seed.as_bytes()), ABANDON_ABOUT_SEED);
    }

    #[test]
    fn test_trezor_passphrase_vector() {
        let mnemonic = Mnemonic::parse(ABANDON_ABOUT).unwrap();
        let seed = Seed::from_mnemonic(&mnemonic, "TREZOR");
        assert_eq!(hex::encode(seed.as_bytes()), ABANDON_ABOUT_TREZOR_SEED);
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let a = Seed::derive(ABANDON_ABOUT, "");
        let b = Seed::derive(ABANDON_ABOUT, "x");
        assert_ne!(a, b);
    }

    #[test]
    fn test_composed_passphrase_is_normalized() {
        // U+00E9 and "e" + U+0301 have the same NFKD form
        let precomposed = Seed::derive(ABANDON_ABOUT, "caf\u{e9}");
        let decomposed = Seed::derive(ABANDON_ABOUT, "cafe\u{301}");
        assert_eq!(precomposed, decomposed);
    }

    #[test]
    fn test_zeroize() {
        let mut seed = Seed::derive(ABANDON_ABOUT, "");
        seed.zeroize();
        assert_eq!(seed.as_bytes(), &[0u8; SEED_LEN]);
    }

    #[test]
    fn test_debug_redacts() {
        let seed = Seed::derive(ABANDON_ABOUT, "");
        assert_eq!(format!("{seed:?}"), "Seed(..)");
    }
}
