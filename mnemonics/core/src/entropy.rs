//! Entropy collaborator used for mnemonic generation and storage nonces.

use flipbip_error::{FlipbipError, Result};
use rand::{CryptoRng, RngCore};

/// A source of cryptographically secure random bytes.
///
/// Every `rand` RNG marked [`CryptoRng`] is an entropy source, so production
/// code passes [`rand::rngs::OsRng`] and tests pass a deterministic double.
pub trait EntropySource {
    /// Fills `dest` with random bytes.
    fn random_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: RngCore + CryptoRng> EntropySource for R {
    fn random_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(dest)
            .map_err(|e| FlipbipError::EntropyFailure(e.to_string()))
    }
}
