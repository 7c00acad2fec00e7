//! Hash helpers shared by fingerprints, Base58Check and address rendering.

use base58::{FromBase58, ToBase58};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(sha));
    out
}

/// SHA256(SHA256(data))
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(first));
    out
}

/// Keccak-256 as used by Ethereum (not NIST SHA3-256)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Base58 encoding of `payload` followed by the first 4 bytes of its SHA256d
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    let encoded = data.to_base58();
    zeroize::Zeroize::zeroize(&mut data);
    encoded
}

/// Decodes Base58Check, returning the payload when the checksum matches
pub fn base58check_decode(encoded: &str) -> Option<Vec<u8>> {
    let mut data = encoded.from_base58().ok()?;
    if data.len() < 4 {
        return None;
    }
    let payload_len = data.len() - 4;
    let checksum = sha256d(&data[..payload_len]);
    if checksum[..4] != data[payload_len..] {
        zeroize::Zeroize::zeroize(&mut data);
        return None;
    }
    data.truncate(payload_len);
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_empty() {
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_base58check_genesis_address() {
        // hash160 of the genesis block coinbase key
        let payload = hex::decode("0062e907b15cbf27d5425399ebf6f0fb50ebb88f18").unwrap();
        assert_eq!(base58check_encode(&payload), "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
        assert_eq!(
            base58check_decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").unwrap(),
            payload
        );
    }

    #[test]
    fn test_base58check_rejects_corruption() {
        assert!(base58check_decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb").is_none());
        assert!(base58check_decode("0OIl").is_none());
        assert!(base58check_decode("").is_none());
    }
}
