//! Extended key (xprv / xpub) encoding.
//!
//! Layout, 78 bytes before Base58Check:
//! `version(4) | depth(1) | parent fingerprint(4) | child number(4) | chain code(32) | key(33)`
//! where the key is `0x00 || private key` or the compressed public key.

use flipbip_error::{FlipbipError, Result};
use zeroize::{Zeroize, Zeroizing};

use crate::hash::{base58check_decode, base58check_encode};
use crate::node::HDNode;

/// Payload length of a serialized extended key
pub const EXTENDED_KEY_LEN: usize = 78;

/// Mainnet BIP-32 private version bytes ("xprv")
pub const XPRV_VERSION: u32 = 0x0488_ADE4;
/// Mainnet BIP-32 public version bytes ("xpub")
pub const XPUB_VERSION: u32 = 0x0488_B21E;

fn header(node: &HDNode, parent_fingerprint: [u8; 4], version: u32) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(EXTENDED_KEY_LEN));
    out.extend_from_slice(&version.to_be_bytes());
    out.push(node.depth());
    out.extend_from_slice(&parent_fingerprint);
    out.extend_from_slice(&node.child_number().to_be_bytes());
    out.extend_from_slice(node.chain_code());
    out
}

/// Serializes the private half of `node`.
///
/// `parent_fingerprint` is written as given; pass `[0; 4]` for a master node.
pub fn serialize_private(
    node: &HDNode,
    parent_fingerprint: [u8; 4],
    version: u32,
) -> Result<Zeroizing<String>> {
    let private_key = node.private_key().ok_or(FlipbipError::MissingPrivateKey)?;
    let mut payload = header(node, parent_fingerprint, version);
    payload.push(0x00);
    payload.extend_from_slice(private_key);
    Ok(Zeroizing::new(base58check_encode(&payload)))
}

/// Serializes the public half of `node`
pub fn serialize_public(node: &HDNode, parent_fingerprint: [u8; 4], version: u32) -> String {
    let mut payload = header(node, parent_fingerprint, version);
    payload.extend_from_slice(node.public_key());
    base58check_encode(&payload)
}

/// Parses an extended key carrying either `private_version` or
/// `public_version`. Public keys yield a watch-only node.
pub fn parse_extended_key(encoded: &str, private_version: u32, public_version: u32) -> Result<HDNode> {
    let payload = Zeroizing::new(
        base58check_decode(encoded.trim())
            .ok_or_else(|| FlipbipError::InvalidExtendedKey("bad base58check encoding".into()))?,
    );
    if payload.len() != EXTENDED_KEY_LEN {
        return Err(FlipbipError::InvalidExtendedKey(format!(
            "expected {} bytes, got {}",
            EXTENDED_KEY_LEN,
            payload.len()
        )));
    }

    let version = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let depth = payload[4];
    let parent_fingerprint = [payload[5], payload[6], payload[7], payload[8]];
    let child_number = u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&payload[13..45]);

    if depth == 0 && (parent_fingerprint != [0; 4] || child_number != 0) {
        return Err(FlipbipError::InvalidExtendedKey(
            "master key with non-zero parent fingerprint or child number".into(),
        ));
    }

    let key = &payload[45..];
    if version == private_version {
        if key[0] != 0x00 {
            return Err(FlipbipError::InvalidExtendedKey(
                "private key is missing its 0x00 prefix".into(),
            ));
        }
        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&key[1..]);
        let node = HDNode::from_private_parts(
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            private_key,
        )
        .map_err(|e| FlipbipError::InvalidExtendedKey(e.to_string()));
        private_key.zeroize();
        chain_code.zeroize();
        node
    } else if version == public_version {
        let mut public_key = [0u8; 33];
        public_key.copy_from_slice(key);
        HDNode::from_public_parts(depth, parent_fingerprint, child_number, chain_code, public_key)
            .map_err(|e| FlipbipError::InvalidExtendedKey(e.to_string()))
    } else {
        Err(FlipbipError::InvalidExtendedKey(format!(
            "unexpected version bytes {version:#010x}"
        )))
    }
}

impl HDNode {
    /// Standard mainnet `xprv…` string for this node
    pub fn to_xprv(&self) -> Result<Zeroizing<String>> {
        serialize_private(self, self.parent_fingerprint(), XPRV_VERSION)
    }

    /// Standard mainnet `xpub…` string for this node
    pub fn to_xpub(&self) -> String {
        serialize_public(self, self.parent_fingerprint(), XPUB_VERSION)
    }

    /// Parses a mainnet `xprv…` or `xpub…` string
    pub fn from_extended_key(encoded: &str) -> Result<Self> {
        parse_extended_key(encoded, XPRV_VERSION, XPUB_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbip_testing::vectors::*;

    fn tv1_master() -> HDNode {
        HDNode::from_seed(&hex::decode(BIP32_TV1_SEED).unwrap()).unwrap()
    }

    #[test]
    fn test_bip32_vector_1_chain() {
        let m = tv1_master();
        assert_eq!(m.to_xprv().unwrap().as_str(), BIP32_TV1_M_XPRV);
        assert_eq!(m.to_xpub(), BIP32_TV1_M_XPUB);

        let m_0h = m.derive_hardened(0).unwrap();
        assert_eq!(m_0h.to_xprv().unwrap().as_str(), BIP32_TV1_M_0H_XPRV);
        assert_eq!(m_0h.to_xpub(), BIP32_TV1_M_0H_XPUB);

        let m_0h_1 = m_0h.derive_normal(1).unwrap();
        assert_eq!(m_0h_1.to_xprv().unwrap().as_str(), BIP32_TV1_M_0H_1_XPRV);
        assert_eq!(m_0h_1.to_xpub(), BIP32_TV1_M_0H_1_XPUB);

        let m_0h_1_2h = m_0h_1.derive_hardened(2).unwrap();
        assert_eq!(m_0h_1_2h.to_xprv().unwrap().as_str(), BIP32_TV1_M_0H_1_2H_XPRV);
        assert_eq!(m_0h_1_2h.to_xpub(), BIP32_TV1_M_0H_1_2H_XPUB);

        let m_0h_1_2h_2 = m_0h_1_2h.derive_normal(2).unwrap();
        assert_eq!(m_0h_1_2h_2.to_xprv().unwrap().as_str(), BIP32_TV1_M_0H_1_2H_2_XPRV);
        assert_eq!(m_0h_1_2h_2.to_xpub(), BIP32_TV1_M_0H_1_2H_2_XPUB);

        let leaf = m_0h_1_2h_2.derive_normal(1_000_000_000).unwrap();
        assert_eq!(leaf.depth(), 5);
        assert_eq!(leaf.to_xprv().unwrap().as_str(), BIP32_TV1_M_0H_1_2H_2_1000000000_XPRV);
        assert_eq!(leaf.to_xpub(), BIP32_TV1_M_0H_1_2H_2_1000000000_XPUB);

        // public-only derivation reaches the same leaf
        let public_leaf = m_0h_1_2h
            .neuter()
            .derive_normal(2)
            .unwrap()
            .derive_normal(1_000_000_000)
            .unwrap();
        assert_eq!(public_leaf.to_xpub(), BIP32_TV1_M_0H_1_2H_2_1000000000_XPUB);
    }

    #[test]
    fn test_bip32_vector_2_chain() {
        let mut node = HDNode::from_seed(&hex::decode(BIP32_TV2_SEED).unwrap()).unwrap();
        let steps = [(0, false), (2_147_483_647, true), (1, false), (2_147_483_646, true), (2, false)];

        let (path, xprv, xpub) = BIP32_TV2_CHAIN[0];
        assert_eq!(node.to_xprv().unwrap().as_str(), xprv, "{path}");
        assert_eq!(node.to_xpub(), xpub, "{path}");

        for ((index, hardened), (path, xprv, xpub)) in steps.into_iter().zip(&BIP32_TV2_CHAIN[1..]) {
            node = if hardened {
                node.derive_hardened(index).unwrap()
            } else {
                node.derive_normal(index).unwrap()
            };
            assert_eq!(node.to_xprv().unwrap().as_str(), *xprv, "{path}");
            assert_eq!(node.to_xpub(), *xpub, "{path}");
            assert_eq!(HDNode::from_extended_key(xpub).unwrap().to_xpub(), *xpub, "{path}");
        }
        assert_eq!(node.depth(), 5);
    }

    #[test]
    fn test_public_only_node_has_no_xprv() {
        let public = tv1_master().neuter();
        assert!(matches!(public.to_xprv(), Err(FlipbipError::MissingPrivateKey)));
        assert_eq!(public.to_xpub(), BIP32_TV1_M_XPUB);
    }

    #[test]
    fn test_parse_round_trips_vectors() {
        let prv = HDNode::from_extended_key(BIP32_TV1_M_0H_1_XPRV).unwrap();
        assert!(prv.is_private());
        assert_eq!(prv.depth(), 2);
        assert_eq!(prv.to_xprv().unwrap().as_str(), BIP32_TV1_M_0H_1_XPRV);

        let public = HDNode::from_extended_key(BIP32_TV1_M_0H_XPUB).unwrap();
        assert!(!public.is_private());
        assert_eq!(public.to_xpub(), BIP32_TV1_M_0H_XPUB);
        assert_eq!(public.derive_normal(1).unwrap().to_xpub(), BIP32_TV1_M_0H_1_XPUB);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            HDNode::from_extended_key("xpub-not-base58"),
            Err(FlipbipError::InvalidExtendedKey(_))
        ));
        // valid base58check, wrong length
        assert!(matches!(
            HDNode::from_extended_key("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"),
            Err(FlipbipError::InvalidExtendedKey(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_version() {
        let node = tv1_master();
        let tpub = serialize_public(&node, [0; 4], 0x0435_87CF);
        assert!(matches!(
            HDNode::from_extended_key(&tpub),
            Err(FlipbipError::InvalidExtendedKey(_))
        ));
        assert!(parse_extended_key(&tpub, 0x0435_8394, 0x0435_87CF).is_ok());
    }

    #[test]
    fn test_parse_rejects_inconsistent_master() {
        let node = tv1_master();
        let forged = serialize_public(&node, [1, 2, 3, 4], XPUB_VERSION);
        assert!(matches!(
            HDNode::from_extended_key(&forged),
            Err(FlipbipError::InvalidExtendedKey(_))
        ));
    }
}
