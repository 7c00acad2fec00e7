use std::fmt;

use flipbip_error::{FlipbipError, Result};
use hmac::{Hmac, Mac};
use secp256k1::{PublicKey, Scalar, SecretKey, SECP256K1};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::hash::hash160;

type HmacSha512 = Hmac<Sha512>;

/// Bit marking a hardened child number
pub const HARDENED_BIT: u32 = 1 << 31;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// One node of a BIP-32 secp256k1 key tree.
///
/// Derivation never modifies a node: [`HDNode::derive_hardened`] and
/// [`HDNode::derive_normal`] borrow the parent and return a fresh child that
/// records the parent's fingerprint. Private key material is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct HDNode {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
    chain_code: [u8; 32],
    private_key: Option<[u8; 32]>,
    public_key: [u8; 33],
}

impl HDNode {
    /// Master node from a BIP-32 seed (16 to 64 bytes).
    ///
    /// Fails with [`FlipbipError::InvalidDerivation`] if the HMAC output is
    /// not a valid secp256k1 scalar; the caller has to start over with new
    /// entropy.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(invalid_derivation(
                0,
                0,
                format!("seed length {} outside 16..=64 bytes", seed.len()),
            ));
        }
        let i = hmac_sha512(MASTER_HMAC_KEY, &[seed], 0, 0)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        let secret =
            SecretKey::from_slice(&i[..32]).map_err(|e| invalid_derivation(0, 0, e))?;
        Ok(Self::from_secret(&secret, chain_code, 0, [0; 4], 0))
    }

    /// Depth-0 node from an explicit private key and chain code
    pub fn from_private_key(private_key: [u8; 32], chain_code: [u8; 32]) -> Result<Self> {
        Self::from_private_parts(0, [0; 4], 0, chain_code, private_key)
    }

    pub(crate) fn from_private_parts(
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_number: u32,
        chain_code: [u8; 32],
        mut private_key: [u8; 32],
    ) -> Result<Self> {
        let secret = SecretKey::from_slice(&private_key);
        private_key.zeroize();
        let secret = secret.map_err(|e| invalid_derivation(depth, child_number, e))?;
        Ok(Self::from_secret(
            &secret,
            chain_code,
            depth,
            parent_fingerprint,
            child_number,
        ))
    }

    pub(crate) fn from_public_parts(
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_number: u32,
        chain_code: [u8; 32],
        public_key: [u8; 33],
    ) -> Result<Self> {
        PublicKey::from_slice(&public_key)
            .map_err(|e| FlipbipError::InvalidPublicKey(e.to_string()))?;
        Ok(Self {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            private_key: None,
            public_key,
        })
    }

    fn from_secret(
        secret: &SecretKey,
        chain_code: [u8; 32],
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_number: u32,
    ) -> Self {
        Self {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            private_key: Some(secret.secret_bytes()),
            public_key: PublicKey::from_secret_key(SECP256K1, secret).serialize(),
        }
    }

    /// Hardened child `index'`. `index` must be below 2^31; the hardened bit
    /// is added here.
    pub fn derive_hardened(&self, index: u32) -> Result<Self> {
        if index & HARDENED_BIT != 0 {
            return Err(FlipbipError::InvalidChildIndex(index));
        }
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(FlipbipError::MissingPrivateKey)?;
        let child_number = index | HARDENED_BIT;
        // fingerprint of the parent is taken before the child exists
        let parent_fingerprint = self.fingerprint();
        let i = hmac_sha512(
            &self.chain_code,
            &[&[0u8], private_key, &child_number.to_be_bytes()],
            self.depth,
            child_number,
        )?;
        self.child_from_hmac(&i, child_number, parent_fingerprint)
    }

    /// Non-hardened child `index`. Works on public-only nodes as well.
    pub fn derive_normal(&self, index: u32) -> Result<Self> {
        if index & HARDENED_BIT != 0 {
            return Err(FlipbipError::InvalidChildIndex(index));
        }
        let parent_fingerprint = self.fingerprint();
        let i = hmac_sha512(
            &self.chain_code,
            &[&self.public_key, &index.to_be_bytes()],
            self.depth,
            index,
        )?;
        self.child_from_hmac(&i, index, parent_fingerprint)
    }

    fn child_from_hmac(
        &self,
        i: &[u8; 64],
        child_number: u32,
        parent_fingerprint: [u8; 4],
    ) -> Result<Self> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| invalid_derivation(self.depth, child_number, "maximum depth exceeded"))?;

        let mut il = Zeroizing::new([0u8; 32]);
        il.copy_from_slice(&i[..32]);
        let tweak = Scalar::from_be_bytes(*il)
            .map_err(|_| invalid_derivation(depth, child_number, "IL is not below the curve order"))?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        match &self.private_key {
            Some(parent) => {
                let parent =
                    SecretKey::from_slice(parent).map_err(|e| invalid_derivation(depth, child_number, e))?;
                let child = parent
                    .add_tweak(&tweak)
                    .map_err(|e| invalid_derivation(depth, child_number, e))?;
                Ok(Self::from_secret(
                    &child,
                    chain_code,
                    depth,
                    parent_fingerprint,
                    child_number,
                ))
            }
            None => {
                let parent = PublicKey::from_slice(&self.public_key)
                    .map_err(|e| FlipbipError::InvalidPublicKey(e.to_string()))?;
                let child = parent
                    .add_exp_tweak(SECP256K1, &tweak)
                    .map_err(|e| invalid_derivation(depth, child_number, e))?;
                Ok(Self {
                    depth,
                    parent_fingerprint,
                    child_number,
                    chain_code,
                    private_key: None,
                    public_key: child.serialize(),
                })
            }
        }
    }

    /// Public-only copy of this node
    pub fn neuter(&self) -> Self {
        Self {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
            private_key: None,
            public_key: self.public_key,
        }
    }

    /// First four bytes of HASH160 of the compressed public key
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.identifier();
        [id[0], id[1], id[2], id[3]]
    }

    /// HASH160 of the compressed public key
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&self.public_key)
    }

    /// Distance from the master node
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Child number including the hardened bit
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// True if this node was derived with a hardened index
    pub fn is_hardened(&self) -> bool {
        self.child_number & HARDENED_BIT != 0
    }

    /// Fingerprint of the parent captured at derivation time
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Chain code
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Private key bytes, absent for public-only nodes
    pub fn private_key(&self) -> Option<&[u8; 32]> {
        self.private_key.as_ref()
    }

    /// True if private key material is present
    pub fn is_private(&self) -> bool {
        self.private_key.is_some()
    }

    /// SEC1 compressed public key
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    /// SEC1 uncompressed public key (0x04 prefix)
    pub fn uncompressed_public_key(&self) -> Result<[u8; 65]> {
        let key = PublicKey::from_slice(&self.public_key)
            .map_err(|e| FlipbipError::InvalidPublicKey(e.to_string()))?;
        Ok(key.serialize_uncompressed())
    }
}

impl fmt::Debug for HDNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HDNode")
            .field("depth", &self.depth)
            .field("child_number", &format_args!("{:#010x}", self.child_number))
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("public_key", &hex::encode(self.public_key))
            .field("private", &self.is_private())
            .finish()
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]], depth: u8, index: u32) -> Result<Zeroizing<[u8; 64]>> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| invalid_derivation(depth, index, e))?;
    for part in parts {
        mac.update(part);
    }
    let mut digest = mac.finalize().into_bytes();
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&digest);
    digest.as_mut_slice().zeroize();
    Ok(out)
}

fn invalid_derivation(depth: u8, index: u32, reason: impl fmt::Display) -> FlipbipError {
    #[cfg(feature = "debug-derivation")]
    tracing::trace!(depth, index, %reason, "derivation rejected");
    FlipbipError::InvalidDerivation {
        depth,
        index,
        reason: reason.to_string(),
    }
}
