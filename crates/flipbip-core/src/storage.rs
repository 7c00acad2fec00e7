//! Persistence of the wallet mnemonic.
//!
//! [`KeystoreFile`] seals the secret with AES-256-GCM under a key stretched
//! from a password with PBKDF2-HMAC-SHA256. The file is JSON:
//!
//! ```json
//! { "version": 1, "iterations": 600000, "salt": "…", "nonce": "…", "ciphertext": "…" }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use aes_gcm::aead::{Aead, AeadCore, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use flipbip_error::{FlipbipError, Result, StorageContext};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Default PBKDF2 rounds for newly written keystores
pub const DEFAULT_KDF_ITERATIONS: u32 = 600_000;

/// Highest PBKDF2 round count a keystore may ask for
pub const MAX_KDF_ITERATIONS: u32 = 10 * DEFAULT_KDF_ITERATIONS;

const KEYSTORE_VERSION: u32 = 1;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Where the wallet keeps its mnemonic between runs
pub trait SecretStore {
    /// Stored secret, `None` if nothing has been saved yet
    fn load_secret(&self) -> Result<Option<Zeroizing<String>>>;

    /// Replaces the stored secret
    fn save_secret(&mut self, secret: &str) -> Result<()>;
}

impl<S: SecretStore + ?Sized> SecretStore for &mut S {
    fn load_secret(&self) -> Result<Option<Zeroizing<String>>> {
        (**self).load_secret()
    }

    fn save_secret(&mut self, secret: &str) -> Result<()> {
        (**self).save_secret(secret)
    }
}

/// In-process store
#[derive(Default)]
pub struct MemoryStore {
    secret: Option<Zeroizing<String>>,
    fail_load: bool,
    fail_save: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `secret`
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Some(Zeroizing::new(secret.to_string())),
            ..Self::default()
        }
    }

    /// Store whose loads always fail
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    /// Store whose saves always fail
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_none()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("has_secret", &self.secret.is_some())
            .finish()
    }
}

impl SecretStore for MemoryStore {
    fn load_secret(&self) -> Result<Option<Zeroizing<String>>> {
        if self.fail_load {
            return Err(FlipbipError::StorageLoadFailure("memory store unavailable".into()));
        }
        Ok(self.secret.clone())
    }

    fn save_secret(&mut self, secret: &str) -> Result<()> {
        if self.fail_save {
            return Err(FlipbipError::StorageSaveFailure("memory store is read-only".into()));
        }
        self.secret = Some(Zeroizing::new(secret.to_string()));
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SealedSecret {
    version: u32,
    iterations: u32,
    salt: String,
    nonce: String,
    ciphertext: String,
}

/// Password-protected keystore file
pub struct KeystoreFile {
    path: PathBuf,
    password: Zeroizing<String>,
    iterations: u32,
}

impl KeystoreFile {
    pub fn new(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: Zeroizing::new(password.into()),
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }

    /// PBKDF2 rounds used when writing. Reading always uses the count
    /// recorded in the file.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.clamp(1, MAX_KDF_ITERATIONS);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn derive_key(&self, salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LEN]> {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2_hmac::<Sha256>(self.password.as_bytes(), salt, iterations, &mut key[..]);
        key
    }

    fn open(&self, sealed: &SealedSecret) -> Result<Zeroizing<String>> {
        if sealed.version != KEYSTORE_VERSION {
            return Err(FlipbipError::StorageLoadFailure(format!(
                "unsupported keystore version {}",
                sealed.version
            )));
        }
        if sealed.iterations == 0 || sealed.iterations > MAX_KDF_ITERATIONS {
            return Err(FlipbipError::StorageLoadFailure(format!(
                "keystore iterations {} outside 1..={MAX_KDF_ITERATIONS}",
                sealed.iterations
            )));
        }
        let salt = hex::decode(&sealed.salt).load_context("keystore salt")?;
        let nonce = hex::decode(&sealed.nonce).load_context("keystore nonce")?;
        let ciphertext = hex::decode(&sealed.ciphertext).load_context("keystore ciphertext")?;
        if salt.len() != SALT_LEN || nonce.len() != NONCE_LEN {
            return Err(FlipbipError::StorageLoadFailure(
                "keystore salt or nonce has the wrong length".into(),
            ));
        }

        let key = self.derive_key(&salt, sealed.iterations);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
                .load_context("wrong password or corrupted keystore")?,
        );
        let secret = std::str::from_utf8(&plaintext).load_context("keystore plaintext")?;
        Ok(Zeroizing::new(secret.to_string()))
    }

    fn seal(&self, secret: &str) -> Result<SealedSecret> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .save_context("keystore salt")?;
        let key = self.derive_key(&salt, self.iterations);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key[..]));
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, secret.as_bytes())
            .save_context("keystore encryption")?;
        Ok(SealedSecret {
            version: KEYSTORE_VERSION,
            iterations: self.iterations,
            salt: hex::encode(salt),
            nonce: hex::encode(nonce),
            ciphertext: hex::encode(ciphertext),
        })
    }
}

impl std::fmt::Debug for KeystoreFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoreFile")
            .field("path", &self.path)
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl SecretStore for KeystoreFile {
    fn load_secret(&self) -> Result<Option<Zeroizing<String>>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no keystore yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(FlipbipError::StorageLoadFailure(format!(
                    "{}: {e}",
                    self.path.display()
                )))
            }
        };
        let sealed: SealedSecret = serde_json::from_str(&json).load_context("keystore json")?;
        let secret = self.open(&sealed).map_err(|e| {
            warn!(path = %self.path.display(), "keystore could not be opened");
            e
        })?;
        debug!(path = %self.path.display(), "keystore opened");
        Ok(Some(secret))
    }

    fn save_secret(&mut self, secret: &str) -> Result<()> {
        let sealed = self.seal(secret)?;
        let json = serde_json::to_string_pretty(&sealed).save_context("keystore json")?;
        // write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).save_context(tmp.display().to_string())?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(FlipbipError::StorageSaveFailure(format!(
                "{}: {e}",
                self.path.display()
            )));
        }
        info!(path = %self.path.display(), iterations = self.iterations, "keystore written");
        Ok(())
    }
}
