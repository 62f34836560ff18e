//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is fixed: every blob on disk was sealed with a key
//! derived at exactly `KDF_ITERATIONS` rounds, so changing it would make
//! existing vaults unreadable.  The cost is the brute-force resistance, so
//! there is deliberately no fast path and no caching.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{VaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 round count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Raw salt bytes as stored in the salt file.
pub type Salt = [u8; SALT_LEN];

/// A 32-byte symmetric key derived from a passphrase.
///
/// The bytes are wiped when the key is dropped, so a key never outlives
/// the vault operation that derived it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// The URL-safe base64 form of the key (44 characters, padded).
    ///
    /// This is the portable representation other tools expect when a
    /// symmetric key has to travel as text.
    pub fn to_base64_url(&self) -> Zeroizing<String> {
        Zeroizing::new(URL_SAFE.encode(&self.bytes))
    }

    /// Parse a key from its URL-safe base64 form.
    pub fn from_base64_url(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(encoded.trim())
                .map_err(|e| VaultError::KeyDerivation(format!("invalid key encoding: {e}")))?,
        );

        let bytes: [u8; KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
            VaultError::KeyDerivation(format!(
                "key must decode to {KEY_LEN} bytes, got {}",
                decoded.len()
            ))
        })?;

        Ok(Self::new(bytes))
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a 32-byte key from a passphrase and salt.
///
/// The same passphrase + salt always produce the same key.  Any input is
/// accepted, including an empty passphrase; rejecting weak passphrases is
/// the caller's business.
pub fn derive_key(passphrase: &str, salt: &Salt) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, KDF_ITERATIONS, &mut bytes);
    let key = DerivedKey::new(bytes);
    bytes.zeroize();
    key
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
