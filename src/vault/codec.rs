//! Encrypted blob format.
//!
//! A blob file has this layout:
//!
//! ```text
//! [CVLT: 4 bytes][version: 1 byte][nonce: 12 bytes][ciphertext + GCM tag: 16 bytes]
//! ```
//!
//! - **Magic** (`CVLT`): identifies the file as a credvault blob.
//! - **Version**: format version (currently `1`). Version 1 means
//!   PBKDF2-HMAC-SHA256 at 100 000 rounds and AES-256-GCM.
//! - The 5-byte header is passed to AES-GCM as associated data, so it is
//!   covered by the same tag as the ciphertext.
//! - The plaintext is the compact JSON of a `SecretRecord`.

use zeroize::Zeroizing;

use super::record::SecretRecord;
use crate::crypto::encryption::{self, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::DerivedKey;
use crate::errors::{Result, VaultError};

/// Magic bytes at the start of every blob.
const MAGIC: &[u8; 4] = b"CVLT";

/// Current blob format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version).
const HEADER_LEN: usize = 5;

/// Smallest well-formed blob: header + nonce + tag (empty plaintext).
pub const MIN_BLOB_LEN: usize = HEADER_LEN + NONCE_LEN + TAG_LEN;

fn header() -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];
    h[..4].copy_from_slice(MAGIC);
    h[4] = CURRENT_VERSION;
    h
}

/// Serialize and encrypt a record under `key`.
pub fn seal(record: &SecretRecord, key: &DerivedKey) -> Result<Vec<u8>> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(record)
            .map_err(|e| VaultError::EncryptionFailed(format!("record serialization: {e}")))?,
    );

    let header = header();
    let sealed = encryption::encrypt(key.as_bytes(), &plaintext, &header)?;

    let mut blob = Vec::with_capacity(HEADER_LEN + sealed.len());
    blob.extend_from_slice(&header);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Decrypt and parse a blob produced by `seal`.
///
/// A foreign header, truncation, a wrong key, or any altered byte all
/// surface as `AuthenticationFailed`.  Bytes that authenticate but do not
/// parse into the two-field record surface as `MalformedRecord`.
pub fn open(blob: &[u8], key: &DerivedKey) -> Result<SecretRecord> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(VaultError::AuthenticationFailed);
    }

    let (stored_header, sealed) = blob.split_at(HEADER_LEN);
    if stored_header != header().as_slice() {
        return Err(VaultError::AuthenticationFailed);
    }

    let plaintext = Zeroizing::new(encryption::decrypt(key.as_bytes(), sealed, stored_header)?);

    serde_json::from_slice(&plaintext).map_err(|e| VaultError::MalformedRecord(e.to_string()))
}
