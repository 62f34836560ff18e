use thiserror::Error;

/// All errors that can occur in credvault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong passphrase or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    // --- Vault errors ---
    #[error("Vault state is corrupt: {0}")]
    CorruptState(String),

    #[error("Decrypted record is malformed: {0}")]
    MalformedRecord(String),

    #[error("A master passphrase is required for this operation")]
    PassphraseRequired,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl VaultError {
    /// Whether this error means "credentials unavailable" rather than a
    /// broken installation: a wrong passphrase or an unreadable record.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            VaultError::AuthenticationFailed | VaultError::MalformedRecord(_)
        )
    }
}

/// Convenience type alias for credvault results.
pub type Result<T> = std::result::Result<T, VaultError>;
