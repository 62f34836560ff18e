//! High-level vault operations.
//!
//! `CredentialVault` ties the salt file, the key derivation, and the blob
//! codec together, and applies the environment-first resolution policy.
//! Key material and the decrypted record live only for the duration of a
//! single call.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::codec;
use super::env::{EnvSource, OverrideVars, ProcessEnv};
use super::fs::{remove_if_exists, write_private};
use super::record::{CredentialSource, Credentials, SecretRecord};
use super::salt::SaltStore;
use crate::config::Settings;
use crate::crypto::kdf::derive_key;
use crate::errors::{Result, VaultError};

/// Which resources are currently on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// Neither salt nor blob.
    Empty,
    /// Salt written, no blob yet.
    Salted,
    /// Salt and blob present.
    Sealed,
    /// Blob present but its salt is gone; it can never be decrypted again.
    Orphaned,
}

impl std::fmt::Display for VaultState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VaultState::Empty => "empty",
            VaultState::Salted => "salted",
            VaultState::Sealed => "sealed",
            VaultState::Orphaned => "orphaned",
        };
        f.write_str(s)
    }
}

/// Outcome of resolving credentials, with the reason when none are found.
#[derive(Debug)]
pub enum Resolution {
    /// Credentials were found, from the environment or the vault.
    Found(Credentials),
    /// No override and no blob on disk.
    Absent,
    /// A blob exists but no passphrase was supplied to open it.
    PassphraseRequired,
    /// A blob exists but could not be opened.
    Unavailable(VaultError),
}

impl Resolution {
    /// Collapse to the caller-facing "credentials or nothing" view.
    pub fn into_credentials(self) -> Option<Credentials> {
        match self {
            Resolution::Found(creds) => Some(creds),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// The credential vault handle.
///
/// Identified by its two file locations; holds no secret state between
/// calls.
pub struct CredentialVault {
    salt: SaltStore,
    blob_path: PathBuf,
    vars: OverrideVars,
    env: Box<dyn EnvSource>,
}

impl CredentialVault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// A vault at the given salt and blob locations, reading the override
    /// from the process environment under the default variable names.
    pub fn new(salt_path: impl Into<PathBuf>, blob_path: impl Into<PathBuf>) -> Self {
        Self {
            salt: SaltStore::new(salt_path),
            blob_path: blob_path.into(),
            vars: OverrideVars::default(),
            env: Box::new(ProcessEnv),
        }
    }

    /// A vault configured from project settings, with relative paths
    /// resolved against `project_dir`.
    pub fn from_settings(settings: &Settings, project_dir: &Path) -> Self {
        Self::new(
            settings.salt_path(project_dir),
            settings.blob_path(project_dir),
        )
        .with_override_vars(settings.override_vars())
    }

    /// Replace the environment the override is read from.
    pub fn with_env_source(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Replace the names of the override variables.
    pub fn with_override_vars(mut self, vars: OverrideVars) -> Self {
        self.vars = vars;
        self
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `(identifier, secret)` under `passphrase` and write the blob,
    /// replacing any previous one.  Creates the salt on first use.
    pub fn save(&self, identifier: &str, secret: &str, passphrase: &str) -> Result<()> {
        if passphrase.is_empty() {
            return Err(VaultError::PassphraseRequired);
        }

        let salt = self.salt.get_or_create()?;
        let key = derive_key(passphrase, &salt);
        let record = SecretRecord::new(identifier, secret);
        let blob = codec::seal(&record, &key)?;

        write_private(&self.blob_path, &blob)?;
        debug!(path = %self.blob_path.display(), "credentials sealed to vault");
        Ok(())
    }

    /// Resolve credentials, reporting why none were found.
    ///
    /// Order: environment override, then blob presence, then decryption.
    /// Never returns an error; failures become `Unavailable`.
    pub fn resolve(&self, passphrase: Option<&str>) -> Resolution {
        if let Some(creds) = self.vars.lookup(&*self.env) {
            debug!("credentials resolved from environment override");
            return Resolution::Found(creds);
        }

        if !self.blob_path.exists() {
            return Resolution::Absent;
        }

        let passphrase = match passphrase {
            Some(p) if !p.is_empty() => p,
            _ => {
                warn!(path = %self.blob_path.display(), "vault present but no passphrase supplied");
                return Resolution::PassphraseRequired;
            }
        };

        match self.unseal(passphrase) {
            Ok(record) => Resolution::Found(Credentials::new(record, CredentialSource::Vault)),
            Err(e) => {
                warn!(path = %self.blob_path.display(), error = %e, "failed to decrypt credentials");
                Resolution::Unavailable(e)
            }
        }
    }

    /// Resolve credentials, or `None` if they are unavailable for any
    /// reason.  A wrong passphrase is not an error here.
    pub fn load(&self, passphrase: Option<&str>) -> Option<Credentials> {
        self.resolve(passphrase).into_credentials()
    }

    /// `true` if the override is fully set or a blob file is present.
    ///
    /// Does not decrypt, so a blob that would fail to open still counts.
    pub fn exists(&self) -> bool {
        self.vars.is_set(&*self.env) || self.blob_path.exists()
    }

    /// Remove the blob and the salt.  Missing files are not an error.
    pub fn delete(&self) -> Result<()> {
        let removed_blob = remove_if_exists(&self.blob_path)?;
        let removed_salt = self.salt.remove()?;
        debug!(removed_blob, removed_salt, "vault files deleted");
        Ok(())
    }

    /// Inspect which resources are on disk.
    pub fn state(&self) -> VaultState {
        match (self.salt.exists(), self.blob_path.exists()) {
            (false, false) => VaultState::Empty,
            (true, false) => VaultState::Salted,
            (true, true) => VaultState::Sealed,
            (false, true) => VaultState::Orphaned,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn salt_path(&self) -> &Path {
        self.salt.path()
    }

    pub fn blob_path(&self) -> &Path {
        &self.blob_path
    }

    pub fn override_vars(&self) -> &OverrideVars {
        &self.vars
    }

    /// `true` if the environment override would win over the vault.
    pub fn override_active(&self) -> bool {
        self.vars.is_set(&*self.env)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn unseal(&self, passphrase: &str) -> Result<SecretRecord> {
        let blob = fs::read(&self.blob_path)?;

        // A missing salt here means the blob was orphaned; deriving from a
        // fresh salt produces a key that cannot authenticate.
        let salt = self.salt.get_or_create()?;
        let key = derive_key(passphrase, &salt);
        codec::open(&blob, &key)
    }
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("salt_path", &self.salt.path())
            .field("blob_path", &self.blob_path)
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vault(dir: &TempDir) -> CredentialVault {
        CredentialVault::new(dir.path().join("salt"), dir.path().join("blob.enc"))
            .with_env_source(HashMap::<String, String>::new())
    }

    #[test]
    fn lifecycle_states() {
        let dir = TempDir::new().unwrap();
        let v = vault(&dir);
        assert_eq!(v.state(), VaultState::Empty);

        v.salt.get_or_create().unwrap();
        assert_eq!(v.state(), VaultState::Salted);

        v.save("id", "sec", "pw").unwrap();
        assert_eq!(v.state(), VaultState::Sealed);

        v.delete().unwrap();
        assert_eq!(v.state(), VaultState::Empty);
    }

    #[test]
    fn missing_salt_orphans_blob() {
        let dir = TempDir::new().unwrap();
        let v = vault(&dir);
        v.save("id", "sec", "pw").unwrap();
        fs::remove_file(v.salt_path()).unwrap();
        assert_eq!(v.state(), VaultState::Orphaned);

        match v.resolve(Some("pw")) {
            Resolution::Unavailable(VaultError::AuthenticationFailed) => {}
            other => panic!("expected authentication failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_passphrase_cannot_save() {
        let dir = TempDir::new().unwrap();
        let v = vault(&dir);
        assert!(matches!(
            v.save("id", "sec", ""),
            Err(VaultError::PassphraseRequired)
        ));
        assert_eq!(v.state(), VaultState::Empty);
    }

    #[test]
    fn blob_without_passphrase_requires_one() {
        let dir = TempDir::new().unwrap();
        let v = vault(&dir);
        v.save("id", "sec", "pw").unwrap();

        assert!(matches!(v.resolve(None), Resolution::PassphraseRequired));
        assert!(v.load(None).is_none());
    }

    #[test]
    fn load_on_empty_vault_does_not_create_salt() {
        let dir = TempDir::new().unwrap();
        let v = vault(&dir);
        assert!(matches!(v.resolve(Some("pw")), Resolution::Absent));
        assert_eq!(v.state(), VaultState::Empty);
    }

    #[test]
    fn corrupt_salt_degrades_to_unavailable() {
        let dir = TempDir::new().unwrap();
        let v = vault(&dir);
        v.save("id", "sec", "pw").unwrap();
        fs::write(v.salt_path(), b"short").unwrap();

        assert!(matches!(
            v.resolve(Some("pw")),
            Resolution::Unavailable(VaultError::CorruptState(_))
        ));
        // Saving over a corrupt salt is surfaced, not papered over.
        assert!(matches!(
            v.save("id", "sec", "pw"),
            Err(VaultError::CorruptState(_))
        ));
    }

    #[test]
    fn save_into_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let v = CredentialVault::new(dir.path().join("salt"), blocker.join("blob.enc"))
            .with_env_source(HashMap::<String, String>::new());
        assert!(v.save("id", "sec", "pw").is_err());
    }
}
