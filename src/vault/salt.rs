//! Salt file lifecycle.
//!
//! The salt is created once and then reused for every key derivation.
//! Regenerating it while a blob exists would silently orphan that blob,
//! so nothing here ever overwrites an existing salt file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::fs::{remove_if_exists, write_private};
use crate::crypto::kdf::{generate_salt, Salt, SALT_LEN};
use crate::errors::{Result, VaultError};

/// Owns the salt file at a fixed location.
#[derive(Debug, Clone)]
pub struct SaltStore {
    path: PathBuf,
}

impl SaltStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a salt file is present.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored salt, or generate and persist a fresh one.
    ///
    /// Fails with `CorruptState` if the stored file is unreadable or is
    /// not exactly `SALT_LEN` bytes.
    pub fn get_or_create(&self) -> Result<Salt> {
        match fs::read(&self.path) {
            Ok(data) => Self::parse(&self.path, &data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create(),
            Err(e) => Err(VaultError::CorruptState(format!(
                "cannot read salt file {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Delete the salt file.  Returns `true` if one was removed.
    pub fn remove(&self) -> Result<bool> {
        Ok(remove_if_exists(&self.path)?)
    }

    fn create(&self) -> Result<Salt> {
        let salt = generate_salt();
        write_private(&self.path, &salt)?;
        debug!(path = %self.path.display(), "created new salt file");
        Ok(salt)
    }

    fn parse(path: &Path, data: &[u8]) -> Result<Salt> {
        data.try_into().map_err(|_| {
            VaultError::CorruptState(format!(
                "salt file {} must be exactly {SALT_LEN} bytes, got {}",
                path.display(),
                data.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_or_create_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = SaltStore::new(dir.path().join(".config_salt"));

        let first = store.get_or_create().unwrap();
        let second = store.get_or_create().unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(store.path()).unwrap(), first.to_vec());
    }

    #[test]
    fn existing_salt_is_returned_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salt");
        fs::write(&path, [7u8; SALT_LEN]).unwrap();

        let store = SaltStore::new(&path);
        assert_eq!(store.get_or_create().unwrap(), [7u8; SALT_LEN]);
    }

    #[test]
    fn wrong_length_is_corrupt_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("salt");
        fs::write(&path, [7u8; 15]).unwrap();

        let result = SaltStore::new(&path).get_or_create();
        assert!(matches!(result, Err(VaultError::CorruptState(_))));
        // The bad file must not be replaced behind the caller's back.
        assert_eq!(fs::read(&path).unwrap().len(), 15);
    }

    #[test]
    fn unreadable_salt_is_corrupt_state() {
        let dir = TempDir::new().unwrap();
        // A directory at the salt location cannot be read as a file.
        let path = dir.path().join("salt");
        fs::create_dir(&path).unwrap();

        let result = SaltStore::new(&path).get_or_create();
        assert!(matches!(result, Err(VaultError::CorruptState(_))));
    }

    #[test]
    fn remove_then_recreate_yields_new_salt() {
        let dir = TempDir::new().unwrap();
        let store = SaltStore::new(dir.path().join("salt"));

        let first = store.get_or_create().unwrap();
        assert!(store.remove().unwrap());
        assert!(!store.remove().unwrap());
        assert!(!store.exists());

        let second = store.get_or_create().unwrap();
        assert_ne!(first, second);
    }
}
