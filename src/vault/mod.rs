//! Vault module — passphrase-encrypted credential storage.
//!
//! This module provides:
//! - The salt file lifecycle (`salt`)
//! - The `SecretRecord` / `Credentials` types (`record`)
//! - The encrypted blob format (`codec`)
//! - The environment-variable override (`env`)
//! - The high-level `CredentialVault` (`store`)

pub mod codec;
pub mod env;
mod fs;
pub mod record;
pub mod salt;
pub mod store;

// Re-export the most commonly used items.
pub use env::{EnvSource, OverrideVars, ProcessEnv};
pub use record::{CredentialSource, Credentials, SecretRecord};
pub use salt::SaltStore;
pub use store::{CredentialVault, Resolution, VaultState};
