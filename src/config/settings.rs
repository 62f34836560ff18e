use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};
use crate::vault::env::{OverrideVars, DEFAULT_IDENTIFIER_VAR, DEFAULT_SECRET_VAR};

/// Project-level configuration, loaded from `.credvault.toml`.
///
/// Every field has a sensible default so credvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Salt file location (relative paths resolve against the project dir).
    #[serde(default = "default_salt_file")]
    pub salt_file: String,

    /// Encrypted blob location (relative paths resolve against the project dir).
    #[serde(default = "default_blob_file")]
    pub blob_file: String,

    /// Environment variable that overrides the stored identifier.
    #[serde(default = "default_identifier_var")]
    pub identifier_var: String,

    /// Environment variable that overrides the stored secret.
    #[serde(default = "default_secret_var")]
    pub secret_var: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_salt_file() -> String {
    ".config_salt".to_string()
}

fn default_blob_file() -> String {
    ".email_config.enc".to_string()
}

fn default_identifier_var() -> String {
    DEFAULT_IDENTIFIER_VAR.to_string()
}

fn default_secret_var() -> String {
    DEFAULT_SECRET_VAR.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            salt_file: default_salt_file(),
            blob_file: default_blob_file(),
            identifier_var: default_identifier_var(),
            secret_var: default_secret_var(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".credvault.toml";

    /// Load settings from `<project_dir>/.credvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot describe a usable vault.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("salt_file", &self.salt_file),
            ("blob_file", &self.blob_file),
            ("identifier_var", &self.identifier_var),
            ("secret_var", &self.secret_var),
        ] {
            if value.trim().is_empty() {
                return Err(VaultError::Config(format!("{field} cannot be empty")));
            }
        }

        if self.salt_file == self.blob_file {
            return Err(VaultError::Config(
                "salt_file and blob_file must be different files".into(),
            ));
        }

        Ok(())
    }

    /// Full path to the salt file.
    pub fn salt_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.salt_file)
    }

    /// Full path to the encrypted blob.
    pub fn blob_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.blob_file)
    }

    /// The configured override variable names.
    pub fn override_vars(&self) -> OverrideVars {
        OverrideVars::new(&self.identifier_var, &self.secret_var)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
