//! Environment-variable override.
//!
//! Two named variables can supply the identifier and secret directly,
//! bypassing the encrypted file.  Lookups go through `EnvSource` so that
//! tests (and embedding applications) can supply their own environment
//! instead of the process-wide one.

use std::collections::HashMap;

use super::record::{CredentialSource, Credentials, SecretRecord};

/// Default variable holding the identifier.
pub const DEFAULT_IDENTIFIER_VAR: &str = "EMAIL_ADDRESS";

/// Default variable holding the secret.
pub const DEFAULT_SECRET_VAR: &str = "EMAIL_PASSWORD";

/// Something that can answer "what is the value of variable `name`?".
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
    fn var(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| (*v).to_string())
    }
}

/// The names of the two override variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideVars {
    pub identifier: String,
    pub secret: String,
}

impl Default for OverrideVars {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER_VAR.to_string(),
            secret: DEFAULT_SECRET_VAR.to_string(),
        }
    }
}

impl OverrideVars {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Look up both variables.  Returns credentials only when both are set
    /// and non-empty; a half-set override counts as absent.
    pub fn lookup(&self, env: &dyn EnvSource) -> Option<Credentials> {
        let identifier = env.var(&self.identifier).filter(|v| !v.is_empty())?;
        let secret = env.var(&self.secret).filter(|v| !v.is_empty())?;
        Some(Credentials::new(
            SecretRecord::new(identifier, secret),
            CredentialSource::Environment,
        ))
    }

    /// Returns `true` if both variables are set and non-empty.
    pub fn is_set(&self, env: &dyn EnvSource) -> bool {
        self.lookup(env).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_set_yields_credentials() {
        let env = [("EMAIL_ADDRESS", "a@b.c"), ("EMAIL_PASSWORD", "pw")];
        let creds = OverrideVars::default().lookup(&env).unwrap();
        assert_eq!(creds.as_pair(), ("a@b.c", "pw"));
        assert_eq!(creds.source(), CredentialSource::Environment);
    }

    #[test]
    fn half_set_is_absent() {
        let env = [("EMAIL_ADDRESS", "a@b.c")];
        assert!(OverrideVars::default().lookup(&env).is_none());
    }

    #[test]
    fn empty_value_is_absent() {
        let env = [("EMAIL_ADDRESS", "a@b.c"), ("EMAIL_PASSWORD", "")];
        assert!(!OverrideVars::default().is_set(&env));
    }

    #[test]
    fn custom_names_are_honoured() {
        let mut env = HashMap::new();
        env.insert("SMTP_USER".to_string(), "me".to_string());
        env.insert("SMTP_TOKEN".to_string(), "tok".to_string());

        let vars = OverrideVars::new("SMTP_USER", "SMTP_TOKEN");
        assert_eq!(vars.lookup(&env).unwrap().as_pair(), ("me", "tok"));
        assert!(OverrideVars::default().lookup(&env).is_none());
    }
}
