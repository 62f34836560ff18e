//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! The CLI never prompts.  The master passphrase comes from the
//! `CREDVAULT_PASSPHRASE` environment variable, and a secret being saved
//! comes from `--secret` or piped stdin.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::CredentialVault;

/// Environment variable holding the master passphrase.
pub const PASSPHRASE_ENV: &str = "CREDVAULT_PASSPHRASE";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CREDVAULT_LOG";

/// credvault CLI: passphrase-encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Passphrase-encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory holding the vault files and .credvault.toml
    #[arg(short, long, default_value = ".", global = true)]
    pub dir: PathBuf,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt and store an identifier/secret pair
    Save {
        /// Account identifier (e.g. an email address)
        identifier: String,

        /// Secret value (omit to read it from piped stdin)
        #[arg(long)]
        secret: Option<String>,
    },

    /// Resolve the stored credentials (environment override first)
    Load {
        /// Print the secret instead of a mask
        #[arg(long)]
        show_secret: bool,
    },

    /// Show which resources exist and which source would be used
    Status,

    /// Remove the salt and encrypted credential files
    Delete,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build the vault described by `<dir>/.credvault.toml` (or the defaults).
pub fn open_vault(cli: &Cli) -> Result<CredentialVault> {
    let settings = Settings::load(&cli.dir)?;
    Ok(CredentialVault::from_settings(&settings, &cli.dir))
}

/// Read the master passphrase from `CREDVAULT_PASSPHRASE`.
///
/// Returns `None` when the variable is unset or empty.  Wrapped in
/// `Zeroizing` so the passphrase is wiped from memory on drop.
pub fn passphrase_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Like `passphrase_from_env`, but a missing passphrase is an error.
pub fn require_passphrase() -> Result<Zeroizing<String>> {
    passphrase_from_env().ok_or_else(|| {
        VaultError::CommandFailed(format!(
            "no master passphrase — set {PASSPHRASE_ENV} in the environment"
        ))
    })
}

/// Read a secret value from stdin when it is piped.
///
/// Only the first line is used; the trailing newline is dropped.
pub fn read_secret_from_stdin() -> Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        return Err(VaultError::CommandFailed(
            "no secret supplied — pipe it on stdin or pass --secret".into(),
        ));
    }

    let mut buf = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut buf)?;
    let first_line = buf.lines().next().unwrap_or_default();
    if first_line.is_empty() {
        return Err(VaultError::CommandFailed("secret read from stdin is empty".into()));
    }
    Ok(Zeroizing::new(first_line.to_string()))
}

/// Install the global tracing subscriber.
///
/// The filter comes from `CREDVAULT_LOG` (e.g. `credvault=debug`) and
/// defaults to errors only; logs go to stderr so stdout stays clean for
/// command output.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("credvault=error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_save_with_inline_secret() {
        let cli = Cli::parse_from(["credvault", "--dir", "/tmp/p", "save", "me@x.y", "--secret", "s"]);
        assert_eq!(cli.dir, PathBuf::from("/tmp/p"));
        match cli.command {
            Commands::Save { identifier, secret } => {
                assert_eq!(identifier, "me@x.y");
                assert_eq!(secret.as_deref(), Some("s"));
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn dir_defaults_to_current_directory() {
        let cli = Cli::parse_from(["credvault", "status"]);
        assert_eq!(cli.dir, PathBuf::from("."));
    }
}
