//! `credvault load` — resolve credentials and print them.

use crate::cli::output;
use crate::cli::{open_vault, passphrase_from_env, Cli, PASSPHRASE_ENV};
use crate::errors::{Result, VaultError};
use crate::vault::Resolution;

/// Execute the `load` command.
pub fn execute(cli: &Cli, show_secret: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let passphrase = passphrase_from_env();

    match vault.resolve(passphrase.as_deref().map(String::as_str)) {
        Resolution::Found(creds) => {
            let shown = if show_secret {
                creds.secret().to_string()
            } else {
                output::mask(creds.secret())
            };
            println!("identifier: {}", creds.identifier());
            println!("secret:     {shown}");
            println!("source:     {}", creds.source());
            Ok(())
        }
        Resolution::Absent => {
            output::tip("Run `credvault save <identifier>` to store credentials.");
            Err(VaultError::CommandFailed("no credentials available".into()))
        }
        Resolution::PassphraseRequired => Err(VaultError::CommandFailed(format!(
            "credentials are stored but {PASSPHRASE_ENV} is not set"
        ))),
        Resolution::Unavailable(e) => {
            if e.is_decryption_failure() {
                output::tip(&format!("Check that {PASSPHRASE_ENV} holds the passphrase used to save."));
            }
            Err(VaultError::CommandFailed(format!(
                "credentials unavailable: {e}"
            )))
        }
    }
}
