//! `credvault save` — encrypt and store an identifier/secret pair.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, read_secret_from_stdin, require_passphrase, Cli};
use crate::errors::Result;

/// Execute the `save` command.
pub fn execute(cli: &Cli, identifier: &str, secret: Option<&str>) -> Result<()> {
    let secret_value = match secret {
        Some(v) => {
            output::warning("Secret provided on command line — it may appear in shell history.");
            Zeroizing::new(v.to_string())
        }
        None => read_secret_from_stdin()?,
    };

    let passphrase = require_passphrase()?;
    let vault = open_vault(cli)?;
    vault.save(identifier, &secret_value, &passphrase)?;

    output::success(&format!(
        "Credentials for '{identifier}' saved to {}",
        vault.blob_path().display()
    ));

    if vault.override_active() {
        let vars = vault.override_vars();
        output::warning(&format!(
            "{} and {} are set — they take precedence over the saved credentials.",
            vars.identifier, vars.secret
        ));
    }

    Ok(())
}
