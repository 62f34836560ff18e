//! `credvault status` — report what is on disk without decrypting anything.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::VaultState;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    let vars = vault.override_vars();

    println!("salt file:  {}", vault.salt_path().display());
    println!("blob file:  {}", vault.blob_path().display());
    println!("state:      {}", vault.state());
    println!(
        "override:   {} ({} / {})",
        if vault.override_active() { "active" } else { "inactive" },
        vars.identifier,
        vars.secret
    );

    if vault.state() == VaultState::Orphaned {
        output::warning("The salt file is missing; the stored credentials can no longer be decrypted.");
        output::tip("Run `credvault delete` and save the credentials again.");
    } else if !vault.exists() {
        output::info("No credentials available.");
    }

    Ok(())
}
