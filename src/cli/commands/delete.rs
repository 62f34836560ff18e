//! `credvault delete` — remove the salt and encrypted credential files.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    vault.delete()?;

    output::success("All stored credentials deleted");

    if vault.override_active() {
        output::info("Environment override is still set and will keep supplying credentials.");
    }

    Ok(())
}
