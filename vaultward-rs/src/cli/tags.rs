//! Tags command implementation.

use crate::cli::output::Output;
use crate::error::Result;
use crate::vault::Vault;

pub fn run(vault: &Vault, output: &Output) -> Result<()> {
    let summary = vault.tags()?;
    output.print(&summary)
}
