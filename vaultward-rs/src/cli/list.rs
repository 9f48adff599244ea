//! Directory listing command.

use crate::cli::args::LsArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &LsArgs, output: &Output) -> Result<()> {
    let listing = vault.list_directory(&args.path)?;
    output.print(&listing)
}
