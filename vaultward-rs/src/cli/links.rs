//! Related-notes command.

use crate::cli::args::RelatedArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &RelatedArgs, output: &Output) -> Result<()> {
    let related = vault.related(&args.path, args.tags, args.links)?;
    output.print(&related)
}
