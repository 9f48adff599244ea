//! Move command implementation.

use crate::cli::args::MoveArgs;
use crate::cli::output::Output;
use crate::error::{Result, exit_code};
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &MoveArgs, output: &Output) -> Result<i32> {
    let result = vault.move_note(&args.from, &args.to, args.overwrite);
    output.print(&result)?;

    Ok(result.kind.map_or(exit_code::SUCCESS, |kind| kind.exit_code()))
}
