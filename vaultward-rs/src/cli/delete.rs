//! Delete command implementation.

use crate::cli::args::DeleteArgs;
use crate::cli::output::Output;
use crate::error::{Result, exit_code};
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &DeleteArgs, output: &Output) -> Result<i32> {
    let result = vault.delete_note(&args.path, &args.confirm);
    output.print(&result)?;

    if result.success {
        output.info(&result.message);
    }
    Ok(result.kind.map_or(exit_code::SUCCESS, |kind| kind.exit_code()))
}
