//! Frontmatter validation command.

use crate::cli::args::ValidateArgs;
use crate::cli::output::Output;
use crate::error::{Result, exit_code};
use crate::parser::validate_frontmatter;
use crate::vault::Vault;

pub fn run(vault: &Vault, args: &ValidateArgs, output: &Output) -> Result<i32> {
    let note = vault.read_note(&args.path)?;
    let validation = validate_frontmatter(&note.frontmatter);
    output.print(&validation)?;

    Ok(if validation.valid {
        exit_code::SUCCESS
    } else {
        exit_code::INVALID_FRONTMATTER
    })
}
