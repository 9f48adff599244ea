//! Read, write, patch and edit commands.

use crate::cli::args::{EditArgs, PatchArgs, ReadArgs, WriteArgs};
use crate::cli::output::Output;
use crate::error::{Result, VaultError, exit_code};
use crate::types::{EditRequest, WriteMode};
use crate::vault::Vault;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub path: String,
    pub mode: WriteMode,
    pub message: String,
}

/// Read content from args (--content, --file, or stdin).
fn read_input_content(content_arg: &Option<String>, file_arg: &Option<PathBuf>) -> Result<String> {
    if let Some(content) = content_arg {
        // Unescape newlines
        Ok(content.replace("\\n", "\n"))
    } else if let Some(path) = file_arg {
        Ok(std::fs::read_to_string(path)?)
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Err(VaultError::NoContentProvided)
    }
}

/// Parse a `--frontmatter` argument. JSON objects are valid YAML, so both work.
pub(crate) fn parse_frontmatter_arg(text: &str) -> Result<Mapping> {
    match serde_yaml::from_str::<Value>(text)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(VaultError::InvalidArgument(
            "Frontmatter must be a mapping of keys to values".to_string(),
        )),
    }
}

// === read ===

pub fn read(vault: &Vault, args: &ReadArgs, output: &Output) -> Result<()> {
    let window = vault.read_note_window(&args.path, args.offset, args.limit)?;

    if args.raw {
        output.print_raw(&window.content);
    } else {
        output.print(&window)?;
    }
    Ok(())
}

// === write ===

pub fn write(vault: &Vault, args: &WriteArgs, output: &Output) -> Result<()> {
    let body = read_input_content(&args.content, &args.file)?;
    let frontmatter = args
        .frontmatter
        .as_deref()
        .map(parse_frontmatter_arg)
        .transpose()?;

    vault.write_note(&args.path, &body, frontmatter.as_ref(), args.mode)?;

    output.print(&WriteResponse {
        path: args.path.clone(),
        mode: args.mode,
        message: format!("Successfully wrote note: {}", args.path),
    })
}

// === patch ===

pub fn patch(vault: &Vault, args: &PatchArgs, output: &Output) -> Result<i32> {
    let result = vault.patch_note(&args.path, &args.old_text, &args.new_text, args.replace_all);
    output.print(&result)?;

    Ok(result.kind.map_or(exit_code::SUCCESS, |kind| kind.exit_code()))
}

// === edit ===

pub fn edit(vault: &Vault, args: &EditArgs, output: &Output) -> Result<()> {
    let frontmatter = args
        .frontmatter
        .as_deref()
        .map(parse_frontmatter_arg)
        .transpose()?;

    if args.old_text.is_none() && frontmatter.is_none() {
        return Err(VaultError::InvalidArgument(
            "Nothing to edit: pass --old/--new or --frontmatter".to_string(),
        ));
    }

    let request = EditRequest {
        old_text: args.old_text.clone(),
        new_text: args.new_text.replace("\\n", "\n"),
        replace_all: args.replace_all,
        frontmatter,
    };

    let outcome = vault.edit_note(&args.path, &request)?;
    output.print(&outcome)
}
