//! Vaultward CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vaultward::cli::args::{Cli, Commands};
use vaultward::cli::output::Output;
use vaultward::cli::{content, delete, frontmatter, links, list, rename, search, tags};
use vaultward::config::Config;
use vaultward::error::{VaultError, exit_code};
use vaultward::filter::PathFilter;
use vaultward::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` overrides `-v`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<i32, VaultError> {
    let config = Config::load()?;
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::open(vault_path, PathFilter::new(&config.filter))?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Read(args) => content::read(&vault, args, &output)?,
        Commands::Write(args) => content::write(&vault, args, &output)?,
        Commands::Patch(args) => return content::patch(&vault, args, &output),
        Commands::Edit(args) => content::edit(&vault, args, &output)?,
        Commands::Delete(args) => return delete::run(&vault, args, &output),
        Commands::Move(args) => return rename::run(&vault, args, &output),
        Commands::Ls(args) => list::run(&vault, args, &output)?,
        Commands::Search(args) => search::search(&vault, args, &output)?,
        Commands::Find(args) => search::find(&vault, args, &output)?,
        Commands::Related(args) => links::run(&vault, args, &output)?,
        Commands::Tags => tags::run(&vault, &output)?,
        Commands::Validate(args) => return frontmatter::run(&vault, args, &output),
    }

    Ok(exit_code::SUCCESS)
}
