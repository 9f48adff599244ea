//! CLI argument definitions using clap.

use crate::types::WriteMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultward")]
#[command(author, version, about = "Safe, structured access to an Obsidian vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Log filter directive for the verbosity flag.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a note's frontmatter and body
    Read(ReadArgs),

    /// Write a note (overwrite, append or prepend)
    Write(WriteArgs),

    /// Replace an exact string in a note
    Patch(PatchArgs),

    /// Replace text and/or merge frontmatter keys in one step
    Edit(EditArgs),

    /// Delete a note (requires confirmation)
    Delete(DeleteArgs),

    /// Move or rename a note
    #[command(alias = "rename")]
    Move(MoveArgs),

    /// List a directory
    Ls(LsArgs),

    /// Search lines across the vault, with context
    Search(SearchArgs),

    /// Find notes containing text, one excerpt per note
    Find(FindArgs),

    /// Find notes related by tags or links
    Related(RelatedArgs),

    /// Count tags across the vault
    Tags,

    /// Check a note's frontmatter for values that are not plain data
    Validate(ValidateArgs),
}

// === Read ===

#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Path to the note (relative to vault)
    pub path: String,

    /// First body line to return (0-indexed)
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Number of body lines to return (0 = all)
    #[arg(long, default_value = "0")]
    pub limit: usize,

    /// Print the body text only, not serialized
    #[arg(long)]
    pub raw: bool,
}

// === Write ===

#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Path to the note (relative to vault)
    pub path: String,

    /// Body content (use \n for newlines)
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read body content from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Frontmatter as a YAML or JSON mapping
    #[arg(long)]
    pub frontmatter: Option<String>,

    /// How to combine with an existing note
    #[arg(long, value_enum, default_value = "overwrite")]
    pub mode: WriteMode,
}

// === Patch ===

#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// Path to the note (relative to vault)
    pub path: String,

    /// Exact text to find
    #[arg(long = "old")]
    pub old_text: String,

    /// Replacement text
    #[arg(long = "new")]
    pub new_text: String,

    /// Replace every occurrence instead of requiring exactly one
    #[arg(long = "all")]
    pub replace_all: bool,
}

// === Edit ===

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Path to the note (relative to vault)
    pub path: String,

    /// Exact text to find
    #[arg(long = "old")]
    pub old_text: Option<String>,

    /// Replacement text
    #[arg(long = "new", default_value = "")]
    pub new_text: String,

    /// Replace every occurrence instead of requiring exactly one
    #[arg(long = "all")]
    pub replace_all: bool,

    /// Frontmatter keys to merge, as a YAML or JSON mapping
    #[arg(long)]
    pub frontmatter: Option<String>,
}

// === Delete ===

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Path to the note to delete
    pub path: String,

    /// Repeat the path to confirm deletion
    #[arg(long)]
    pub confirm: String,
}

// === Move ===

#[derive(Parser, Debug)]
pub struct MoveArgs {
    /// Current path
    pub from: String,

    /// New path
    pub to: String,

    /// Replace the target if it exists
    #[arg(long)]
    pub overwrite: bool,
}

// === Ls ===

#[derive(Parser, Debug)]
pub struct LsArgs {
    /// Directory to list (default: vault root)
    #[arg(default_value = ".")]
    pub path: String,
}

// === Search ===

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Treat the query as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Match case exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Lines of context around each match (0 = default of 2)
    #[arg(long, default_value = "0")]
    pub context: usize,

    /// Files per page (0 = default of 15)
    #[arg(long, default_value = "0")]
    pub limit: usize,

    /// Files to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

// === Find ===

#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Text to find
    pub query: String,

    /// Search note bodies (default when no region is given)
    #[arg(long)]
    pub content: bool,

    /// Search frontmatter
    #[arg(long)]
    pub frontmatter: bool,

    /// Match case exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Maximum results (0 = default of 5, capped at 20)
    #[arg(long, default_value = "0")]
    pub limit: usize,
}

// === Related ===

#[derive(Parser, Debug)]
pub struct RelatedArgs {
    /// Path to the source note
    pub path: String,

    /// Only relations through shared tags
    #[arg(long)]
    pub tags: bool,

    /// Only relations through wikilinks
    #[arg(long)]
    pub links: bool,
}

// === Validate ===

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the note
    pub path: String,
}
