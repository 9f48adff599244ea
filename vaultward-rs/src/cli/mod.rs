//! CLI command implementations.

pub mod args;
pub mod output;

pub mod content;
pub mod delete;
pub mod frontmatter;
pub mod links;
pub mod list;
pub mod rename;
pub mod search;
pub mod tags;

pub use args::{Cli, Commands};
pub use output::Output;
