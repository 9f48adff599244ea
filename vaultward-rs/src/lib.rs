//! Vaultward - security-bounded access to Obsidian-style vaults.
//!
//! # Overview
//!
//! Vaultward gives a caller structured access to a directory of markdown notes:
//! - Path resolution that never leaves the vault root, plus an ignore/extension filter
//! - Frontmatter parsing, validation and write-mode merging
//! - Exact-text patching
//! - Parallel line-level and excerpt search
//! - Tag frequency and tag/wikilink relationships between notes
//!
//! # Example
//!
//! ```no_run
//! use vaultward::{PathFilter, SearchAdvancedParams, Vault};
//!
//! // Open a vault
//! let vault = Vault::open("/path/to/vault", PathFilter::default()).unwrap();
//!
//! // Read a note
//! let note = vault.read_note("projects/plan.md").unwrap();
//! println!("{:?}", note.frontmatter);
//!
//! // Search it
//! let results = vault
//!     .search_advanced(&SearchAdvancedParams {
//!         query: "deadline".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! println!("{} files matched", results.total_files);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod note;
pub mod parser;
pub mod patch;
pub mod scan;
pub mod search;
pub mod types;
pub mod uri;
pub mod vault;

// Re-export main types at crate root
pub use config::{Config, FilterConfig};
pub use error::{ErrorKind, Result, VaultError};
pub use filter::PathFilter;
pub use parser::{FrontmatterValidation, ParsedNote};
pub use types::*;
pub use vault::{ResolvedPath, Vault};
