//! Full-text search across vault notes.
//!
//! Two modes share the same query compilation: [`Vault::search_advanced`]
//! reports every matching line with context, [`Vault::search`] reports one
//! excerpt per note.
//!
//! [`Vault::search_advanced`]: crate::Vault::search_advanced
//! [`Vault::search`]: crate::Vault::search

pub mod advanced;
pub mod excerpt;
pub mod matcher;

pub use advanced::match_lines;
pub use excerpt::{Region, excerpt};
pub use matcher::{compile_query, is_tag_match};
