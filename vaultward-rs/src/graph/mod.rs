//! Relationships between notes: shared tags, backlinks and outgoing links.

pub mod related;
pub mod tags;

pub use related::{RelationQuery, relate};
pub use tags::count_tags;
