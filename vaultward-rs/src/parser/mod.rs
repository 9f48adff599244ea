//! Lexers and codecs for note text.

pub mod frontmatter;
pub mod tag;
pub mod wikilink;

pub use frontmatter::{
    FrontmatterValidation, ParsedNote, merge_for_write, parse_note, split_frontmatter,
    stringify_note, update_frontmatter, validate_frontmatter,
};
pub use tag::{extract_tags, hashtag_spans};
pub use wikilink::parse_links;
