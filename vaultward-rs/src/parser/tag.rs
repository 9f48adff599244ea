//! Tag lexing (#tag and #tag/subtag) and per-note tag sets.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

// A hashtag anywhere in a line, used to flag search hits that land on a tag
static HASHTAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[a-zA-Z0-9_/-]+").unwrap());

// A hashtag at the start of the text or after whitespace; group 1 is the name
static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([a-zA-Z0-9_/-]+)").unwrap());

/// Byte ranges of every hashtag token in `line`, `#` included.
pub fn hashtag_spans(line: &str) -> Vec<Range<usize>> {
    HASHTAG_TOKEN.find_iter(line).map(|m| m.range()).collect()
}

/// Inline body tags in order of appearance, lowercased, without `#`.
pub fn parse_inline_tags(content: &str) -> Vec<String> {
    INLINE_TAG
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Tags declared in the `tags` frontmatter field (a string or a list of strings).
pub fn frontmatter_tags(frontmatter: &Mapping) -> Vec<String> {
    match frontmatter.get("tags") {
        Some(Value::String(tag)) => vec![tag.to_lowercase()],
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// The deduplicated, sorted tag set of a note.
pub fn extract_tags(frontmatter: &Mapping, body: &str) -> Vec<String> {
    let tags: BTreeSet<String> = frontmatter_tags(frontmatter)
        .into_iter()
        .chain(parse_inline_tags(body))
        .collect();
    tags.into_iter().collect()
}

/// Sorted intersection of two sorted tag sets.
pub fn shared_tags(left: &[String], right: &[String]) -> Vec<String> {
    let left: BTreeSet<&String> = left.iter().collect();
    right
        .iter()
        .filter(|tag| left.contains(tag))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
