//! Wikilink target extraction.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// [[target]], [[target#heading]], [[target|alias]] and [[target#heading|alias]]
// Group 1 is the target; heading and alias are discarded.
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]|#]+)(?:#[^\]|]*)?(?:\|[^\]]+)?\]\]").unwrap()
});

/// Link targets of a note body: trimmed, lowercased, deduplicated and sorted.
pub fn parse_links(content: &str) -> Vec<String> {
    let links: BTreeSet<String> = WIKILINK
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .filter(|target| !target.is_empty())
        .collect();
    links.into_iter().collect()
}

/// Whether `links` contains `name`, ignoring case.
pub fn links_to(links: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    links.iter().any(|link| *link == name)
}
