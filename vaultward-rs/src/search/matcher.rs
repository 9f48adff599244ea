//! Query compilation shared by both search modes.

use crate::error::{Result, VaultError};
use crate::parser::hashtag_spans;
use regex::{Regex, RegexBuilder};

/// Compile a search query into a regex.
///
/// Literal queries are escaped first. Matching is case-insensitive unless
/// `case_sensitive` is set.
pub fn compile_query(query: &str, use_regex: bool, case_sensitive: bool) -> Result<Regex> {
    if query.trim().is_empty() {
        return Err(VaultError::InvalidArgument(
            "Search query cannot be empty".to_string(),
        ));
    }

    let pattern = if use_regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| VaultError::InvalidPattern(e.to_string()))
}

/// Whether some match of `pattern` in `line` falls entirely inside a hashtag.
pub fn is_tag_match(pattern: &Regex, line: &str) -> bool {
    let tags = hashtag_spans(line);
    if tags.is_empty() {
        return false;
    }

    pattern.find_iter(line).any(|m| {
        tags.iter()
            .any(|tag| tag.start <= m.start() && m.end() <= tag.end)
    })
}
