//! First-match excerpt search.

use crate::error::Result;
use crate::note::note_name;
use crate::parser::split_frontmatter;
use crate::search::matcher::compile_query;
use crate::types::{SearchHit, SearchParams};
use crate::uri::obsidian_uri;
use crate::vault::Vault;
use regex::Regex;

pub const DEFAULT_HIT_LIMIT: usize = 5;
pub const MAX_HIT_LIMIT: usize = 20;

// Characters of context kept on each side of the first match
const EXCERPT_RADIUS: usize = 21;

/// Which part of a note is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Body,
    Frontmatter,
    Whole,
}

impl Region {
    /// Neither flag set means the body only.
    pub fn from_flags(content: bool, frontmatter: bool) -> Self {
        match (content, frontmatter) {
            (true, true) => Region::Whole,
            (false, true) => Region::Frontmatter,
            _ => Region::Body,
        }
    }

    /// The searchable slice of `raw`.
    pub fn select(self, raw: &str) -> &str {
        match self {
            Region::Whole => raw,
            Region::Body => split_frontmatter(raw).content,
            Region::Frontmatter => split_frontmatter(raw).yaml.unwrap_or(""),
        }
    }
}

/// Excerpt around the first match of `pattern` in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub match_count: usize,
    pub line_number: usize,
}

/// Build the excerpt for the first match, or `None` when nothing matches.
pub fn excerpt(pattern: &Regex, text: &str) -> Option<Excerpt> {
    let first = pattern.find(text)?;

    let start = chars_back(text, first.start(), EXCERPT_RADIUS);
    let end = chars_forward(text, first.end(), EXCERPT_RADIUS);

    let mut snippet = text[start..end].trim().to_string();
    if start > 0 {
        snippet.insert_str(0, "...");
    }
    if end < text.len() {
        snippet.push_str("...");
    }

    Some(Excerpt {
        text: snippet,
        match_count: pattern.find_iter(text).count(),
        line_number: text[..first.start()].matches('\n').count() + 1,
    })
}

fn chars_back(text: &str, from: usize, n: usize) -> usize {
    text[..from]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(from)
}

fn chars_forward(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

impl Vault {
    /// Find notes containing a literal query, one excerpt per note.
    ///
    /// Files are visited in path order and the walk stops once `limit` hits
    /// are collected.
    pub fn search(&self, params: &SearchParams) -> Result<Vec<SearchHit>> {
        let pattern = compile_query(&params.query, false, params.case_sensitive)?;
        let limit = match params.limit {
            0 => DEFAULT_HIT_LIMIT,
            n => n.min(MAX_HIT_LIMIT),
        };
        let region = Region::from_flags(params.search_content, params.search_frontmatter);

        let files = self.list_notes()?;
        tracing::debug!(files = files.len(), query = %params.query, ?region, "excerpt search");

        let mut hits = Vec::new();
        for path in &files {
            if hits.len() >= limit {
                break;
            }

            let Some(note) = self.read_for_scan(path) else {
                continue;
            };

            if let Some(found) = excerpt(&pattern, region.select(&note.raw)) {
                hits.push(SearchHit {
                    path: path.clone(),
                    title: note_name(path).to_string(),
                    excerpt: found.text,
                    match_count: found.match_count,
                    line_number: found.line_number,
                    uri: obsidian_uri(self.root(), path),
                });
            }
        }

        tracing::debug!(hits = hits.len(), "excerpt search done");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PathFilter;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn vault_with(files: &[(&str, &str)]) -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let vault = Vault::open(dir.path(), PathFilter::default()).unwrap();
        (dir, vault)
    }

    fn params(query: &str) -> SearchParams {
        SearchParams {
            query: query.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_excerpt_short_text_unclipped() {
        let pattern = compile_query("fox", false, false).unwrap();
        let found = excerpt(&pattern, "  the quick fox  ").unwrap();
        assert_eq!(found.text, "the quick fox");
        assert_eq!(found.match_count, 1);
        assert_eq!(found.line_number, 1);
    }

    #[test]
    fn test_excerpt_clipped_both_sides() {
        let pattern = compile_query("needle", false, false).unwrap();
        let text = format!("{}needle{}", "a".repeat(30), "b".repeat(30));
        let found = excerpt(&pattern, &text).unwrap();
        assert_eq!(
            found.text,
            format!("...{}needle{}...", "a".repeat(21), "b".repeat(21))
        );
    }

    #[test]
    fn test_excerpt_counts_and_line() {
        let pattern = compile_query("x", false, false).unwrap();
        let found = excerpt(&pattern, "a\nb\nX marks\nx again").unwrap();
        assert_eq!(found.match_count, 2);
        assert_eq!(found.line_number, 3);
    }

    #[test]
    fn test_excerpt_multibyte_window() {
        let pattern = compile_query("ü", false, false).unwrap();
        let text = format!("{}ü{}", "é".repeat(25), "ö".repeat(25));
        let found = excerpt(&pattern, &text).unwrap();
        assert_eq!(found.text, format!("...{}ü{}...", "é".repeat(21), "ö".repeat(21)));
    }

    #[test]
    fn test_region_selection() {
        let raw = "---\nstatus: secret\n---\nbody text";
        assert_eq!(Region::from_flags(false, false).select(raw), "body text");
        assert_eq!(Region::from_flags(false, true).select(raw), "status: secret");
        assert_eq!(Region::from_flags(true, true).select(raw), raw);
        assert_eq!(Region::Frontmatter.select("no header"), "");
    }

    #[test]
    fn test_search_body_only_by_default() {
        let (_dir, vault) = vault_with(&[
            ("a.md", "---\ntag: alpha\n---\nnothing here"),
            ("b.md", "alpha in body"),
        ]);

        let hits = vault.search(&params("ALPHA")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "b.md");
        assert_eq!(hits[0].title, "b");
        assert!(hits[0].uri.starts_with("obsidian:///"));
        assert!(hits[0].uri.ends_with("/b"));

        let hits = vault
            .search(&SearchParams {
                search_frontmatter: true,
                ..params("alpha")
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "a.md");
    }

    #[test]
    fn test_search_case_sensitive() {
        let (_dir, vault) = vault_with(&[("a.md", "Rust"), ("b.md", "rust")]);
        let hits = vault
            .search(&SearchParams {
                case_sensitive: true,
                ..params("rust")
            })
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "b.md");
    }

    #[test]
    fn test_search_limits() {
        let files: Vec<(String, String)> = (0..30)
            .map(|i| (format!("n{:02}.md", i), "hit".to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        let (_dir, vault) = vault_with(&refs);

        assert_eq!(vault.search(&params("hit")).unwrap().len(), DEFAULT_HIT_LIMIT);

        let hits = vault
            .search(&SearchParams {
                limit: 100,
                ..params("hit")
            })
            .unwrap();
        assert_eq!(hits.len(), MAX_HIT_LIMIT);
        assert_eq!(hits[0].path, "n00.md");
        assert_eq!(hits[19].path, "n19.md");
    }

    #[test]
    fn test_search_query_is_literal() {
        let (_dir, vault) = vault_with(&[("a.md", "costs $5 (approx)")]);
        let hits = vault.search(&params("$5 (approx")).unwrap();
        assert_eq!(hits.len(), 1);
    }
}
