//! Line-level search with context windows and pagination.

use crate::error::Result;
use crate::scan::parallel_map;
use crate::search::matcher::{compile_query, is_tag_match};
use crate::types::{FileMatches, SearchAdvancedParams, SearchAdvancedResults, SearchMatch};
use crate::vault::Vault;
use regex::Regex;

pub const DEFAULT_CONTEXT_LINES: usize = 2;
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Every matching line of `content`, with surrounding context.
pub fn match_lines(pattern: &Regex, content: &str, context_lines: usize) -> Vec<SearchMatch> {
    let lines: Vec<&str> = content.split('\n').collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(idx, line)| {
            let start = idx.saturating_sub(context_lines);
            let end = idx
                .saturating_add(context_lines)
                .saturating_add(1)
                .min(lines.len());
            SearchMatch {
                line: idx + 1,
                context: lines[start..end].join("\n"),
                is_tag: is_tag_match(pattern, line),
            }
        })
        .collect()
}

impl Vault {
    /// Search every allowed file line by line.
    ///
    /// Files are scanned in parallel; results keep path order, and the page
    /// is cut after the full result set is known.
    pub fn search_advanced(&self, params: &SearchAdvancedParams) -> Result<SearchAdvancedResults> {
        let pattern = compile_query(&params.query, params.use_regex, params.case_sensitive)?;
        let context_lines = match params.context_lines {
            0 => DEFAULT_CONTEXT_LINES,
            n => n,
        };
        let limit = match params.limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n,
        };

        let files = self.list_notes()?;
        tracing::debug!(files = files.len(), query = %params.query, "advanced search");

        let all: Vec<FileMatches> = parallel_map(&files, |path| {
            let note = self.read_for_scan(path)?;
            let matches = match_lines(&pattern, &note.raw, context_lines);
            (!matches.is_empty()).then(|| FileMatches {
                path: path.clone(),
                matches,
            })
        });

        let total_files = all.len();
        let results: Vec<FileMatches> = all.into_iter().skip(params.offset).take(limit).collect();
        let has_more = total_files > params.offset + results.len();

        tracing::debug!(total_files, returned = results.len(), "advanced search done");
        Ok(SearchAdvancedResults {
            results,
            total_files,
            has_more,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PathFilter;
    use crate::error::VaultError;
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

    fn params(query: &str) -> SearchAdvancedParams {
        SearchAdvancedParams {
            query: query.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_covers_whole_small_file() {
        let (_dir, vault) = vault_with(&[("a.md", "one\ntwo\nneedle\nfour\nfive")]);

        let results = vault.search_advanced(&params("needle")).unwrap();
        assert_eq!(results.total_files, 1);
        assert!(!results.has_more);

        let matches = &results.results[0].matches;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line, 3);
        assert_eq!(matches[0].context, "one\ntwo\nneedle\nfour\nfive");
        assert!(!matches[0].is_tag);
    }

    #[test]
    fn test_context_is_clipped() {
        let pattern = compile_query("x", false, false).unwrap();
        let matches = match_lines(&pattern, "x\na\nb\nc\nx", 1);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].context, "x\na");
        assert_eq!(matches[1].line, 5);
        assert_eq!(matches[1].context, "c\nx");
    }

    #[test]
    fn test_huge_context_is_clipped_to_file() {
        let (_dir, vault) = vault_with(&[("a.md", "line1\nline2\nline3 keyword\nline4\nline5")]);

        let results = vault
            .search_advanced(&SearchAdvancedParams {
                context_lines: usize::MAX,
                ..params("keyword")
            })
            .unwrap();

        let matches = &results.results[0].matches;
        assert_eq!(matches[0].line, 3);
        assert_eq!(matches[0].context, "line1\nline2\nline3 keyword\nline4\nline5");
    }

    #[test]
    fn test_pagination_in_path_order() {
        let files: Vec<(String, String)> = (1..=5)
            .map(|i| (format!("note{}.md", i), "shared term".to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        let (_dir, vault) = vault_with(&refs);

        let results = vault
            .search_advanced(&SearchAdvancedParams {
                limit: 2,
                offset: 2,
                ..params("shared")
            })
            .unwrap();

        assert_eq!(results.total_files, 5);
        assert!(results.has_more);
        let paths: Vec<&str> = results.results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["note3.md", "note4.md"]);
    }

    #[test]
    fn test_offset_past_end() {
        let (_dir, vault) = vault_with(&[("a.md", "hit"), ("b.md", "hit")]);
        let results = vault
            .search_advanced(&SearchAdvancedParams {
                offset: 10,
                ..params("hit")
            })
            .unwrap();
        assert!(results.results.is_empty());
        assert_eq!(results.total_files, 2);
        assert!(!results.has_more);
    }

    #[test]
    fn test_default_page_size() {
        let files: Vec<(String, String)> = (0..20)
            .map(|i| (format!("n{:02}.md", i), "hit".to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        let (_dir, vault) = vault_with(&refs);

        let results = vault.search_advanced(&params("hit")).unwrap();
        assert_eq!(results.results.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(results.total_files, 20);
        assert!(results.has_more);
    }

    #[test]
    fn test_skips_filtered_and_hidden() {
        let (_dir, vault) = vault_with(&[
            ("visible.md", "term"),
            (".obsidian/workspace.md", "term"),
            (".hidden/secret.md", "term"),
            ("pic.png", "term"),
        ]);

        let results = vault.search_advanced(&params("term")).unwrap();
        let paths: Vec<&str> = results.results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["visible.md"]);
    }

    #[test]
    fn test_regex_and_tags() {
        let (_dir, vault) = vault_with(&[("t.md", "plain project\nfiled #project")]);

        let results = vault
            .search_advanced(&SearchAdvancedParams {
                use_regex: true,
                ..params("proj.ct")
            })
            .unwrap();
        let matches = &results.results[0].matches;
        assert_eq!(matches.len(), 2);
        assert!(!matches[0].is_tag);
        assert!(matches[1].is_tag);
    }

    #[test]
    fn test_invalid_queries() {
        let (_dir, vault) = vault_with(&[]);
        assert!(matches!(
            vault.search_advanced(&params(" ")),
            Err(VaultError::InvalidArgument(_))
        ));
        assert!(matches!(
            vault.search_advanced(&SearchAdvancedParams {
                use_regex: true,
                ..params("[")
            }),
            Err(VaultError::InvalidPattern(_))
        ));
    }
}
