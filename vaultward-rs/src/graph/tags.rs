//! Vault-wide tag frequency.

use crate::error::Result;
use crate::parser::extract_tags;
use crate::scan::parallel_map;
use crate::types::{TagCount, TagsSummary};
use crate::vault::Vault;
use std::collections::BTreeMap;

/// Count how many notes carry each tag. Each inner list is one note's tag set.
pub fn count_tags(per_note: &[Vec<String>]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tags in per_note {
        for tag in tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect()
}

impl Vault {
    /// Tag counts across every allowed note, sorted by tag.
    pub fn tags(&self) -> Result<TagsSummary> {
        let files = self.list_notes()?;
        tracing::debug!(files = files.len(), "collecting tags");

        let per_note: Vec<Vec<String>> = parallel_map(&files, |path| {
            let note = self.read_for_scan(path)?;
            let tags = extract_tags(&note.frontmatter, &note.body);
            (!tags.is_empty()).then_some(tags)
        });

        let tags = count_tags(&per_note);
        tracing::debug!(tags = tags.len(), notes_with_tags = per_note.len(), "collected tags");
        Ok(TagsSummary {
            total_tags: tags.len(),
            total_notes: files.len(),
            notes_with_tags: per_note.len(),
            tags,
        })
    }
}
