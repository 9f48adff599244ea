//! Shared request and result types for Vaultward.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::Mapping;

/// How a write combines with an existing note.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the note entirely.
    #[default]
    Overwrite,
    /// Add the body after the existing body, merging frontmatter.
    Append,
    /// Add the body before the existing body, merging frontmatter.
    Prepend,
}

/// Outcome of an exact-text patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchResult {
    pub success: bool,
    pub path: String,
    pub message: String,

    /// Occurrences of the old text that were found.
    pub match_count: usize,

    /// Occurrences that were actually replaced.
    pub replaced: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl PatchResult {
    pub(crate) fn failure(path: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: path.to_string(),
            message: message.into(),
            match_count: 0,
            replaced: 0,
            kind: Some(kind),
        }
    }
}

/// Outcome of a confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub success: bool,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

/// Outcome of a move or rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub success: bool,
    pub old_path: String,
    pub new_path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

/// Entries directly inside one vault directory, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub path: String,
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

/// A line window over a note's body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteWindow {
    pub path: String,
    pub frontmatter: Mapping,
    pub content: String,
    pub total_lines: usize,
    pub offset: usize,
    pub truncated: bool,
}

/// A combined text replacement and frontmatter update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequest {
    /// Text to replace; `None` skips the text edit.
    pub old_text: Option<String>,
    pub new_text: String,
    pub replace_all: bool,
    /// Top-level keys to merge into the existing frontmatter.
    pub frontmatter: Option<Mapping>,
}

/// What [`EditRequest`] changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub path: String,
    pub replacements: usize,
    pub frontmatter_updated: bool,
}

/// Parameters for line-level search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchAdvancedParams {
    pub query: String,
    pub use_regex: bool,
    pub case_sensitive: bool,
    /// Lines of context around each hit; 0 means the default.
    pub context_lines: usize,
    /// Files per page; 0 means the default.
    pub limit: usize,
    pub offset: usize,
}

/// One matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// 1-indexed line number.
    pub line: usize,
    pub context: String,
    pub is_tag: bool,
}

/// All matching lines of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMatches {
    pub path: String,
    pub matches: Vec<SearchMatch>,
}

/// One page of line-level search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchAdvancedResults {
    pub results: Vec<FileMatches>,
    /// Files with at least one match, before pagination.
    pub total_files: usize,
    pub has_more: bool,
}

/// Parameters for excerpt search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub search_content: bool,
    pub search_frontmatter: bool,
    pub case_sensitive: bool,
    /// Maximum hits; 0 means the default.
    pub limit: usize,
}

/// One excerpt-level hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub path: String,
    pub title: String,
    pub excerpt: String,
    pub match_count: usize,
    /// 1-indexed line of the first match within the searched region.
    pub line_number: usize,
    pub uri: String,
}

/// Why two notes are related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    SharedTags,
    Backlink,
    Outgoing,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::SharedTags => "shared-tags",
            RelationKind::Backlink => "backlink",
            RelationKind::Outgoing => "outgoing",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A note related to the queried one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedNote {
    pub path: String,

    /// Serialized as a comma-joined label, e.g. `shared-tags,backlink`.
    #[serde(rename = "relation", serialize_with = "serialize_relations")]
    pub relations: Vec<RelationKind>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl RelatedNote {
    /// The comma-joined relation label.
    pub fn relation_label(&self) -> String {
        join_relations(&self.relations)
    }
}

fn join_relations(relations: &[RelationKind]) -> String {
    relations
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn serialize_relations<S>(relations: &[RelationKind], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&join_relations(relations))
}

/// Related notes for one source note, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedNotes {
    pub path: String,
    pub related: Vec<RelatedNote>,
}

/// A tag and the number of notes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Vault-wide tag frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagsSummary {
    pub tags: Vec<TagCount>,
    pub total_tags: usize,
    pub total_notes: usize,
    pub notes_with_tags: usize,
}
