//! Exact-text patching and combined text/frontmatter edits.

use crate::error::{Result, VaultError};
use crate::parser::frontmatter::update_frontmatter;
use crate::types::{EditOutcome, EditRequest, PatchResult};
use crate::vault::Vault;

// Characters of the searched text echoed back in a not-found message
const PREVIEW_CHARS: usize = 50;

/// How a replacement applies to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub found: usize,
    pub replaced: usize,
}

/// Replace `old` in `content`, enforcing the single-match rule.
///
/// Without `replace_all`, exactly one occurrence must exist.
pub fn replace_exact(content: &str, old: &str, new: &str, replace_all: bool) -> Result<Replacement> {
    check_replace_args(old, new)?;

    let found = content.matches(old).count();

    if found == 0 {
        return Err(VaultError::TextNotFound {
            preview: preview(old),
        });
    }
    if found > 1 && !replace_all {
        return Err(VaultError::AmbiguousMatch { count: found });
    }

    let (text, replaced) = if replace_all {
        (content.replace(old, new), found)
    } else {
        (content.replacen(old, new, 1), 1)
    };

    Ok(Replacement {
        text,
        found,
        replaced,
    })
}

/// Reject replacements that could never be meaningful, before any IO.
fn check_replace_args(old: &str, new: &str) -> Result<()> {
    if old.trim().is_empty() {
        return Err(VaultError::InvalidArgument(
            "Old text cannot be empty".to_string(),
        ));
    }
    if old == new {
        return Err(VaultError::InvalidArgument(
            "Old text and new text must be different".to_string(),
        ));
    }
    Ok(())
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

impl Vault {
    /// Replace text in a note's raw content (frontmatter included).
    ///
    /// Business failures come back as `success: false` with an error kind;
    /// the note is only written on success.
    pub fn patch_note(&self, path: &str, old_text: &str, new_text: &str, replace_all: bool) -> PatchResult {
        let path = path.trim();

        if let Err(e) = check_replace_args(old_text, new_text) {
            return PatchResult::failure(path, e.kind(), e.to_string());
        }

        let note = match self.read_note(path) {
            Ok(note) => note,
            Err(e) => return PatchResult::failure(path, e.kind(), e.to_string()),
        };

        let replacement = match replace_exact(&note.raw, old_text, new_text, replace_all) {
            Ok(replacement) => replacement,
            Err(e) => {
                let match_count = match &e {
                    VaultError::AmbiguousMatch { count } => *count,
                    _ => 0,
                };
                return PatchResult {
                    match_count,
                    ..PatchResult::failure(path, e.kind(), e.to_string())
                };
            }
        };

        let written = self
            .resolve(path)
            .and_then(|resolved| self.write_raw(&resolved, &replacement.text));
        if let Err(e) = written {
            return PatchResult::failure(path, e.kind(), e.to_string());
        }

        tracing::info!(path, replaced = replacement.replaced, "patched note");

        let plural = if replacement.replaced == 1 { "" } else { "s" };
        PatchResult {
            success: true,
            path: path.to_string(),
            message: format!(
                "Successfully replaced {} occurrence{}",
                replacement.replaced, plural
            ),
            match_count: replacement.found,
            replaced: replacement.replaced,
            kind: None,
        }
    }

    /// Apply an optional text replacement, then merge frontmatter keys.
    pub fn edit_note(&self, path: &str, request: &EditRequest) -> Result<EditOutcome> {
        let path = path.trim();
        let resolved = self.resolve(path)?;
        let mut raw = self.read_note(path)?.raw;
        let mut replacements = 0;

        if let Some(old_text) = request.old_text.as_deref().filter(|t| !t.is_empty()) {
            let replacement =
                replace_exact(&raw, old_text, &request.new_text, request.replace_all)?;
            replacements = replacement.replaced;
            raw = replacement.text;
        }

        let frontmatter_updated = match request.frontmatter {
            Some(ref updates) => {
                raw = update_frontmatter(&raw, updates)?;
                true
            }
            None => false,
        };

        if replacements > 0 || frontmatter_updated {
            self.write_raw(&resolved, &raw)?;
            tracing::info!(path, replacements, frontmatter_updated, "edited note");
        }

        Ok(EditOutcome {
            path: path.to_string(),
            replacements,
            frontmatter_updated,
        })
    }
}
