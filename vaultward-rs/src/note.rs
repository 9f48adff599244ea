//! Note identity and the references a note carries.

use crate::parser::{ParsedNote, extract_tags, parse_links};

/// Get the note name: the last path segment without a `.md` suffix.
///
/// This is the name wikilinks refer to.
pub fn note_name(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".md").unwrap_or(file)
}

/// Tags and outgoing link targets of one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRefs {
    /// Lowercased, deduplicated, sorted tags (frontmatter and inline).
    pub tags: Vec<String>,
    /// Lowercased, deduplicated link targets from the body.
    pub links: Vec<String>,
}

impl NoteRefs {
    pub fn of(note: &ParsedNote) -> Self {
        Self {
            tags: extract_tags(&note.frontmatter, &note.body),
            links: parse_links(&note.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_note;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_note_name() {
        assert_eq!(note_name("folder/My Note.md"), "My Note");
        assert_eq!(note_name("top.md"), "top");
        assert_eq!(note_name("todo.txt"), "todo.txt");
    }

    #[test]
    fn test_refs_from_frontmatter_and_body() {
        let note = parse_note("---\ntags: [Project]\n---\nSee [[Other Note|other]] #idea");
        let refs = NoteRefs::of(&note);
        assert_eq!(refs.tags, vec!["idea", "project"]);
        assert_eq!(refs.links, vec!["other note"]);
    }

    #[test]
    fn test_links_in_frontmatter_ignored() {
        let note = parse_note("---\nsource: \"[[Hidden]]\"\n---\nbody");
        assert!(NoteRefs::of(&note).links.is_empty());
    }
}
