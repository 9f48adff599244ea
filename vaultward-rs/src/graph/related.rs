//! Notes related through shared tags and wikilinks.

use crate::error::Result;
use crate::note::{NoteRefs, note_name};
use crate::parser::tag::shared_tags;
use crate::parser::wikilink::links_to;
use crate::scan::parallel_map;
use crate::types::{RelatedNote, RelatedNotes, RelationKind};
use crate::vault::Vault;

/// Which relations to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationQuery {
    pub tags: bool,
    pub links: bool,
}

impl RelationQuery {
    /// Neither flag set means both.
    pub fn new(tags: bool, links: bool) -> Self {
        if tags || links {
            Self { tags, links }
        } else {
            Self {
                tags: true,
                links: true,
            }
        }
    }
}

/// Relations between the source note and one candidate.
///
/// Relations come out in a fixed order: shared tags, backlink, outgoing.
pub fn relate(
    source_name: &str,
    source: &NoteRefs,
    candidate_path: &str,
    candidate: &NoteRefs,
    query: RelationQuery,
) -> Option<RelatedNote> {
    let mut relations = Vec::new();
    let mut tags = Vec::new();

    if query.tags && !source.tags.is_empty() {
        tags = shared_tags(&source.tags, &candidate.tags);
        if !tags.is_empty() {
            relations.push(RelationKind::SharedTags);
        }
    }

    if query.links {
        if links_to(&candidate.links, source_name) {
            relations.push(RelationKind::Backlink);
        }
        if links_to(&source.links, note_name(candidate_path)) {
            relations.push(RelationKind::Outgoing);
        }
    }

    (!relations.is_empty()).then(|| RelatedNote {
        path: candidate_path.to_string(),
        relations,
        tags,
    })
}

impl Vault {
    /// Find notes sharing tags with `path`, linking to it, or linked from it.
    pub fn related(&self, path: &str, tags: bool, links: bool) -> Result<RelatedNotes> {
        let query = RelationQuery::new(tags, links);
        let source_path = self.resolve(path)?.relative;
        let source = NoteRefs::of(&self.read_note(path)?);
        let source_name = note_name(&source_path);

        let candidates: Vec<String> = self
            .list_notes()?
            .into_iter()
            .filter(|candidate| *candidate != source_path)
            .collect();
        tracing::debug!(path = %source_path, candidates = candidates.len(), "finding related notes");

        let related = parallel_map(&candidates, |candidate| {
            let note = self.read_for_scan(candidate)?;
            relate(source_name, &source, candidate, &NoteRefs::of(&note), query)
        });

        // Candidates are already in path order
        Ok(RelatedNotes {
            path: source_path,
            related,
        })
    }
}
