//! `obsidian://` URIs for notes.

use std::path::Path;

/// Build an `obsidian:///` URI from the vault root and a vault-relative path.
///
/// Each path segment is percent-encoded and a trailing `.md` is dropped.
pub fn obsidian_uri(vault_root: &Path, note_path: &str) -> String {
    let root = vault_root.to_string_lossy().replace('\\', "/");
    let note = note_path.trim_start_matches('/');

    let absolute = format!("{}/{}", root.trim_end_matches('/'), note);
    let absolute = absolute.strip_suffix(".md").unwrap_or(&absolute);

    let encoded: Vec<String> = absolute
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();

    format!("obsidian:///{}", encoded.join("/"))
}
