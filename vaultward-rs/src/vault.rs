//! Vault representation and file operations.
//!
//! Every operation that touches the disk goes through [`Vault::resolve`] and
//! the vault's [`PathFilter`] first.

use crate::error::{ErrorKind, Result, VaultError};
use crate::filter::PathFilter;
use crate::parser::frontmatter::{ensure_valid, merge_for_write, parse_note};
use crate::parser::ParsedNote;
use crate::types::{DeleteResult, DirectoryListing, MoveResult, NoteWindow, WriteMode};
use serde_yaml::Mapping;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A caller path after containment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized vault-relative path with `/` separators; empty for the root.
    pub relative: String,
    /// Absolute path inside the vault root.
    pub absolute: PathBuf,
}

/// An Obsidian-style vault rooted at one directory.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    filter: PathFilter,
}

impl Vault {
    /// Open a vault. The root is canonicalized once and never changes.
    pub fn open(root: impl AsRef<Path>, filter: PathFilter) -> Result<Self> {
        let root = root.as_ref();

        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root.to_path_buf()));
        }

        let root = root.canonicalize()?;
        tracing::debug!(root = %root.display(), "opened vault");
        Ok(Self { root, filter })
    }

    /// Canonical root directory of the vault.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    /// Turn a caller-supplied path into a path guaranteed to stay inside the root.
    ///
    /// `.` and `..` are folded lexically; climbing above the root fails. The
    /// deepest existing ancestor is then canonicalized so a symlink cannot
    /// lead outside either.
    pub fn resolve(&self, path: &str) -> Result<ResolvedPath> {
        let normalized = path.trim().replace('\\', "/");

        let mut parts: Vec<&str> = Vec::new();
        for part in normalized.trim_start_matches('/').split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if parts.pop().is_none() {
                        return Err(VaultError::PathTraversal(path.trim().to_string()));
                    }
                }
                name => parts.push(name),
            }
        }

        let absolute = parts.iter().fold(self.root.clone(), |acc, p| acc.join(p));

        if let Some(existing) = absolute.ancestors().find(|p| p.exists()) {
            let real = existing.canonicalize()?;
            if !real.starts_with(&self.root) {
                return Err(VaultError::PathTraversal(path.trim().to_string()));
            }
        }

        Ok(ResolvedPath {
            relative: parts.join("/"),
            absolute,
        })
    }

    /// Resolve and apply the path filter.
    fn checked(&self, path: &str) -> Result<ResolvedPath> {
        let resolved = self.resolve(path)?;
        if !self.filter.is_allowed(&resolved.relative) {
            return Err(VaultError::AccessDenied(path.trim().to_string()));
        }
        Ok(resolved)
    }

    /// Like [`Vault::checked`], but the vault root itself is not a valid target.
    fn checked_file(&self, path: &str) -> Result<ResolvedPath> {
        let resolved = self.checked(path)?;
        if resolved.relative.is_empty() {
            return Err(VaultError::InvalidArgument("Path cannot be empty".to_string()));
        }
        Ok(resolved)
    }

    /// Check whether an allowed path exists.
    pub fn exists(&self, path: &str) -> bool {
        self.checked(path)
            .map(|resolved| resolved.absolute.exists())
            .unwrap_or(false)
    }

    /// Check whether an allowed path is a directory.
    pub fn is_directory(&self, path: &str) -> Result<bool> {
        let resolved = self.resolve(path)?;
        if !self.filter.is_allowed(&resolved.relative) {
            return Ok(false);
        }
        Ok(resolved.absolute.is_dir())
    }

    /// Read and decode a note.
    pub fn read_note(&self, path: &str) -> Result<ParsedNote> {
        let resolved = self.checked_file(path)?;
        self.read_resolved(&resolved)
    }

    fn read_resolved(&self, resolved: &ResolvedPath) -> Result<ParsedNote> {
        if resolved.absolute.is_dir() {
            return Err(VaultError::IsDirectory(resolved.relative.clone()));
        }

        let raw = fs::read_to_string(&resolved.absolute)
            .map_err(|e| VaultError::from_io(e, &resolved.relative))?;
        Ok(parse_note(&raw))
    }

    /// Read a window of body lines.
    ///
    /// An offset past the end yields empty content marked as truncated; a
    /// limit of 0 reads to the end.
    pub fn read_note_window(&self, path: &str, offset: usize, limit: usize) -> Result<NoteWindow> {
        let note = self.read_note(path)?;
        let lines: Vec<&str> = note.body.split('\n').collect();
        let total_lines = lines.len();

        if offset >= total_lines {
            return Ok(NoteWindow {
                path: path.trim().to_string(),
                frontmatter: note.frontmatter,
                content: String::new(),
                total_lines,
                offset,
                truncated: true,
            });
        }

        let limit = if limit == 0 { total_lines } else { limit };
        let end = offset.saturating_add(limit).min(total_lines);

        Ok(NoteWindow {
            path: path.trim().to_string(),
            content: lines[offset..end].join("\n"),
            frontmatter: note.frontmatter,
            total_lines,
            offset,
            truncated: end < total_lines,
        })
    }

    /// Write a note, creating parent directories as needed.
    pub fn write_note(
        &self,
        path: &str,
        body: &str,
        frontmatter: Option<&Mapping>,
        mode: WriteMode,
    ) -> Result<()> {
        let resolved = self.checked_file(path)?;

        if let Some(fm) = frontmatter {
            ensure_valid(fm)?;
        }

        let existing = match mode {
            WriteMode::Overwrite => None,
            WriteMode::Append | WriteMode::Prepend => match self.read_resolved(&resolved) {
                Ok(note) => Some(note),
                Err(VaultError::NoteNotFound(_)) => None,
                Err(e) => return Err(e),
            },
        };

        let text = merge_for_write(existing.as_ref(), body, frontmatter, mode)?;
        self.write_raw(&resolved, &text)?;

        tracing::info!(path = %resolved.relative, ?mode, "wrote note");
        Ok(())
    }

    pub(crate) fn write_raw(&self, resolved: &ResolvedPath, text: &str) -> Result<()> {
        if let Some(parent) = resolved.absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&resolved.absolute, text)
            .map_err(|e| VaultError::from_io(e, &resolved.relative))
    }

    /// Delete a note. `confirm_path` must repeat `path` exactly.
    pub fn delete_note(&self, path: &str, confirm_path: &str) -> DeleteResult {
        let failure = |kind: ErrorKind, message: String| DeleteResult {
            success: false,
            path: path.to_string(),
            message,
            kind: Some(kind),
        };

        if path != confirm_path {
            let err = VaultError::ConfirmationMismatch;
            return failure(err.kind(), err.to_string());
        }

        let resolved = match self.checked_file(path) {
            Ok(resolved) => resolved,
            Err(e) => return failure(e.kind(), e.to_string()),
        };

        if resolved.absolute.is_dir() {
            return failure(
                ErrorKind::IsDirectory,
                format!("Cannot delete: {} is not a file", path),
            );
        }

        if let Err(e) = fs::remove_file(&resolved.absolute) {
            let err = VaultError::from_io(e, path);
            return failure(err.kind(), err.to_string());
        }

        tracing::info!(path = %resolved.relative, "deleted note");
        DeleteResult {
            success: true,
            path: path.to_string(),
            message: format!(
                "Successfully deleted note: {}. This action cannot be undone.",
                path
            ),
            kind: None,
        }
    }

    /// Move or rename a note: copy to the target, then remove the source.
    pub fn move_note(&self, old_path: &str, new_path: &str, overwrite: bool) -> MoveResult {
        let failure = |err: VaultError| MoveResult {
            success: false,
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
            message: err.to_string(),
            kind: Some(err.kind()),
        };

        match self.try_move(old_path, new_path, overwrite) {
            Ok(()) => MoveResult {
                success: true,
                old_path: old_path.to_string(),
                new_path: new_path.to_string(),
                message: format!("Successfully moved note from {} to {}", old_path, new_path),
                kind: None,
            },
            Err(e) => failure(e),
        }
    }

    fn try_move(&self, old_path: &str, new_path: &str, overwrite: bool) -> Result<()> {
        let source = self.checked_file(old_path)?;
        let target = self.checked_file(new_path)?;

        if source.relative == target.relative {
            return Err(VaultError::InvalidArgument(
                "Source and target paths are the same".to_string(),
            ));
        }

        if source.absolute.is_dir() {
            return Err(VaultError::IsDirectory(source.relative));
        }

        let content = fs::read(&source.absolute).map_err(|e| VaultError::from_io(e, old_path))?;

        if !overwrite && target.absolute.exists() {
            return Err(VaultError::NoteAlreadyExists(new_path.to_string()));
        }

        if let Some(parent) = target.absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target.absolute, content).map_err(|e| VaultError::from_io(e, new_path))?;
        fs::remove_file(&source.absolute).map_err(|e| VaultError::from_io(e, old_path))?;

        tracing::info!(from = %source.relative, to = %target.relative, "moved note");
        Ok(())
    }

    /// List the allowed entries directly inside a directory.
    pub fn list_directory(&self, path: &str) -> Result<DirectoryListing> {
        let trimmed = path.trim();
        let trimmed = if trimmed == "." { "" } else { trimmed };
        let resolved = self.checked(trimmed)?;

        if !resolved.absolute.is_dir() {
            return Err(VaultError::DirectoryNotFound(trimmed.to_string()));
        }

        let entries = fs::read_dir(&resolved.absolute).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VaultError::DirectoryNotFound(trimmed.to_string()),
            _ => VaultError::from_io(e, trimmed),
        })?;

        let mut listing = DirectoryListing {
            path: resolved.relative.clone(),
            ..Default::default()
        };

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let entry_path = if resolved.relative.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", resolved.relative, name)
            };

            if !self.filter.is_allowed(&entry_path) {
                continue;
            }

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                listing.directories.push(name);
            } else if file_type.is_file() {
                listing.files.push(name);
            }
        }

        listing.files.sort();
        listing.directories.sort();
        Ok(listing)
    }

    /// Every allowed file in the vault, as sorted vault-relative paths.
    ///
    /// Dot-prefixed directories are not descended into and symlinks are not
    /// followed.
    pub fn list_notes(&self) -> Result<Vec<String>> {
        let mut notes: Vec<String> = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden_dir(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_path(entry.path()))
            .filter(|relative| self.filter.is_allowed(relative))
            .collect();

        notes.sort();
        Ok(notes)
    }

    /// Vault-relative form of an absolute path under the root.
    fn relative_path(&self, absolute: &Path) -> Option<String> {
        let relative = absolute.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    /// Read the raw text of a listed note, skipping it on failure.
    pub(crate) fn read_for_scan(&self, relative: &str) -> Option<ParsedNote> {
        let absolute = self.root.join(relative);
        match fs::read_to_string(&absolute) {
            Ok(raw) => Some(parse_note(&raw)),
            Err(e) => {
                tracing::debug!(path = relative, error = %e, "skipping unreadable file");
                None
            }
        }
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn setup_test_vault() -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        let vault = Vault::open(dir.path(), PathFilter::default()).unwrap();
        (dir, vault)
    }

    fn write(dir: &TempDir, path: &str, content: &str) {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_open_missing_vault() {
        let result = Vault::open("/definitely/not/a/vault", PathFilter::default());
        assert!(matches!(result, Err(VaultError::VaultNotFound(_))));
    }

    #[test]
    fn test_resolve_normalizes() {
        let (_dir, vault) = setup_test_vault();

        let resolved = vault.resolve("  /notes/./sub/../today.md ").unwrap();
        assert_eq!(resolved.relative, "notes/today.md");
        assert_eq!(resolved.absolute, vault.root().join("notes").join("today.md"));

        assert_eq!(vault.resolve("").unwrap().relative, "");
        assert_eq!(vault.resolve(".").unwrap().absolute, vault.root());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let (_dir, vault) = setup_test_vault();

        for path in ["../outside.md", "a/../../outside.md", "/../etc/passwd", "..\\x.md"] {
            let result = vault.resolve(path);
            assert!(
                matches!(result, Err(VaultError::PathTraversal(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_traversal_wins_over_filter() {
        let dir = TempDir::new().unwrap();
        let filter = PathFilter::new(&FilterConfig {
            ignored_patterns: vec!["**".to_string()],
            allowed_extensions: Vec::new(),
        });
        let vault = Vault::open(dir.path(), filter).unwrap();

        let err = vault.read_note("../outside.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathTraversal);

        let err = vault.read_note("inside.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink_escape() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.md"), "secret").unwrap();

        let (dir, vault) = setup_test_vault();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let result = vault.read_note("link/secret.md");
        assert!(matches!(result, Err(VaultError::PathTraversal(_))));

        let result = vault.write_note("link/new.md", "x", None, WriteMode::Overwrite);
        assert!(matches!(result, Err(VaultError::PathTraversal(_))));
    }

    #[test]
    fn test_read_note() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "note.md", "---\ntitle: Hi\n---\nBody");

        let note = vault.read_note("note.md").unwrap();
        assert_eq!(note.frontmatter["title"].as_str(), Some("Hi"));
        assert_eq!(note.body, "Body");
    }

    #[test]
    fn test_read_note_errors() {
        let (dir, vault) = setup_test_vault();
        fs::create_dir(dir.path().join("folder")).unwrap();

        assert!(matches!(vault.read_note("missing.md"), Err(VaultError::NoteNotFound(_))));
        assert!(matches!(vault.read_note("folder"), Err(VaultError::IsDirectory(_))));
        assert!(matches!(vault.read_note(".obsidian/app.json"), Err(VaultError::AccessDenied(_))));
        assert!(matches!(vault.read_note("image.png"), Err(VaultError::AccessDenied(_))));
    }

    #[test]
    fn test_read_note_window() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "lines.md", "---\na: 1\n---\nl1\nl2\nl3\nl4");

        let window = vault.read_note_window("lines.md", 1, 2).unwrap();
        assert_eq!(window.content, "l2\nl3");
        assert_eq!(window.total_lines, 4);
        assert!(window.truncated);

        let window = vault.read_note_window("lines.md", 2, 0).unwrap();
        assert_eq!(window.content, "l3\nl4");
        assert!(!window.truncated);

        let window = vault.read_note_window("lines.md", 10, 5).unwrap();
        assert_eq!(window.content, "");
        assert!(window.truncated);
        assert_eq!(window.frontmatter["a"].as_u64(), Some(1));
    }

    #[test]
    fn test_write_note_modes() {
        let (_dir, vault) = setup_test_vault();

        vault
            .write_note("deep/new.md", "Start.", Some(&mapping("title: T")), WriteMode::Overwrite)
            .unwrap();
        vault
            .write_note("deep/new.md", " End.", Some(&mapping("status: done")), WriteMode::Append)
            .unwrap();
        vault.write_note("deep/new.md", "Intro. ", None, WriteMode::Prepend).unwrap();

        let note = vault.read_note("deep/new.md").unwrap();
        assert_eq!(note.body, "Intro. Start. End.");
        assert_eq!(note.frontmatter["title"].as_str(), Some("T"));
        assert_eq!(note.frontmatter["status"].as_str(), Some("done"));
    }

    #[test]
    fn test_write_append_to_missing_file() {
        let (_dir, vault) = setup_test_vault();
        vault.write_note("fresh.md", "body", None, WriteMode::Append).unwrap();
        assert_eq!(vault.read_note("fresh.md").unwrap().body, "body");
    }

    #[test]
    fn test_write_rejects_invalid_frontmatter() {
        let (dir, vault) = setup_test_vault();
        let result =
            vault.write_note("bad.md", "x", Some(&mapping("cb: !fn x")), WriteMode::Overwrite);
        assert!(matches!(result, Err(VaultError::InvalidFrontmatter { .. })));
        assert!(!dir.path().join("bad.md").exists());
    }

    #[test]
    fn test_write_denied_paths() {
        let (_dir, vault) = setup_test_vault();
        let result = vault.write_note(".git/hooks/x.md", "x", None, WriteMode::Overwrite);
        assert!(matches!(result, Err(VaultError::AccessDenied(_))));
        let result = vault.write_note("", "x", None, WriteMode::Overwrite);
        assert!(matches!(result, Err(VaultError::InvalidArgument(_))));
    }

    #[test]
    fn test_delete_note() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "gone.md", "bye");

        let result = vault.delete_note("gone.md", "other.md");
        assert!(!result.success);
        assert_eq!(result.kind, Some(ErrorKind::ConfirmationMismatch));
        assert!(dir.path().join("gone.md").exists());

        let result = vault.delete_note("gone.md", "gone.md");
        assert!(result.success, "{}", result.message);
        assert!(result.message.contains("cannot be undone"));
        assert!(!dir.path().join("gone.md").exists());

        let result = vault.delete_note("gone.md", "gone.md");
        assert_eq!(result.kind, Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_delete_directory_refused() {
        let (dir, vault) = setup_test_vault();
        fs::create_dir(dir.path().join("folder")).unwrap();

        let result = vault.delete_note("folder", "folder");
        assert!(!result.success);
        assert_eq!(result.kind, Some(ErrorKind::IsDirectory));
        assert_eq!(result.message, "Cannot delete: folder is not a file");
    }

    #[test]
    fn test_move_note() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "old.md", "content");

        let result = vault.move_note("old.md", "archive/new.md", false);
        assert!(result.success, "{}", result.message);
        assert!(!dir.path().join("old.md").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("archive/new.md")).unwrap(),
            "content"
        );
    }

    #[test]
    fn test_move_note_target_exists() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "a.md", "A");
        write(&dir, "b.md", "B");

        let result = vault.move_note("a.md", "b.md", false);
        assert!(!result.success);
        assert_eq!(result.kind, Some(ErrorKind::AlreadyExists));
        assert_eq!(fs::read_to_string(dir.path().join("b.md")).unwrap(), "B");

        let result = vault.move_note("a.md", "b.md", true);
        assert!(result.success);
        assert_eq!(fs::read_to_string(dir.path().join("b.md")).unwrap(), "A");
        assert!(!dir.path().join("a.md").exists());
    }

    #[test]
    fn test_move_note_errors() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "a.md", "A");

        assert_eq!(vault.move_note("missing.md", "x.md", false).kind, Some(ErrorKind::NotFound));
        assert_eq!(vault.move_note("a.md", "a.png", false).kind, Some(ErrorKind::AccessDenied));
        assert_eq!(vault.move_note("a.md", "../a.md", false).kind, Some(ErrorKind::PathTraversal));
        assert_eq!(vault.move_note("a.md", "./a.md", true).kind, Some(ErrorKind::InvalidArgument));
        assert!(dir.path().join("a.md").exists());
    }

    #[test]
    fn test_list_directory() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "b.md", "");
        write(&dir, "a.txt", "");
        write(&dir, "image.png", "");
        write(&dir, "sub/c.md", "");
        write(&dir, ".obsidian/app.json", "");
        fs::create_dir(dir.path().join("empty")).unwrap();

        let listing = vault.list_directory(".").unwrap();
        assert_eq!(listing.files, vec!["a.txt", "b.md"]);
        assert_eq!(listing.directories, vec![".obsidian", "empty", "sub"]);

        let listing = vault.list_directory("sub").unwrap();
        assert_eq!(listing.files, vec!["c.md"]);

        let listing = vault.list_directory(".obsidian").unwrap();
        assert!(listing.files.is_empty());

        assert!(matches!(
            vault.list_directory("nope"),
            Err(VaultError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_list_notes() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "b.md", "");
        write(&dir, "a.md", "");
        write(&dir, "a/z.md", "");
        write(&dir, "notes.txt", "");
        write(&dir, "photo.jpg", "");
        write(&dir, ".hidden/secret.md", "");
        write(&dir, ".trash/old.md", "");

        let notes = vault.list_notes().unwrap();
        assert_eq!(notes, vec!["a.md", "a/z.md", "b.md", "notes.txt"]);
    }

    #[test]
    fn test_exists_and_is_directory() {
        let (dir, vault) = setup_test_vault();
        write(&dir, "sub/note.md", "");

        assert!(vault.exists("sub/note.md"));
        assert!(!vault.exists("sub/missing.md"));
        assert!(!vault.exists("../sub/note.md"));
        assert!(vault.is_directory("sub").unwrap());
        assert!(!vault.is_directory("sub/note.md").unwrap());
        assert!(vault.is_directory("../x").is_err());
    }
}
