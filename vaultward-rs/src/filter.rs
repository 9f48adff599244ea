//! Path filtering: ignore globs plus an extension allow-list.
//!
//! Every path that reaches the disk goes through [`PathFilter::is_allowed`]
//! after it has been resolved inside the vault.

use crate::config::FilterConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Ignore patterns that always apply.
pub const DEFAULT_IGNORED_PATTERNS: &[&str] = &[
    ".obsidian/**",
    ".git/**",
    "node_modules/**",
    ".DS_Store",
    "Thumbs.db",
];

/// Extensions that are always allowed.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

// 1-10 ASCII alphanumerics after the last dot of the final segment
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{1,10}$").unwrap());

/// A compiled ignore pattern.
#[derive(Debug, Clone)]
struct IgnorePattern {
    source: String,
    regex: Regex,
}

/// Filters vault paths by ignore globs and allowed extensions.
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignored: Vec<IgnorePattern>,
    allowed_extensions: Vec<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

impl PathFilter {
    /// Build a filter from the built-in defaults plus `config`.
    pub fn new(config: &FilterConfig) -> Self {
        let ignored = DEFAULT_IGNORED_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .chain(config.ignored_patterns.iter().cloned())
            .filter_map(|source| {
                let regex = glob_to_regex(&source)?;
                Some(IgnorePattern { source, regex })
            })
            .collect();

        let allowed_extensions = DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .chain(config.allowed_extensions.iter().cloned())
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            ignored,
            allowed_extensions,
        }
    }

    /// The ignore patterns in evaluation order.
    pub fn ignored_patterns(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(|p| p.source.as_str())
    }

    /// The allowed extensions (lowercase, without the dot).
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Check whether a vault-relative path may be accessed.
    pub fn is_allowed(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");

        if self.ignored.iter().any(|p| p.regex.is_match(&normalized)) {
            return false;
        }

        match file_extension(&normalized) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => true,
        }
    }

    /// Keep only the allowed paths.
    pub fn filter_paths<'a, I>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths
            .into_iter()
            .filter(|p| self.is_allowed(p))
            .map(str::to_string)
            .collect()
    }
}

/// Translate a glob into an anchored regex.
///
/// `**` matches across separators, `*` stays inside one segment and `?`
/// matches a single non-separator character.
fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let normalized = pattern.replace('\\', "/");
    let mut out = String::with_capacity(normalized.len() + 8);
    out.push('^');

    let mut chars = normalized.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push('$');
    match Regex::new(&out) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "ignoring unusable filter pattern");
            None
        }
    }
}

/// The recognizable extension of the last path segment, if any.
///
/// Dotfiles such as `.gitignore` and paths ending in `/` have none.
fn file_extension(path: &str) -> Option<&str> {
    if path.ends_with('/') {
        return None;
    }

    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rfind('.') {
        None | Some(0) => None,
        Some(dot) => {
            let ext = &segment[dot + 1..];
            EXTENSION.is_match(ext).then_some(ext)
        }
    }
}
