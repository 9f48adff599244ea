//! YAML frontmatter parsing, serialization, validation and merging.

use crate::error::{Result, VaultError};
use crate::types::WriteMode;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub content: &'a str,
}

/// A note decoded into frontmatter and body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedNote {
    /// Decoded frontmatter; empty when the note has none.
    pub frontmatter: Mapping,
    /// Everything after the closing delimiter (or the whole text).
    pub body: String,
    /// The text exactly as read.
    #[serde(skip)]
    pub raw: String,
}

impl ParsedNote {
    fn without_frontmatter(raw: &str) -> Self {
        Self {
            frontmatter: Mapping::new(),
            body: raw.to_string(),
            raw: raw.to_string(),
        }
    }

    /// Whether a frontmatter block was decoded.
    pub fn has_frontmatter(&self) -> bool {
        !self.frontmatter.is_empty()
    }
}

/// Outcome of [`validate_frontmatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontmatterValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Split content into frontmatter and body.
///
/// The opening `---` must be the very first line and the closing `---` must
/// sit on its own line directly after a newline.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        content,
    };

    // Skip the newline after the opening ---
    let yaml_start = if content.starts_with("---\n") {
        4
    } else if content.starts_with("---\r\n") {
        5
    } else {
        return no_frontmatter;
    };

    let remaining = &content[yaml_start..];

    // Earliest "\n---" that ends its line: \n---\n, \n---\r\n or --- at EOF
    let closing = [
        remaining.find("\n---\n"),
        remaining.find("\n---\r\n"),
        remaining
            .ends_with("\n---")
            .then(|| remaining.len() - 4),
    ]
    .into_iter()
    .flatten()
    .min();

    let Some(pos) = closing else {
        return no_frontmatter;
    };

    let yaml_end = yaml_start + pos;
    let yaml = content[yaml_start..yaml_end].trim_end_matches('\r');

    // Skip "\n---" and the line break after it
    let rest = &content[yaml_end + 4..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    FrontmatterSplit {
        yaml: Some(yaml),
        content: body,
    }
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Decode a note. Never fails: anything that is not a well-formed YAML
/// mapping block is treated as plain body text.
pub fn parse_note(raw: &str) -> ParsedNote {
    let split = split_frontmatter(raw);
    let Some(yaml) = split.yaml else {
        return ParsedNote::without_frontmatter(raw);
    };

    let frontmatter = match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => map,
        Ok(Value::Null) => Mapping::new(),
        _ => return ParsedNote::without_frontmatter(raw),
    };

    ParsedNote {
        frontmatter,
        body: split.content.to_string(),
        raw: raw.to_string(),
    }
}

/// Serialize frontmatter and body back into note text.
///
/// An empty mapping returns the body untouched, without delimiters.
pub fn stringify_note(frontmatter: &Mapping, body: &str) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(body.to_string());
    }

    let mut yaml = serde_yaml::to_string(frontmatter)?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(format!("---\n{}---\n{}", yaml, body))
}

/// Check that frontmatter only holds plain data.
///
/// Every offending location is reported before anything is encoded.
pub fn validate_frontmatter(frontmatter: &Mapping) -> FrontmatterValidation {
    let mut result = FrontmatterValidation {
        valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    check_mapping(frontmatter, "", &mut result);

    if result.valid {
        if let Err(e) = serde_yaml::to_string(frontmatter) {
            result.valid = false;
            result.errors.push(format!("Invalid YAML structure: {}", e));
        }
    }

    result
}

fn check_mapping(map: &Mapping, path: &str, result: &mut FrontmatterValidation) {
    for (key, value) in map {
        let label = key_label(key);
        let current = if path.is_empty() {
            label
        } else {
            format!("{}.{}", path, label)
        };

        if !key.is_string() {
            result.valid = false;
            result
                .errors
                .push(format!("Non-string keys are not allowed at path: {}", current));
        }

        check_value(value, &current, result);
    }
}

fn check_value(value: &Value, path: &str, result: &mut FrontmatterValidation) {
    match value {
        // A tag attaches behaviour (`!fn`, `!!js/function`) instead of data.
        Value::Tagged(tagged) => {
            result.valid = false;
            result.errors.push(format!(
                "Functions are not allowed in frontmatter at path: {} (tag {})",
                path, tagged.tag
            ));
        }
        Value::Sequence(seq) => {
            for (i, item) in seq.iter().enumerate() {
                check_value(item, &format!("{}[{}]", path, i), result);
            }
        }
        Value::Mapping(map) => check_mapping(map, path, result),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// Validate, turning failures into [`VaultError::InvalidFrontmatter`].
pub fn ensure_valid(frontmatter: &Mapping) -> Result<()> {
    let validation = validate_frontmatter(frontmatter);
    if validation.valid {
        Ok(())
    } else {
        Err(VaultError::InvalidFrontmatter {
            errors: validation.errors,
        })
    }
}

/// Shallow merge: every top-level key of `updates` replaces the existing one.
pub fn merge_frontmatter(existing: &Mapping, updates: &Mapping) -> Mapping {
    let mut merged = existing.clone();
    for (key, value) in updates {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Compute the text a write should persist.
///
/// `existing` is the current note, or `None` when the file does not exist,
/// in which case every mode behaves like [`WriteMode::Overwrite`].
pub fn merge_for_write(
    existing: Option<&ParsedNote>,
    body: &str,
    frontmatter: Option<&Mapping>,
    mode: WriteMode,
) -> Result<String> {
    let existing = match (mode, existing) {
        (WriteMode::Overwrite, _) | (_, None) => {
            return match frontmatter {
                Some(fm) => stringify_note(fm, body),
                None => Ok(body.to_string()),
            };
        }
        (_, Some(existing)) => existing,
    };

    let merged = match frontmatter {
        Some(updates) => merge_frontmatter(&existing.frontmatter, updates),
        None => existing.frontmatter.clone(),
    };

    let new_body = match mode {
        WriteMode::Append => format!("{}{}", existing.body, body),
        WriteMode::Prepend => format!("{}{}", body, existing.body),
        WriteMode::Overwrite => body.to_string(),
    };

    stringify_note(&merged, &new_body)
}

/// Merge `updates` into the frontmatter of `content` and re-serialize.
pub fn update_frontmatter(content: &str, updates: &Mapping) -> Result<String> {
    let parsed = parse_note(content);
    let merged = merge_frontmatter(&parsed.frontmatter, updates);
    ensure_valid(&merged)?;
    stringify_note(&merged, &parsed.body)
}
