//! Error types and exit codes for Vaultward.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes returned by the `vaultward` binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const NOTE_ALREADY_EXISTS: i32 = 3;
    pub const AMBIGUOUS_MATCH: i32 = 4;
    pub const INVALID_FRONTMATTER: i32 = 5;
    pub const ACCESS_DENIED: i32 = 6;
    pub const INVALID_ARGUMENT: i32 = 7;
}

/// Main error type for Vaultward operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Path traversal not allowed: {0}")]
    PathTraversal(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("File not found: {0}")]
    NoteNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Cannot read directory as file: {0}. Use the directory listing instead")]
    IsDirectory(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Target file already exists: {0}. Use overwrite to replace it")]
    NoteAlreadyExists(String),

    #[error("String not found in note: \"{preview}\"")]
    TextNotFound { preview: String },

    #[error(
        "Found {count} occurrences of the string. Use replace-all to replace all occurrences, \
         or provide a more specific string to match exactly one occurrence"
    )]
    AmbiguousMatch { count: usize },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid frontmatter: {}", .errors.join(", "))]
    InvalidFrontmatter { errors: Vec<String> },

    #[error("Deletion cancelled: confirmation path does not match. Both paths must be identical")]
    ConfirmationMismatch,

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("No content provided")]
    NoContentProvided,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Coarse classification of a failure, shared by `Err` values and the
/// `success: false` result structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    PathTraversal,
    AccessDenied,
    NotFound,
    IsDirectory,
    PermissionDenied,
    AlreadyExists,
    AmbiguousMatch,
    InvalidArgument,
    InvalidPattern,
    InvalidFrontmatter,
    ConfirmationMismatch,
    Io,
}

impl VaultError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::PathTraversal(_) => ErrorKind::PathTraversal,
            VaultError::AccessDenied(_) => ErrorKind::AccessDenied,
            VaultError::NoteNotFound(_)
            | VaultError::DirectoryNotFound(_)
            | VaultError::TextNotFound { .. }
            | VaultError::VaultNotFound(_) => ErrorKind::NotFound,
            VaultError::IsDirectory(_) => ErrorKind::IsDirectory,
            VaultError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            VaultError::NoteAlreadyExists(_) => ErrorKind::AlreadyExists,
            VaultError::AmbiguousMatch { .. } => ErrorKind::AmbiguousMatch,
            VaultError::InvalidArgument(_) | VaultError::NoContentProvided => {
                ErrorKind::InvalidArgument
            }
            VaultError::InvalidPattern(_) => ErrorKind::InvalidPattern,
            VaultError::InvalidFrontmatter { .. } | VaultError::Yaml(_) => {
                ErrorKind::InvalidFrontmatter
            }
            VaultError::ConfirmationMismatch => ErrorKind::ConfirmationMismatch,
            VaultError::ConfigError(_)
            | VaultError::Io(_)
            | VaultError::JsonError(_)
            | VaultError::TomlParse(_)
            | VaultError::TomlSerialize(_) => ErrorKind::Io,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    /// Map an I/O error on `path` to the vault taxonomy.
    pub(crate) fn from_io(err: std::io::Error, path: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => VaultError::NoteNotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => VaultError::PermissionDenied(path.to_string()),
            _ => VaultError::Io(err),
        }
    }
}

impl ErrorKind {
    /// Exit code the CLI uses for this kind of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::NotFound => exit_code::NOTE_NOT_FOUND,
            ErrorKind::AlreadyExists => exit_code::NOTE_ALREADY_EXISTS,
            ErrorKind::AmbiguousMatch => exit_code::AMBIGUOUS_MATCH,
            ErrorKind::InvalidFrontmatter => exit_code::INVALID_FRONTMATTER,
            ErrorKind::AccessDenied | ErrorKind::PathTraversal => exit_code::ACCESS_DENIED,
            ErrorKind::InvalidArgument
            | ErrorKind::InvalidPattern
            | ErrorKind::ConfirmationMismatch => exit_code::INVALID_ARGUMENT,
            ErrorKind::IsDirectory | ErrorKind::PermissionDenied | ErrorKind::Io => {
                exit_code::GENERAL_ERROR
            }
        }
    }
}

/// Result type alias for Vaultward operations.
pub type Result<T> = std::result::Result<T, VaultError>;
