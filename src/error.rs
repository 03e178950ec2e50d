//! Error taxonomy shared by the extraction, guide, and notes engines.
//!
//! Absence is split in two: [`GuideError::NotFound`] / [`GuideError::SectionNotFound`]
//! are recoverable "does not exist yet" conditions, while [`GuideError::Io`] always
//! carries the path of a real filesystem failure. Read paths that probe optional
//! files use [`Lookup`] instead of an error.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuideError>;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("{what} does not exist yet: {}", path.display())]
    NotFound { what: String, path: PathBuf },

    #[error("section '{identifier}' not found in document '{document}'")]
    SectionNotFound { identifier: String, document: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed file {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuideError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn not_found(what: impl Into<String>, path: &Path) -> Self {
        Self::NotFound {
            what: what.into(),
            path: path.to_path_buf(),
        }
    }

    /// `true` for the recoverable absence variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::SectionNotFound { .. })
    }

    /// Filesystem path involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. } | Self::Io { path, .. } | Self::Corrupt { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Result of probing for an optional file or record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Missing { path: PathBuf },
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_io() {
        let missing = GuideError::not_found("project guide", Path::new("/p/.vscode/PROJECT_GUIDE.md"));
        assert!(missing.is_not_found());
        assert!(missing.to_string().contains("does not exist yet"));

        let io = GuideError::io(
            "write",
            Path::new("/p/x.md"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!io.is_not_found());
        assert_eq!(io.path(), Some(Path::new("/p/x.md")));
        assert!(io.to_string().contains("/p/x.md"));
    }

    #[test]
    fn lookup_found_unwraps() {
        let found: Lookup<u8> = Lookup::Found(3);
        assert!(found.is_found());
        assert_eq!(found.found(), Some(3));

        let missing: Lookup<u8> = Lookup::Missing { path: PathBuf::from("/nope") };
        assert_eq!(missing.found(), None);
    }
}
