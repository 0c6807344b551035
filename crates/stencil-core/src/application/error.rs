//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not naming
//! rules. Naming errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::SyntaxError;
use crate::error::ErrorCategory;

/// The input file could not be turned into a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file is missing or unreadable.
    #[error("cannot read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The file was read but its content does not parse.
    #[error("cannot parse {path}: {error}")]
    Parse { path: PathBuf, error: SyntaxError },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Loading the generic source file failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Rendering a generated tree back to text failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Load(LoadError::Read { path, .. }) => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the generic source file exists and is readable".into(),
            ],
            Self::Load(LoadError::Parse { error, .. }) => {
                let mut out = vec!["Fix the syntax error in the generic source file".into()];
                if let Some(location) = error.location {
                    out.push(format!("The parser stopped at {}", location));
                }
                out
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the output directory exists (it is never created)".into(),
            ],
            Self::StoreLockError => vec![
                "An adapter lock was poisoned by a panicking thread".into(),
                "Retry the operation".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Load(LoadError::Read { .. }) => ErrorCategory::NotFound,
            Self::Load(LoadError::Parse { .. }) => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
