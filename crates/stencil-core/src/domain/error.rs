// ============================================================================
// domain/error.rs - NAMING AND DOCUMENT ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected into reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid output name '{name}': {reason}")]
    InvalidOutputName { name: String, reason: String },

    #[error("input path '{path}' has no file name")]
    MissingFileName { path: String },

    #[error("input file name '{path}' is not valid UTF-8")]
    NonUtf8FileName { path: String },

    // ========================================================================
    // Conflict Errors
    // ========================================================================
    #[error("outputs '{first}' and '{second}' both map to '{filename}'")]
    OutputCollision {
        filename: String,
        first: String,
        second: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidOutputName { name, .. } => vec![
                format!("The transform produced an unusable output name: {:?}", name),
                "Output names must be non-empty and contain no path separators".into(),
            ],
            Self::MissingFileName { path } => vec![
                format!("'{}' does not name a file", path),
                "Pass the path of the generic source file itself".into(),
            ],
            Self::NonUtf8FileName { .. } => {
                vec!["Rename the input file using UTF-8 characters".into()]
            }
            Self::OutputCollision { first, second, .. } => vec![
                format!(
                    "'{}' and '{}' differ only by case or are identical",
                    first, second
                ),
                "Use --on-collision last-wins to let the later output overwrite".into(),
                "Or give each output a distinct name".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOutputName { .. }
            | Self::MissingFileName { .. }
            | Self::NonUtf8FileName { .. } => ErrorCategory::Validation,
            Self::OutputCollision { .. } => ErrorCategory::Conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
