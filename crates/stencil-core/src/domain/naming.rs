//! Output file naming.
//!
//! Every generated file is named `lowercase(name + "_" + base_name(input))`.
//! Lowercasing keeps names stable on case-insensitive filesystems, at the
//! price that names differing only by case map to the same file.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Separator placed between the output name and the input file name.
pub const NAME_SEPARATOR: char = '_';

/// Derive the final output filename for one generated document.
///
/// Pure function of its arguments.
///
/// ```
/// use std::path::Path;
/// use stencil_core::domain::derive_filename;
///
/// let name = derive_filename("Impl", Path::new("gen/SliceUtil.rs")).unwrap();
/// assert_eq!(name, "impl_sliceutil.rs");
/// ```
pub fn derive_filename(name: &str, input_path: &Path) -> Result<String, DomainError> {
    validate_output_name(name)?;
    let base = base_name(input_path)?;
    Ok(format!("{name}{NAME_SEPARATOR}{base}").to_lowercase())
}

/// The final path component of `input_path`.
pub fn base_name(input_path: &Path) -> Result<&str, DomainError> {
    let file_name = input_path
        .file_name()
        .ok_or_else(|| DomainError::MissingFileName {
            path: input_path.display().to_string(),
        })?;

    file_name.to_str().ok_or_else(|| DomainError::NonUtf8FileName {
        path: input_path.display().to_string(),
    })
}

/// Reject names that could not be used as part of a single path component.
pub fn validate_output_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name == "." || name == ".." {
        Some("name is a relative directory reference")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidOutputName {
            name: name.to_string(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Collision handling
// ============================================================================

/// What to do when two outputs of one result derive the same filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Write every output in order; the later one overwrites the earlier.
    #[default]
    #[serde(rename = "last-wins", alias = "last-write-wins")]
    LastWriteWins,
    /// Keep the first output; later duplicates are skipped.
    #[serde(rename = "first-wins", alias = "first-write-wins")]
    FirstWriteWins,
    /// Treat any collision as a naming error and write nothing.
    Reject,
}

impl CollisionPolicy {
    pub const ALL: [CollisionPolicy; 3] = [
        CollisionPolicy::LastWriteWins,
        CollisionPolicy::FirstWriteWins,
        CollisionPolicy::Reject,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastWriteWins => "last-wins",
            Self::FirstWriteWins => "first-wins",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last-write-wins" | "last" => Ok(Self::LastWriteWins),
            "first-wins" | "first-write-wins" | "first" => Ok(Self::FirstWriteWins),
            "reject" | "error" => Ok(Self::Reject),
            other => Err(format!(
                "unknown collision policy '{other}' (expected last-wins, first-wins or reject)"
            )),
        }
    }
}

/// Naming decision for one output, in transform order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub name: String,
    pub filename: String,
    /// Set when the output must not be written.
    pub skip_reason: Option<String>,
    /// Name of the earlier output this one overwrites, if any.
    pub overwrites: Option<String>,
}

/// Derive filenames for a whole result and apply the collision policy.
///
/// All problems are collected; on error nothing should be written.
pub fn plan_filenames<'a>(
    names: impl IntoIterator<Item = &'a str>,
    input_path: &Path,
    policy: CollisionPolicy,
) -> Result<Vec<PlannedOutput>, Vec<DomainError>> {
    let mut planned = Vec::new();
    let mut errors = Vec::new();
    // filename -> name of the output that currently owns it
    let mut owners: HashMap<String, String> = HashMap::new();

    for name in names {
        let filename = match derive_filename(name, input_path) {
            Ok(filename) => filename,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        let mut entry = PlannedOutput {
            name: name.to_string(),
            filename: filename.clone(),
            skip_reason: None,
            overwrites: None,
        };

        if let Some(previous) = owners.get(&filename) {
            match policy {
                CollisionPolicy::LastWriteWins => {
                    entry.overwrites = Some(previous.clone());
                    owners.insert(filename, name.to_string());
                }
                CollisionPolicy::FirstWriteWins => {
                    entry.skip_reason = Some(format!(
                        "'{filename}' was already produced by output '{previous}'"
                    ));
                }
                CollisionPolicy::Reject => errors.push(DomainError::OutputCollision {
                    filename,
                    first: previous.clone(),
                    second: name.to_string(),
                }),
            }
        } else {
            owners.insert(filename, name.to_string());
        }

        planned.push(entry);
    }

    if errors.is_empty() {
        Ok(planned)
    } else {
        Err(errors)
    }
}
