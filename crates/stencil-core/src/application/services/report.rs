//! Generation report - the orchestrator's return value.
//!
//! Instead of printing, the orchestrator records its state transitions, a
//! status for every output and every error it met. Callers decide how to
//! present them; [`GenerationReport::error_lines`] yields the canonical
//! `Error: <message>` console form.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::{
    application::LoadError,
    domain::{Diagnostic, DomainError},
    error::StencilError,
};

/// Orchestrator state machine.
///
/// `Idle → Loaded → Transformed{ok|failed} → Persisted | Aborted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Loaded,
    Transformed { succeeded: bool },
    Persisted,
    Aborted,
}

impl GenerationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Persisted | Self::Aborted)
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loaded => f.write_str("loaded"),
            Self::Transformed { succeeded: true } => f.write_str("transformed"),
            Self::Transformed { succeeded: false } => f.write_str("transform-failed"),
            Self::Persisted => f.write_str("persisted"),
            Self::Aborted => f.write_str("aborted"),
        }
    }
}

/// One error met during a generation run.
#[derive(Debug, Error, Clone)]
pub enum GenerationError {
    /// The input could not be read or parsed. Nothing else ran.
    #[error("{0}")]
    Load(LoadError),

    /// A diagnostic reported by the transform.
    #[error("{0}")]
    Transform(Diagnostic),

    /// An output name could not be turned into a filename.
    #[error("{0}")]
    Naming(DomainError),

    /// Rendering or writing one output failed.
    #[error("{name}: {source}")]
    Persistence {
        name: String,
        path: PathBuf,
        #[source]
        source: StencilError,
    },
}

impl GenerationError {
    /// Stable kind label, used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Transform(_) => "transform",
            Self::Naming(_) => "naming",
            Self::Persistence { .. } => "persistence",
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Load(e) => crate::application::ApplicationError::Load(e.clone()).suggestions(),
            Self::Transform(d) => d.hint.iter().cloned().collect(),
            Self::Naming(e) => e.suggestions(),
            Self::Persistence { source, .. } => source.suggestions(),
        }
    }
}

impl Serialize for GenerationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GenerationError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// What happened to one output of a successful transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputStatus {
    /// Rendered and written.
    Written { bytes: usize },
    /// Dry run: would have been written.
    Planned,
    /// Not written because of the collision policy.
    Skipped { reason: String },
    /// Rendering or writing failed; see the report errors.
    Failed { message: String },
}

/// Per-output entry of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputReport {
    pub name: String,
    pub filename: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrites: Option<String>,
    #[serde(flatten)]
    pub status: OutputStatus,
}

/// Full account of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    input: PathBuf,
    output_dir: PathBuf,
    transform: String,
    dry_run: bool,
    state: GenerationState,
    trail: Vec<GenerationState>,
    outputs: Vec<OutputReport>,
    errors: Vec<GenerationError>,
}

impl GenerationReport {
    pub(crate) fn new(
        input: &Path,
        output_dir: &Path,
        transform: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            transform: transform.into(),
            dry_run,
            state: GenerationState::Idle,
            trail: vec![GenerationState::Idle],
            outputs: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn advance(&mut self, next: GenerationState) {
        debug_assert!(
            !self.state.is_terminal(),
            "transition out of terminal state {}",
            self.state
        );
        self.state = next;
        self.trail.push(next);
    }

    pub(crate) fn push_error(&mut self, error: GenerationError) {
        self.errors.push(error);
    }

    pub(crate) fn push_output(&mut self, output: OutputReport) {
        self.outputs.push(output);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn transform(&self) -> &str {
        &self.transform
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Final state of the run.
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Every state visited, starting with `Idle`.
    pub fn state_trail(&self) -> &[GenerationState] {
        &self.trail
    }

    pub fn outputs(&self) -> &[OutputReport] {
        &self.outputs
    }

    pub fn errors(&self) -> &[GenerationError] {
        &self.errors
    }

    // ── Summaries ─────────────────────────────────────────────────────────

    pub fn is_aborted(&self) -> bool {
        self.state == GenerationState::Aborted
    }

    /// Persisted with every output written (or planned) and no errors.
    pub fn is_clean(&self) -> bool {
        self.state == GenerationState::Persisted && self.errors.is_empty()
    }

    pub fn written_count(&self) -> usize {
        self.count(|s| matches!(s, OutputStatus::Written { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, OutputStatus::Failed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, OutputStatus::Skipped { .. }))
    }

    /// Paths of files actually written, in write order.
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.outputs
            .iter()
            .filter(|o| matches!(o.status, OutputStatus::Written { .. }))
            .map(|o| o.path.as_path())
    }

    /// One `Error: <message>` line per collected error.
    pub fn error_lines(&self) -> Vec<String> {
        self.errors.iter().map(|e| format!("Error: {e}")).collect()
    }

    fn count(&self, pred: impl Fn(&OutputStatus) -> bool) -> usize {
        self.outputs.iter().filter(|o| pred(&o.status)).count()
    }
}
