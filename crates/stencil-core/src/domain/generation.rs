use crate::domain::{Diagnostic, SourceDocument};

/// Diagnostic used when a transform fails without saying why.
pub const UNSPECIFIED_FAILURE: &str = "transform reported failure without diagnostics";

/// One named document produced by a transform.
///
/// `name` is a short identifier, not a filename; the orchestrator combines it
/// with the input file name to build the final output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource<T> {
    pub name: String,
    pub document: SourceDocument<T>,
}

impl<T> GeneratedSource<T> {
    pub fn new(name: impl Into<String>, document: SourceDocument<T>) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }
}

/// Everything a single transform invocation hands back.
///
/// Construct through [`GenerationResult::success`] or
/// [`GenerationResult::failure`]; a failed result always carries at least one
/// diagnostic and never carries outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult<T> {
    outputs: Vec<GeneratedSource<T>>,
    succeeded: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<T> GenerationResult<T> {
    /// A successful result. An empty `outputs` means "nothing to generate".
    pub fn success(outputs: Vec<GeneratedSource<T>>) -> Self {
        Self {
            outputs,
            succeeded: true,
            diagnostics: Vec::new(),
        }
    }

    /// A successful result with nothing to write.
    pub fn empty() -> Self {
        Self::success(Vec::new())
    }

    /// A failed result. An empty diagnostic list is replaced by a single
    /// generic diagnostic.
    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        let diagnostics = if diagnostics.is_empty() {
            vec![Diagnostic::new(UNSPECIFIED_FAILURE)]
        } else {
            diagnostics
        };

        Self {
            outputs: Vec::new(),
            succeeded: false,
            diagnostics,
        }
    }

    /// Builder-style helper for transforms that accumulate outputs.
    pub fn with_output(mut self, name: impl Into<String>, document: SourceDocument<T>) -> Self {
        if self.succeeded {
            self.outputs.push(GeneratedSource::new(name, document));
        }
        self
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn outputs(&self) -> &[GeneratedSource<T>] {
        &self.outputs
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn into_outputs(self) -> Vec<GeneratedSource<T>> {
        self.outputs
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<T> From<Result<Vec<GeneratedSource<T>>, Vec<Diagnostic>>> for GenerationResult<T> {
    fn from(value: Result<Vec<GeneratedSource<T>>, Vec<Diagnostic>>) -> Self {
        match value {
            Ok(outputs) => Self::success(outputs),
            Err(diagnostics) => Self::failure(diagnostics),
        }
    }
}
