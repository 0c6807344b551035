//! Generate Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Load the generic source file into a document
//! 2. Hand the document to a transform
//! 3. Derive output filenames and apply the collision policy
//! 4. Render and write every output
//!
//! Errors never escape as `Err`; they are collected into the returned
//! [`GenerationReport`] together with the state the run ended in. The caller
//! prints them, so failure events are only logged at `info`.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DEFAULT_FILE_MODE, Filesystem, SyntaxBackend, Transform},
        services::{
            loader::SourceLoader,
            report::{GenerationError, GenerationReport, GenerationState, OutputReport, OutputStatus},
        },
    },
    domain::{CollisionPolicy, GeneratedSource, PlannedOutput, plan_filenames},
    error::{StencilError, StencilResult},
};

/// Tunables for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// How to treat two outputs that derive the same filename.
    pub collision_policy: CollisionPolicy,
    /// Unix permission bits for written files.
    pub file_mode: u32,
    /// Run load, transform and naming, but write nothing.
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            file_mode: DEFAULT_FILE_MODE,
            dry_run: false,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> StencilResult<()> {
        if self.file_mode > 0o777 {
            return Err(StencilError::Configuration {
                message: format!(
                    "file mode {:o} has bits outside the permission range",
                    self.file_mode
                ),
            });
        }
        Ok(())
    }
}

/// Main generation service.
///
/// Generic over the syntax tree type `T` of its backend. The service holds no
/// per-run state, so one instance can serve many sequential runs.
pub struct GenerateService<T> {
    backend: Box<dyn SyntaxBackend<Tree = T>>,
    filesystem: Box<dyn Filesystem>,
    options: GenerateOptions,
}

impl<T> GenerateService<T> {
    /// Create a new generate service with the given adapters and default
    /// options.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stencil_core::application::GenerateService;
    ///
    /// let service = GenerateService::new(
    ///     backend,    // impl SyntaxBackend
    ///     filesystem, // impl Filesystem
    /// );
    /// let report = service.generate("gen/sliceutil.rs", "src", &transform);
    /// ```
    pub fn new(backend: Box<dyn SyntaxBackend<Tree = T>>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            backend,
            filesystem,
            options: GenerateOptions::default(),
        }
    }

    /// Replace the options after validating them.
    pub fn with_options(mut self, options: GenerateOptions) -> StencilResult<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Load `input`, run `transform` on it and persist the outputs into
    /// `output_dir`.
    ///
    /// `output_dir` must already exist; it is never created. Existing files
    /// with a derived name are overwritten.
    #[instrument(
        skip_all,
        fields(
            input = %input.as_ref().display(),
            output_dir = %output_dir.as_ref().display(),
            transform = transform.name()
        )
    )]
    pub fn generate(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        transform: &dyn Transform<T>,
    ) -> GenerationReport {
        let input = input.as_ref();
        let output_dir = output_dir.as_ref();
        let mut report =
            GenerationReport::new(input, output_dir, transform.name(), self.options.dry_run);

        // 1. Load
        let loader = SourceLoader::new(self.filesystem.as_ref(), self.backend.as_ref());
        let document = match loader.load(input) {
            Ok(document) => document,
            Err(e) => {
                info!(error = %e, "Load failed");
                report.push_error(GenerationError::Load(e));
                report.advance(GenerationState::Aborted);
                return report;
            }
        };
        report.advance(GenerationState::Loaded);

        // 2. Transform
        let result = transform.transform(document);
        if !result.succeeded() {
            report.advance(GenerationState::Transformed { succeeded: false });
            let diagnostics = result.into_diagnostics();
            info!(count = diagnostics.len(), "Transform failed");
            for diagnostic in diagnostics {
                report.push_error(GenerationError::Transform(diagnostic));
            }
            report.advance(GenerationState::Aborted);
            return report;
        }
        report.advance(GenerationState::Transformed { succeeded: true });

        let outputs = result.into_outputs();
        info!(outputs = outputs.len(), "Transform succeeded");

        // 3. Naming
        let plan = match plan_filenames(
            outputs.iter().map(|o| o.name.as_str()),
            input,
            self.options.collision_policy,
        ) {
            Ok(plan) => plan,
            Err(errors) => {
                info!(count = errors.len(), "Output naming failed");
                for e in errors {
                    report.push_error(GenerationError::Naming(e));
                }
                report.advance(GenerationState::Aborted);
                return report;
            }
        };

        // 4. Persist
        for (output, planned) in outputs.into_iter().zip(plan) {
            let entry = self.persist(output, planned, output_dir, &mut report);
            report.push_output(entry);
        }
        report.advance(GenerationState::Persisted);

        if report.failed_count() > 0 {
            info!(
                written = report.written_count(),
                failed = report.failed_count(),
                "Generation finished with write failures"
            );
        } else {
            info!(written = report.written_count(), "Generation completed");
        }

        report
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Render and write one output. Failures are recorded, never propagated,
    /// so later outputs are still attempted.
    fn persist(
        &self,
        output: GeneratedSource<T>,
        planned: PlannedOutput,
        output_dir: &Path,
        report: &mut GenerationReport,
    ) -> OutputReport {
        let path = output_dir.join(&planned.filename);
        let mut entry = OutputReport {
            name: planned.name,
            filename: planned.filename,
            path,
            overwrites: planned.overwrites,
            status: OutputStatus::Planned,
        };

        if let Some(reason) = planned.skip_reason {
            debug!(output = %entry.name, %reason, "Output skipped");
            entry.status = OutputStatus::Skipped { reason };
            return entry;
        }

        if self.options.dry_run {
            debug!(path = %entry.path.display(), "Dry run, not writing");
            return entry;
        }

        let written = self
            .backend
            .render(output.document.tree())
            .map_err(|e| match e {
                StencilError::Application(ApplicationError::RenderingFailed { .. }) => e,
                other => ApplicationError::RenderingFailed {
                    reason: other.to_string(),
                }
                .into(),
            })
            .and_then(|bytes| {
                self.filesystem
                    .write_file(&entry.path, &bytes, self.options.file_mode)
                    .map(|()| bytes.len())
            });

        match written {
            Ok(bytes) => {
                debug!(path = %entry.path.display(), bytes, "Output written");
                entry.status = OutputStatus::Written { bytes };
            }
            Err(source) => {
                info!(path = %entry.path.display(), error = %source, "Output not written");
                entry.status = OutputStatus::Failed {
                    message: source.to_string(),
                };
                report.push_error(GenerationError::Persistence {
                    name: entry.name.clone(),
                    path: entry.path.clone(),
                    source,
                });
            }
        }

        entry
    }
}
