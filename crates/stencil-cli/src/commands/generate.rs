//! Implementation of the `stencil generate` command.
//!
//! Responsibility: translate CLI arguments into a transform and options, run
//! the core generate service, and display the report. No business logic
//! lives here.

use tracing::{debug, info, instrument};

use stencil_adapters::{
    LocalFilesystem, PassThrough, RustSyntax, RustTree, Specialize, SplitItems,
    transforms::DEFAULT_PLACEHOLDER,
};
use stencil_core::application::{
    GenerateOptions, GenerateService, GenerationReport, OutputStatus, ports::Transform,
};

use crate::{
    cli::{GenerateArgs, TransformKind},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil generate` command.
///
/// 1. Resolve transform and options (flags over config)
/// 2. Run the generation through `GenerateService`
/// 3. Print the report; every collected error becomes one `Error:` line
/// 4. Fail with exit code 5 unless the run was clean
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let kind = match args.transform {
        Some(kind) => kind,
        None => config.generation.transform()?,
    };
    check_flags(kind, &args)?;
    let options = resolve_options(&args, &config)?;
    let transform = build_transform(kind, &args);

    debug!(
        transform = %kind,
        collision_policy = %options.collision_policy,
        file_mode = %format!("{:o}", options.file_mode),
        dry_run = options.dry_run,
        "Generation configured"
    );

    let service = GenerateService::new(Box::new(RustSyntax::new()), Box::new(LocalFilesystem::new()))
        .with_options(options)?;

    let report = service.generate(&args.input, &args.output, transform.as_ref());
    info!(state = %report.state(), written = report.written_count(), "Generation finished");

    present(&report, &output)?;

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::GenerationFailed {
            count: report.errors().len(),
            suggestions: suggestions(&report),
        })
    }
}

/// Flags override the configured defaults.
fn resolve_options(args: &GenerateArgs, config: &AppConfig) -> CliResult<GenerateOptions> {
    let mut options = config.generation.options()?;
    if let Some(policy) = args.on_collision {
        options.collision_policy = policy.into();
    }
    options.dry_run = args.dry_run;
    Ok(options)
}

/// Reject flags that the chosen transform would silently ignore.
fn check_flags(kind: TransformKind, args: &GenerateArgs) -> CliResult<()> {
    let misplaced = match kind {
        TransformKind::Copy if !args.types.is_empty() => Some("--types"),
        TransformKind::Split if !args.types.is_empty() => Some("--types"),
        TransformKind::Specialize | TransformKind::Split if args.name.is_some() => Some("--name"),
        TransformKind::Copy | TransformKind::Split if args.placeholder.is_some() => {
            Some("--placeholder")
        }
        _ => None,
    };
    match misplaced {
        Some(flag) => Err(CliError::InvalidInput {
            message: format!("{flag} does not apply to the '{kind}' transform"),
        }),
        None => Ok(()),
    }
}

fn build_transform(kind: TransformKind, args: &GenerateArgs) -> Box<dyn Transform<RustTree>> {
    match kind {
        TransformKind::Copy => Box::new(
            args.name
                .as_deref()
                .map(PassThrough::named)
                .unwrap_or_default(),
        ),
        TransformKind::Specialize => Box::new(Specialize::new(
            args.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER),
            args.types.iter().map(String::as_str),
        )),
        TransformKind::Split => Box::new(SplitItems::new()),
    }
}

fn present(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(report);
    }

    for line in report.error_lines() {
        output.error_line(&line)?;
    }

    for entry in report.outputs() {
        let path = entry.path.display();
        match &entry.status {
            OutputStatus::Written { bytes } => {
                output.success(&format!("Wrote {path} ({bytes} bytes)"))?
            }
            OutputStatus::Planned => output.info(&format!("Would write {path}"))?,
            OutputStatus::Skipped { reason } => {
                output.warning(&format!("Skipped {} ({reason})", entry.name))?
            }
            OutputStatus::Failed { .. } => {}
        }
    }

    if report.is_clean() && report.outputs().is_empty() {
        output.info("Transform produced no outputs; nothing to write")?;
    }

    Ok(())
}

/// Deduplicated suggestions across all collected errors.
fn suggestions(report: &GenerationReport) -> Vec<String> {
    let mut all: Vec<String> = Vec::new();
    for suggestion in report.errors().iter().flat_map(|e| e.suggestions()) {
        if !all.contains(&suggestion) {
            all.push(suggestion);
        }
    }
    all
}
