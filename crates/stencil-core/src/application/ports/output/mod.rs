//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{GenerationResult, SourceDocument, SyntaxError};
use crate::error::StencilResult;

/// Permission bits for generated files: owner read/write, group/other read.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` fully replaces any existing file at `path`
/// - Directories are never created; a missing parent is an error
/// - `mode` is applied where the platform supports Unix permissions
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Create or truncate `path`, write `contents`, and set `mode`.
    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for the parse/render capability of one source language.
///
/// Implemented by:
/// - `stencil_adapters::syntax::RustSyntax` (`syn` + `prettyplease`)
///
/// `render` must be a pure function of the tree so that regenerating from an
/// unchanged input yields byte-identical files.
pub trait SyntaxBackend: Send + Sync {
    /// Editable tree produced by [`SyntaxBackend::parse`].
    type Tree;

    /// Short language label, used in logs.
    fn language(&self) -> &str;

    /// Parse source text into a tree.
    fn parse(&self, source: &str) -> Result<Self::Tree, SyntaxError>;

    /// Render a tree back to source text.
    fn render(&self, tree: &Self::Tree) -> StencilResult<Vec<u8>>;
}

/// Port for a generation plug-in.
///
/// Implemented by:
/// - `stencil_adapters::transforms::PassThrough`
/// - `stencil_adapters::transforms::Specialize`
/// - `stencil_adapters::transforms::SplitItems`
///
/// A transform receives ownership of the loaded document and may mutate its
/// tree or build new ones. It reports problems as diagnostics in the result
/// and never writes files itself.
pub trait Transform<T> {
    /// Identifier shown in logs and reports.
    fn name(&self) -> &str;

    /// Map one document to zero or more named output documents.
    fn transform(&self, document: SourceDocument<T>) -> GenerationResult<T>;
}

impl<T, F> Transform<T> for (&str, F)
where
    F: Fn(SourceDocument<T>) -> GenerationResult<T>,
{
    fn name(&self) -> &str {
        self.0
    }

    fn transform(&self, document: SourceDocument<T>) -> GenerationResult<T> {
        (self.1)(document)
    }
}
