//! Source loader - text on disk to [`SourceDocument`].

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{
        LoadError,
        ports::{Filesystem, SyntaxBackend},
    },
    domain::SourceDocument,
};

/// Reads a file through the [`Filesystem`] port and parses it with a
/// [`SyntaxBackend`].
pub struct SourceLoader<'a, T> {
    filesystem: &'a dyn Filesystem,
    backend: &'a dyn SyntaxBackend<Tree = T>,
}

impl<'a, T> SourceLoader<'a, T> {
    pub fn new(filesystem: &'a dyn Filesystem, backend: &'a dyn SyntaxBackend<Tree = T>) -> Self {
        Self {
            filesystem,
            backend,
        }
    }

    /// Load one generic source file.
    ///
    /// Each call yields a freshly parsed tree that no other document shares.
    #[instrument(skip_all, fields(path = %path.display(), language = self.backend.language()))]
    pub fn load(&self, path: &Path) -> Result<SourceDocument<T>, LoadError> {
        let text = self
            .filesystem
            .read_to_string(path)
            .map_err(|e| LoadError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(bytes = text.len(), "Source read");

        let tree = self
            .backend
            .parse(&text)
            .map_err(|error| LoadError::Parse {
                path: path.to_path_buf(),
                error,
            })?;

        Ok(SourceDocument::new(tree, path))
    }
}
