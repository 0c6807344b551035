use std::path::{Path, PathBuf};

/// One parsed source file together with the path it was read from.
///
/// The document owns its tree outright. It is moved into exactly one
/// transform invocation, which may mutate the tree in place or build new
/// trees from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument<T> {
    tree: T,
    origin_path: PathBuf,
}

impl<T> SourceDocument<T> {
    pub fn new(tree: T, origin_path: impl Into<PathBuf>) -> Self {
        Self {
            tree,
            origin_path: origin_path.into(),
        }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn origin_path(&self) -> &Path {
        &self.origin_path
    }

    /// Wrap another tree as a document originating from the same file.
    pub fn derive<U>(&self, tree: U) -> SourceDocument<U> {
        SourceDocument {
            tree,
            origin_path: self.origin_path.clone(),
        }
    }

    /// Replace the tree, keeping the origin path.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SourceDocument<U> {
        SourceDocument {
            tree: f(self.tree),
            origin_path: self.origin_path,
        }
    }

    pub fn into_tree(self) -> T {
        self.tree
    }

    pub fn into_parts(self) -> (T, PathBuf) {
        (self.tree, self.origin_path)
    }
}
