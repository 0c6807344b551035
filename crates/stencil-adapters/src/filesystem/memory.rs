//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StencilResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle while the service owns
/// another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    modes: HashMap<PathBuf, u32>,
    directories: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Register a directory and all its ancestors.
    pub fn with_directory(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.as_ref().components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        self
    }

    /// Seed a file, registering its parent directory.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        let this = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.with_directory(parent),
            _ => self,
        };
        if let Ok(mut inner) = this.inner.write() {
            inner
                .files
                .insert(path.to_path_buf(), content.as_bytes().to_vec());
        }
        this
    }

    /// Make every write to `path` fail (testing helper).
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing.insert(path.as_ref().to_path_buf());
        }
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_bytes(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Read a file's raw bytes (testing helper).
    pub fn read_bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Mode a file was last written with.
    pub fn mode_of(&self, path: impl AsRef<Path>) -> Option<u32> {
        let inner = self.inner.read().ok()?;
        inner.modes.get(path.as_ref()).copied()
    }

    /// List all files in path order.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.modes.clear();
            inner.directories.clear();
            inner.failing.clear();
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let bytes = inner
            .files
            .get(path)
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            })?;

        String::from_utf8(bytes.clone()).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("File is not valid UTF-8: {e}"),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.failing.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Simulated write failure".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), contents.to_vec());
        inner.modes.insert(path.to_path_buf(), mode);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_file_is_readable() {
        let fs = MemoryFilesystem::new().with_file("gen/t.rs", "fn a() {}");

        assert_eq!(fs.read_to_string(Path::new("gen/t.rs")).unwrap(), "fn a() {}");
        assert!(fs.is_dir(Path::new("gen")));
    }

    #[test]
    fn write_requires_existing_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("out/a.rs"), b"x", 0o644).is_err());

        let fs = fs.with_directory("out");
        fs.write_file(Path::new("out/a.rs"), b"x", 0o644).unwrap();
        assert_eq!(fs.mode_of("out/a.rs"), Some(0o644));
    }

    #[test]
    fn simulated_failure_only_hits_marked_path() {
        let fs = MemoryFilesystem::new().with_directory("out");
        fs.fail_writes_to("out/bad.rs");

        assert!(fs.write_file(Path::new("out/bad.rs"), b"x", 0o644).is_err());
        assert!(fs.write_file(Path::new("out/good.rs"), b"x", 0o644).is_ok());
        assert_eq!(fs.list_files(), vec![PathBuf::from("out/good.rs")]);
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new().with_directory("out");
        let handle = fs.clone();

        fs.write_file(Path::new("out/a.rs"), b"shared", 0o644).unwrap();

        assert_eq!(handle.read_file("out/a.rs").as_deref(), Some("shared"));
        handle.clear();
        assert!(fs.list_files().is_empty());
    }
}
