//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use stencil_core::{application::ports::Filesystem, error::StencilResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> StencilResult<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }

        let mut file = options
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file for writing"))?;
        file.write_all(contents)
            .map_err(|e| map_io_error(path, e, "write file"))?;

        // The open mode only applies to new files and is filtered by the
        // umask; set it explicitly so overwritten files end up identical.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            let _ = mode;
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> stencil_core::error::StencilError {
    use stencil_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.rs");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, b"fn main() {}\n", 0o644).unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "fn main() {}\n");
        assert!(fs.exists(&path));
        assert!(fs.is_dir(dir.path()));
    }

    #[test]
    fn write_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.rs");
        std::fs::write(&path, "a very long previous body").unwrap();

        LocalFilesystem::new()
            .write_file(&path, b"short", 0o644)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.rs");

        let err = LocalFilesystem::new()
            .write_file(&path, b"x", 0o644)
            .unwrap_err();

        assert!(err.to_string().contains("Failed to open file for writing"));
        assert!(!dir.path().join("missing").exists());
    }

    #[cfg(unix)]
    #[test]
    fn write_applies_exact_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.rs");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        LocalFilesystem::new()
            .write_file(&path, b"new", 0o644)
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope.rs"))
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read file"));
    }
}
