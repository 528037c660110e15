//! Filesystem operations the installer performs, behind a trait so the
//! components can run against the real disk or an in-memory tree.

use crate::io;
use std::path::Path;

pub trait Fs {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// `path` is a symbolic link. Links are never followed for this check.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. Existing directories are fine.
    fn ensure_dir(&self, path: &Path) -> std::io::Result<()>;

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Replace `path` with `data` in one step, creating parents as needed.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> std::io::Result<()>;

    /// As `write_atomic`, but the file is executable as soon as it exists.
    fn write_atomic_executable(&self, path: &Path, data: &[u8]) -> std::io::Result<()>;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// The host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl Fs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling symlink still counts as occupied
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        io::is_symlink(path)
    }

    fn ensure_dir(&self, path: &Path) -> std::io::Result<()> {
        io::ensure_dir(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        io::atomic_write(path, data)
    }

    fn write_atomic_executable(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        io::atomic_write_executable(path, data)
    }
}
