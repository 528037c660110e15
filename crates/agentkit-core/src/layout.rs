use crate::error::{KitError, Result};
use crate::fs::Fs;
use std::path::Path;

/// Create every directory in `dirs` (relative to `root`) that is missing.
///
/// Existing directories are left alone. Any failure aborts with the
/// offending path, since nothing else can be installed without the tree.
/// A symlink in place of one of `dirs` is a failure too: writing through it
/// would put files outside `root`.
pub fn ensure(fs: &dyn Fs, root: &Path, dirs: &[&str]) -> Result<()> {
    for dir in dirs {
        let path = root.join(dir);
        if fs.is_symlink(&path) {
            return Err(KitError::DirectoryCreate {
                path,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "is a symbolic link; refusing to install through it",
                ),
            });
        }
        if fs.is_dir(&path) {
            continue;
        }
        fs.ensure_dir(&path)
            .map_err(|source| KitError::DirectoryCreate {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(dir = %path.display(), "created directory");
    }
    Ok(())
}
