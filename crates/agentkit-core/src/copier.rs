//! Per-file, conflict-aware copying of one catalog group.
//!
//! Each destination file is decided on its own: a group where the user has
//! edited some files still receives the files it does not have yet.

use crate::catalog::{AssetCatalog, AssetGroup};
use crate::fs::Fs;
use crate::paths;
use crate::report::{CopyOutcome, FileReport};
use std::path::Path;

/// How written files land on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Regular,
    /// Executable from the moment the file appears (hook scripts).
    Executable,
}

/// Copy every entry of `group` into `root/dest`.
///
/// Never fails as a whole; problems with individual files are recorded as
/// `SourceMissing` or `Failed` and the remaining files are still copied.
pub fn copy_group(
    fs: &dyn Fs,
    catalog: &dyn AssetCatalog,
    group: &AssetGroup,
    root: &Path,
    dest: &Path,
    force: bool,
    mode: FileMode,
) -> Vec<FileReport> {
    group
        .entries
        .iter()
        .map(|entry| {
            let rel = dest.join(&entry.destination);
            let shown = paths::display_rel(&rel);
            let target = root.join(&rel);

            let data = match catalog.read_file(&entry.source) {
                Ok(Some(data)) => data,
                Ok(None) => {
                    tracing::warn!(source = %entry.source, "catalog file missing");
                    return FileReport::new(shown, CopyOutcome::SourceMissing);
                }
                Err(e) => return FileReport::failed(shown, e),
            };

            let existed = fs.exists(&target);
            if existed && !force {
                tracing::debug!(path = %shown, "exists, leaving untouched");
                return FileReport::new(shown, CopyOutcome::SkippedExisting);
            }

            let written = match mode {
                FileMode::Regular => fs.write_atomic(&target, &data),
                FileMode::Executable => fs.write_atomic_executable(&target, &data),
            };
            match written {
                Ok(()) if existed => FileReport::new(shown, CopyOutcome::Overwritten),
                Ok(()) => FileReport::new(shown, CopyOutcome::Created),
                Err(e) => FileReport::failed(shown, e),
            }
        })
        .collect()
}
