use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Readers see either the previous content or the new content, never a mix.
///
/// An existing file keeps its permissions; a new file gets the conventional
/// 0o644 on Unix instead of the tempfile's private 0o600.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    write_replacing(path, data, false)
}

/// Like [`atomic_write`], but the file is executable the moment it appears.
///
/// The mode is applied to the tempfile before the rename, so there is no
/// window where the file exists without its executable bits.
pub fn atomic_write_executable(path: &Path, data: &[u8]) -> std::io::Result<()> {
    write_replacing(path, data, true)
}

fn write_replacing(path: &Path, data: &[u8], executable: bool) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let prior = std::fs::metadata(path).ok().map(|m| m.permissions());
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    if let Some(perms) = file_permissions(prior, executable) {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

/// `path` is itself a symbolic link (not followed).
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Prior permissions (or 0o644 for a new file), plus 0o755 when executable.
#[cfg(unix)]
fn file_permissions(prior: Option<Permissions>, executable: bool) -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = prior.unwrap_or_else(|| Permissions::from_mode(0o644));
    if executable {
        perms.set_mode(perms.mode() | 0o755);
    }
    Some(perms)
}

#[cfg(not(unix))]
fn file_permissions(prior: Option<Permissions>, _executable: bool) -> Option<Permissions> {
    prior
}
