use anyhow::Context;
use std::path::{Path, PathBuf};

/// Resolve the directory to install into.
///
/// Priority:
/// 1. `--root` flag / `AGENTKIT_ROOT` env var (passed in as `explicit`),
///    anchored at the current directory when relative
/// 2. The current directory
pub fn resolve_root(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(p) if p.is_absolute() => Ok(p.to_path_buf()),
        Some(p) => Ok(current_dir()?.join(p)),
        None => current_dir(),
    }
}

fn current_dir() -> anyhow::Result<PathBuf> {
    std::env::current_dir().context("cannot determine the current directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path())).unwrap();
        assert_eq!(result, dir.path());
    }

    #[test]
    fn relative_root_is_anchored_at_cwd() {
        let result = resolve_root(Some(Path::new("sub/project"))).unwrap();
        assert!(result.is_absolute());
        assert!(result.ends_with("sub/project"));
    }

    #[test]
    fn default_is_cwd() {
        let result = resolve_root(None).unwrap();
        assert_eq!(result, std::env::current_dir().unwrap());
    }
}
