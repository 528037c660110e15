use crate::catalog::{AssetCatalog, AssetGroup};
use crate::copier::{self, FileMode};
use crate::fs::Fs;
use crate::paths;
use crate::report::FileReport;
use std::path::{Path, PathBuf};

/// Where git hooks can go for a target root, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HooksLocation {
    /// Project-relative hooks directory, present and ready.
    Ready(PathBuf),
    /// No `.git` directory under the root.
    NoRepository,
    /// `.git` is a file (worktree or submodule) or `.git` / `.git/hooks` is a
    /// symlink; the hooks live outside the root.
    External,
    /// `.git` exists but its hooks directory could not be created.
    Unavailable(String),
}

impl HooksLocation {
    pub fn warning(&self) -> Option<String> {
        match self {
            HooksLocation::Ready(_) => None,
            HooksLocation::NoRepository => {
                Some("no .git directory found; hooks not installed".to_string())
            }
            HooksLocation::External => Some(
                ".git hooks live outside the project (worktree, submodule, or symlink); hooks not installed"
                    .to_string(),
            ),
            HooksLocation::Unavailable(reason) => {
                Some(format!("cannot create .git/hooks ({reason}); hooks not installed"))
            }
        }
    }
}

/// Find the hooks directory, creating `.git/hooks` inside an existing repo.
pub fn locate_hooks_dir(fs: &dyn Fs, root: &Path) -> HooksLocation {
    let git = paths::git_dir(root);
    if !fs.exists(&git) {
        return HooksLocation::NoRepository;
    }
    if fs.is_symlink(&git) || !fs.is_dir(&git) {
        return HooksLocation::External;
    }
    let hooks = paths::git_hooks_dir(root);
    if fs.is_symlink(&hooks) {
        return HooksLocation::External;
    }
    if !fs.is_dir(&hooks) {
        if let Err(e) = fs.ensure_dir(&hooks) {
            return HooksLocation::Unavailable(e.to_string());
        }
    }
    HooksLocation::Ready(PathBuf::from(paths::GIT_HOOKS_DIR))
}

/// Copy hook scripts into `root/hooks_dir`; every written hook is executable
/// as soon as it appears.
///
/// Hooks left in place because they already existed keep their permissions.
pub fn install_hooks(
    fs: &dyn Fs,
    catalog: &dyn AssetCatalog,
    group: &AssetGroup,
    root: &Path,
    hooks_dir: &Path,
    force: bool,
) -> Vec<FileReport> {
    copier::copy_group(fs, catalog, group, root, hooks_dir, force, FileMode::Executable)
}
