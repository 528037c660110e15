use std::path::{Path, PathBuf};

/// Flags as parsed from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallFlags {
    pub force: bool,
    pub hooks: bool,
    pub skills: bool,
}

/// The resolved intent of one invocation. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    target_root: PathBuf,
    flags: InstallFlags,
}

impl InstallRequest {
    pub fn new(target_root: impl Into<PathBuf>, flags: InstallFlags) -> Self {
        Self {
            target_root: target_root.into(),
            flags,
        }
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Permit overwriting files that already exist.
    pub fn force(&self) -> bool {
        self.flags.force
    }

    pub fn install_hooks(&self) -> bool {
        self.flags.hooks
    }

    pub fn install_skills(&self) -> bool {
        self.flags.skills
    }
}
