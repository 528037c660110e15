use crate::error::{KitError, Result};
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_DIR: &str = ".agentkit";
pub const AGENTS_DIR: &str = ".agentkit/agents";
pub const WORKFLOWS_DIR: &str = ".agentkit/workflows";
pub const TASKS_DIR: &str = ".agentkit/tasks";
pub const CHECKLISTS_DIR: &str = ".agentkit/checklists";

pub const CONFIG_FILE: &str = ".agentkit/config.yaml";

pub const STORIES_DIR: &str = "stories";
pub const STORIES_BACKLOG_DIR: &str = "stories/backlog";
pub const STORIES_IN_PROGRESS_DIR: &str = "stories/in-progress";
pub const STORIES_COMPLETED_DIR: &str = "stories/completed";

pub const GIT_DIR: &str = ".git";
pub const GIT_HOOKS_DIR: &str = ".git/hooks";

pub const SKILLS_DIR: &str = ".claude/skills";

/// The fixed tree every install ensures, parents before children.
pub const BASE_DIRS: &[&str] = &[
    CONFIG_DIR,
    AGENTS_DIR,
    WORKFLOWS_DIR,
    TASKS_DIR,
    CHECKLISTS_DIR,
    STORIES_DIR,
    STORIES_BACKLOG_DIR,
    STORIES_IN_PROGRESS_DIR,
    STORIES_COMPLETED_DIR,
];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn git_dir(root: &Path) -> PathBuf {
    root.join(GIT_DIR)
}

pub fn git_hooks_dir(root: &Path) -> PathBuf {
    root.join(GIT_HOOKS_DIR)
}

/// Project-relative destination directory for a core catalog group.
pub fn group_dir(group: &str) -> Option<&'static str> {
    match group {
        "agents" => Some(AGENTS_DIR),
        "workflows" => Some(WORKFLOWS_DIR),
        "tasks" => Some(TASKS_DIR),
        "checklists" => Some(CHECKLISTS_DIR),
        "stories" => Some(STORIES_DIR),
        _ => None,
    }
}

/// Render a project-relative path with forward slashes for reports.
pub fn display_rel(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Confinement
// ---------------------------------------------------------------------------

/// Validate a catalog-supplied relative path and return it as a `PathBuf`.
///
/// Rejects empty, absolute, and parent-traversing paths so every join onto
/// the target root stays inside it.
pub fn confined(rel: &str) -> Result<PathBuf> {
    let path = Path::new(rel);
    if rel.is_empty() || rel.contains('\\') || rel.contains('\0') {
        return Err(KitError::UnsafePath(rel.to_string()));
    }
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(KitError::UnsafePath(rel.to_string()));
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(KitError::UnsafePath(rel.to_string()));
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
