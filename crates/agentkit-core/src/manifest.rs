use crate::catalog::{GROUP_AGENTS, GROUP_CHECKLISTS, GROUP_STORIES, GROUP_TASKS, GROUP_WORKFLOWS};
use crate::request::InstallRequest;
use std::fmt;

/// Groups copied on every install, in copy order.
pub const CORE_GROUPS: &[&str] = &[
    GROUP_AGENTS,
    GROUP_WORKFLOWS,
    GROUP_TASKS,
    GROUP_CHECKLISTS,
    GROUP_STORIES,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateDirectories,
    CopyGroup(&'static str),
    GenerateConfig,
    InstallHooks,
    InstallSkills,
}

impl Step {
    pub fn id(&self) -> String {
        match self {
            Step::CreateDirectories => "create-directories".to_string(),
            Step::CopyGroup(group) => format!("copy-{group}"),
            Step::GenerateConfig => "generate-config".to_string(),
            Step::InstallHooks => "install-hooks".to_string(),
            Step::InstallSkills => "install-skills".to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// The ordered steps for `request`. Directories always come first.
pub fn resolve(request: &InstallRequest) -> Vec<Step> {
    let mut steps = vec![Step::CreateDirectories];
    steps.extend(CORE_GROUPS.iter().copied().map(Step::CopyGroup));
    steps.push(Step::GenerateConfig);
    if request.install_hooks() {
        steps.push(Step::InstallHooks);
    }
    if request.install_skills() {
        steps.push(Step::InstallSkills);
    }
    steps
}
