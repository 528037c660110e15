//! Runs the resolved steps of an install, strictly in order.
//!
//! Only a failure to build the base directory tree aborts the run. Everything
//! else is recorded in the step's report and the next step proceeds.
//!
//! Two installs running against the same tree at once are not supported.
//! Each file write is atomic, but outcomes of concurrent runs may interleave.

use crate::catalog::{AssetCatalog, GROUP_HOOKS, GROUP_SKILLS};
use crate::config::{self, ConfigResult};
use crate::copier::{self, FileMode};
use crate::error::Result;
use crate::fs::Fs;
use crate::hooks::{self, HooksLocation};
use crate::layout;
use crate::manifest::{self, Step};
use crate::paths;
use crate::project::{self, NameSource};
use crate::report::{CopyOutcome, FileReport, InstallReport, StepReport};
use crate::request::InstallRequest;
use std::path::Path;

pub struct Installer<'a> {
    fs: &'a dyn Fs,
    catalog: &'a dyn AssetCatalog,
}

impl<'a> Installer<'a> {
    pub fn new(fs: &'a dyn Fs, catalog: &'a dyn AssetCatalog) -> Self {
        Self { fs, catalog }
    }

    pub fn run(&self, request: &InstallRequest) -> Result<InstallReport> {
        let root = request.target_root();
        let mut report = InstallReport::new(root.to_path_buf(), self.catalog.version());

        for step in manifest::resolve(request) {
            tracing::debug!(%step, "running step");
            let mut step_report = match step {
                Step::CreateDirectories => {
                    layout::ensure(self.fs, root, paths::BASE_DIRS)?;
                    StepReport::new(step.id())
                }
                Step::CopyGroup(group) => self.copy_core_group(step, group, request),
                Step::GenerateConfig => self.generate_config(step, request),
                Step::InstallHooks => self.install_hooks(step, request),
                Step::InstallSkills => self.install_skills(step, request),
            };
            step_report.warnings.extend(file_warnings(&step_report.files));
            report.push(step_report);
        }

        Ok(report)
    }

    fn copy_core_group(&self, step: Step, group: &str, request: &InstallRequest) -> StepReport {
        let mut out = StepReport::new(step.id());
        let Some(dest) = paths::group_dir(group) else {
            out.warnings.push(format!("no install location for group '{group}'"));
            return out;
        };
        self.copy_named_group(&mut out, group, Path::new(dest), request);
        out
    }

    fn copy_named_group(
        &self,
        out: &mut StepReport,
        group: &str,
        dest: &Path,
        request: &InstallRequest,
    ) {
        match self.catalog.group(group) {
            Some(g) => out.files = copier::copy_group(
                self.fs,
                self.catalog,
                g,
                request.target_root(),
                dest,
                request.force(),
                FileMode::Regular,
            ),
            None => out
                .warnings
                .push(format!("catalog has no '{group}' group; nothing copied")),
        }
    }

    fn generate_config(&self, step: Step, request: &InstallRequest) -> StepReport {
        let mut out = StepReport::new(step.id());
        let root = request.target_root();
        let target = paths::config_path(root);

        // Name detection only matters when something will be written.
        if self.fs.exists(&target) && !request.force() {
            out.files
                .push(FileReport::new(paths::CONFIG_FILE, CopyOutcome::SkippedExisting));
            return out;
        }

        let project = project::detect_project_name(self.fs, root);
        if project.source == NameSource::Fallback {
            out.warnings.push(format!(
                "no project name found in a build descriptor; config uses '{}'",
                project.name
            ));
        }
        let variables = config::standard_variables(&project, self.catalog.version());

        let file = match config::generate(
            self.fs,
            self.catalog,
            self.catalog.config_template(),
            &variables,
            &target,
            request.force(),
        ) {
            Ok(ConfigResult::Written(cfg)) if cfg.replaced => {
                FileReport::new(paths::CONFIG_FILE, CopyOutcome::Overwritten)
            }
            Ok(ConfigResult::Written(_)) => FileReport::new(paths::CONFIG_FILE, CopyOutcome::Created),
            Ok(ConfigResult::Skipped) => {
                FileReport::new(paths::CONFIG_FILE, CopyOutcome::SkippedExisting)
            }
            Err(e) => FileReport::failed(paths::CONFIG_FILE, e),
        };
        out.files.push(file);
        out
    }

    fn install_hooks(&self, step: Step, request: &InstallRequest) -> StepReport {
        let mut out = StepReport::new(step.id());
        let Some(group) = self.catalog.group(GROUP_HOOKS) else {
            out.warnings
                .push(format!("catalog has no '{GROUP_HOOKS}' group; nothing copied"));
            return out;
        };

        match hooks::locate_hooks_dir(self.fs, request.target_root()) {
            HooksLocation::Ready(dir) => {
                out.files = hooks::install_hooks(
                    self.fs,
                    self.catalog,
                    group,
                    request.target_root(),
                    &dir,
                    request.force(),
                );
            }
            other => {
                if let Some(warning) = other.warning() {
                    tracing::warn!("{warning}");
                    out.warnings.push(warning);
                }
            }
        }
        out
    }

    fn install_skills(&self, step: Step, request: &InstallRequest) -> StepReport {
        let mut out = StepReport::new(step.id());
        let root = request.target_root();
        if let Some(link) = Path::new(paths::SKILLS_DIR)
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .find(|p| self.fs.is_symlink(&root.join(p)))
        {
            let warning = format!(
                "{} is a symbolic link; skills not installed",
                paths::display_rel(link)
            );
            tracing::warn!("{warning}");
            out.warnings.push(warning);
            return out;
        }
        self.copy_named_group(&mut out, GROUP_SKILLS, Path::new(paths::SKILLS_DIR), request);
        out
    }
}

fn file_warnings(files: &[FileReport]) -> Vec<String> {
    files
        .iter()
        .filter_map(|f| match f.outcome {
            CopyOutcome::SourceMissing => {
                Some(format!("{}: source missing from catalog", f.path))
            }
            CopyOutcome::Failed => Some(format!(
                "{}: {}",
                f.path,
                f.error.as_deref().unwrap_or("write failed")
            )),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
