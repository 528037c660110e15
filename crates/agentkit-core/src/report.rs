use serde::Serialize;
use std::path::PathBuf;

/// What happened to one destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyOutcome {
    Created,
    SkippedExisting,
    Overwritten,
    SourceMissing,
    Failed,
}

impl CopyOutcome {
    /// Fixed-width label for the per-file lines.
    pub fn label(self) -> &'static str {
        match self {
            CopyOutcome::Created => "created:",
            CopyOutcome::SkippedExisting => "exists: ",
            CopyOutcome::Overwritten => "updated:",
            CopyOutcome::SourceMissing => "missing:",
            CopyOutcome::Failed => "failed: ",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Project-relative, `/`-separated.
    pub path: String,
    pub outcome: CopyOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, outcome: CopyOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
            error: None,
        }
    }

    pub fn failed(path: impl Into<String>, error: impl ToString) -> Self {
        Self {
            path: path.into(),
            outcome: CopyOutcome::Failed,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub created: usize,
    pub skipped_existing: usize,
    pub overwritten: usize,
    pub source_missing: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Created => self.created += 1,
            CopyOutcome::SkippedExisting => self.skipped_existing += 1,
            CopyOutcome::Overwritten => self.overwritten += 1,
            CopyOutcome::SourceMissing => self.source_missing += 1,
            CopyOutcome::Failed => self.failed += 1,
        }
    }

    pub fn add(&mut self, other: OutcomeCounts) {
        self.created += other.created;
        self.skipped_existing += other.skipped_existing;
        self.overwritten += other.overwritten;
        self.source_missing += other.source_missing;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub files: Vec<FileReport>,
    pub warnings: Vec<String>,
}

impl StepReport {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for file in &self.files {
            counts.record(file.outcome);
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub target_root: PathBuf,
    pub catalog_version: String,
    pub steps: Vec<StepReport>,
    pub totals: OutcomeCounts,
}

impl InstallReport {
    pub fn new(target_root: PathBuf, catalog_version: impl Into<String>) -> Self {
        Self {
            target_root,
            catalog_version: catalog_version.into(),
            steps: Vec::new(),
            totals: OutcomeCounts::default(),
        }
    }

    pub fn push(&mut self, step: StepReport) {
        self.totals.add(step.counts());
        self.steps.push(step);
    }

    pub fn step(&self, id: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == id)
    }

    /// Recoverable problems from every step, in step order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .flat_map(|s| s.warnings.iter().map(String::as_str))
    }
}
