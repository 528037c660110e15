use crate::output::{print_json, print_table};
use agentkit_core::{
    catalog::{AssetCatalog, DirCatalog, EmbeddedCatalog},
    fs::OsFs,
    install::Installer,
    report::{InstallReport, OutcomeCounts},
    request::{InstallFlags, InstallRequest},
};
use anyhow::Context;
use std::path::Path;

pub struct Options<'a> {
    pub force: bool,
    pub hooks: bool,
    pub skills: bool,
    /// Catalog directory to use instead of the bundled catalog.
    pub catalog: Option<&'a Path>,
}

pub fn run(root: &Path, opts: Options<'_>, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(opts.catalog)?;
    let request = InstallRequest::new(
        root,
        InstallFlags {
            force: opts.force,
            hooks: opts.hooks,
            skills: opts.skills,
        },
    );

    if !json {
        println!(
            "Installing agentkit catalog v{} into: {}",
            catalog.version(),
            root.display()
        );
    }

    let report = Installer::new(&OsFs, catalog.as_ref())
        .run(&request)
        .context("installation aborted")?;

    if json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn load_catalog(dir: Option<&Path>) -> anyhow::Result<Box<dyn AssetCatalog>> {
    match dir {
        Some(dir) => {
            let catalog = DirCatalog::open(dir)
                .with_context(|| format!("failed to load catalog from {}", dir.display()))?;
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(
            EmbeddedCatalog::load().context("bundled catalog is unusable")?,
        )),
    }
}

fn print_report(report: &InstallReport) {
    for step in &report.steps {
        if step.files.is_empty() && step.warnings.is_empty() {
            continue;
        }
        println!("\n{}:", step.step);
        for file in &step.files {
            println!("  {} {}", file.outcome.label(), file.path);
        }
        for warning in &step.warnings {
            println!("  warning: {warning}");
        }
    }

    println!();
    let mut rows: Vec<Vec<String>> = report
        .steps
        .iter()
        .map(|s| counts_row(&s.step, s.counts()))
        .collect();
    rows.push(counts_row("total", report.totals));
    print_table(
        &["STEP", "CREATED", "SKIPPED", "OVERWRITTEN", "MISSING", "FAILED"],
        rows,
    );

    let warnings = report.warnings().count();
    if warnings == 0 {
        println!("\nagentkit installed.");
    } else {
        println!("\nagentkit installed with {warnings} warning(s).");
    }
}

fn counts_row(label: &str, c: OutcomeCounts) -> Vec<String> {
    vec![
        label.to_string(),
        c.created.to_string(),
        c.skipped_existing.to_string(),
        c.overwritten.to_string(),
        c.source_missing.to_string(),
        c.failed.to_string(),
    ]
}
