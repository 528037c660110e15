mod cmd;
mod output;
mod root;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agentkit",
    about = "Install the agentkit catalog (agents, workflows, tasks, checklists, story folders) into a project",
    long_about = "Install the agentkit catalog (agents, workflows, tasks, checklists, story folders) into a project.\n\n\
Re-running is safe: existing files are left alone unless --force is given. \
Running two installs against the same project at the same time is not supported.",
    version
)]
struct Cli {
    /// Project root to install into (default: current directory)
    #[arg(long, env = "AGENTKIT_ROOT")]
    root: Option<PathBuf>,

    /// Overwrite files that already exist, including .agentkit/config.yaml
    #[arg(long)]
    force: bool,

    /// Also install git hooks into .git/hooks
    #[arg(long)]
    hooks: bool,

    /// Also install assistant skills into .claude/skills
    #[arg(long)]
    skills: bool,

    /// Install from a catalog directory instead of the bundled one
    #[arg(long, value_name = "DIR")]
    catalog: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            // WARN only when RUST_LOG does not say otherwise
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = root::resolve_root(cli.root.as_deref()).and_then(|root| {
        cmd::install::run(
            &root,
            cmd::install::Options {
                force: cli.force,
                hooks: cli.hooks,
                skills: cli.skills,
                catalog: cli.catalog.as_deref(),
            },
            cli.json,
        )
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
