//! CLI definition, tracing setup, and the snapshot command handler.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use reposnap_artifacts::artifact_file_name;
use reposnap_core::pipeline::{ProgressReporter, SnapshotConfig, SnapshotResult};
use reposnap_shared::{ExtensionSet, TargetSpec, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// RepoSnap — turn a repository into portable markdown snapshots.
#[derive(Debug, Parser)]
#[command(
    name = "reposnap",
    version,
    about = "Generate directory-structure and file-content markdown documents for a repository.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// GitHub repository URL or local directory path.
    pub target: String,

    /// Extension token to scan (repeatable, e.g. --ext .py --ext .md).
    /// Defaults to the configured or built-in set.
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,

    /// Directory to write the generated documents into (defaults to the
    /// current working directory).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "reposnap=info",
        1 => "reposnap=debug",
        _ => "reposnap=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot command
// ---------------------------------------------------------------------------

/// Run the snapshot command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;

    let extensions = if cli.extensions.is_empty() {
        config.extensions.to_set()
    } else {
        ExtensionSet::new(&cli.extensions)
    };

    let target = TargetSpec::new(&cli.target);

    info!(target = %target, extensions = extensions.len(), "processing target");
    println!("Processing: {target}");

    let snapshot_config = SnapshotConfig {
        target,
        extensions,
    };

    let reporter = CliProgress::new();
    let result = reposnap_core::pipeline::run(&snapshot_config, &reporter)?;

    let out_dir = match cli.out {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| eyre!("cannot determine working directory: {e}"))?,
    };

    let content_file = out_dir.join(artifact_file_name(
        &result.name,
        "content",
        result.generated_at,
    ));
    let structure_file = out_dir.join(artifact_file_name(
        &result.name,
        "structure",
        result.generated_at,
    ));

    std::fs::write(&content_file, &result.content_doc)
        .map_err(|e| eyre!("failed to write {}: {e}", content_file.display()))?;
    std::fs::write(&structure_file, &result.structure_doc)
        .map_err(|e| eyre!("failed to write {}: {e}", structure_file.display()))?;

    println!();
    println!("  Snapshot complete!");
    println!("  Name:      {}", result.name);
    println!("  Files:     {}", result.entries.len());
    println!("  Content:   {}", content_file.display());
    println!("  Structure: {}", structure_file.display());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &SnapshotResult) {
        self.spinner.finish_and_clear();
    }
}
