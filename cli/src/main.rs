//! CLI for the issue mirror.
//!
//! Mirrors milestones, labels, issues and comments from a GitHub repository
//! to a GitHub Enterprise repository, preserving numbering and authorship.

use clap::Parser;
use issue_mirror::{
    IssueSelector, MirrorSettings, Operations, RunSummary, Runner, RunnerConfig, RunnerError,
    DEFAULT_SETTINGS_FILE, SOURCE_PASSWORD_ENV,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Mirror - Copy GitHub milestones, labels and issues to GitHub Enterprise.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Source password or personal access token.
    #[arg(long, env = SOURCE_PASSWORD_ENV, hide_env_values = true)]
    password: Option<String>,

    /// Ignore mirror notifications for every collaborator.
    #[arg(long)]
    notifications: bool,

    /// Mirror milestones, preserving their numbers.
    #[arg(long)]
    milestones: bool,

    /// Mirror labels.
    #[arg(long)]
    labels: bool,

    /// Issues to migrate, e.g. "5-8" or "5,9,7".
    #[arg(short, long, value_name = "SELECTOR")]
    issues: Option<IssueSelector>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Preview changes without touching the mirror.
    #[arg(long, visible_alias = "test")]
    dry_run: bool,

    /// Seconds to wait after every write to the mirror.
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0)]
    delay: u64,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    yes: bool,
}

impl Args {
    fn operations(&self) -> Operations {
        Operations {
            notifications: self.notifications,
            milestones: self.milestones,
            labels: self.labels,
            issues: self.issues.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.verbose);

    // octocrab's rustls needs a process-wide crypto provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match run(args).await {
        Ok(Some(summary)) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Ok(None) => {
            info!("Cancelled");
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Uses compact single-line output. `--verbose` forces the `debug` level,
/// which also surfaces octocrab's request tracing; otherwise `RUST_LOG` is
/// honoured with `info` as the fallback.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(filter)
        .init();
}

/// Main execution logic. Returns `None` if the user declined to proceed.
async fn run(args: Args) -> Result<Option<RunSummary>, RunnerError> {
    let settings = MirrorSettings::load(&args.config)?;

    let mut config = RunnerConfig::new(settings, args.operations(), args.dry_run, args.delay);
    if let Some(password) = args.password {
        config = config.with_password(password);
    }
    let runner = Runner::new(config)?;

    if !args.dry_run && !args.yes && !confirm(&runner) {
        return Ok(None);
    }

    runner.run().await.map(Some)
}

/// Asks before writing to the mirror. Anything but an answer starting with
/// `y` cancels.
fn confirm(runner: &Runner) -> bool {
    print!(
        "Are you sure you want to mirror '{}' to '{}'? [yes|no] ",
        runner.source(),
        runner.mirror()
    );
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim_start().to_lowercase().starts_with('y'),
        Err(_) => false,
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!(
        "  Notifications suppressed: {}",
        summary.notifications_suppressed
    );
    println!("  Milestones created: {}", summary.milestones_created);
    println!(
        "  Placeholders materialized: {}",
        summary.placeholders_materialized
    );
    if let Some(failure) = &summary.milestone_failure {
        println!("  Milestones failed: {failure}");
    }
    println!("  Labels created: {}", summary.labels_created);
    println!("  Labels rejected: {}", summary.labels_rejected);
    println!(
        "  Issues migrated: {} ({} pull requests)",
        summary.issues_migrated, summary.pull_requests_migrated
    );
    println!("  Comments replicated: {}", summary.comments_replicated);
    println!("  Issues closed: {}", summary.issues_closed);
    println!("  Pacing waits: {}", summary.pacing_waits);

    for outcome in &summary.issues {
        let mirror = outcome
            .mirror_number
            .map_or_else(|| "-".to_string(), |number| format!("#{number}"));
        println!(
            "    #{} -> {} [{}] {}",
            outcome.number, mirror, outcome.stage, outcome.title
        );
    }
}
