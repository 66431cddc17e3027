//! branch-sync CLI entry point

mod cli;

use anstream::eprintln;
use branch_sync::config::SyncConfig;
use clap::{ArgAction, Parser};
use cli::style::Stylize;
use cli::sync::{SyncOptions, run_sync};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Merge a base branch into every remote branch and push the clean merges
#[derive(Parser, Debug)]
#[command(name = "branch-sync", version, about, long_about = None)]
struct Cli {
    /// Path to the git repository
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Branch merged into every other branch [default: master]
    #[arg(long)]
    base: Option<String>,

    /// Remote to fetch from and push to [default: origin]
    #[arg(long)]
    remote: Option<String>,

    /// Branch names to leave alone, comma-separated [default: master,main]
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Exclude only exact branch names instead of any name containing them
    #[arg(long, overrides_with = "no_exact_exclude")]
    exact_exclude: bool,

    /// Match exclusions as substrings even if a config file says otherwise
    #[arg(long, overrides_with = "exact_exclude")]
    no_exact_exclude: bool,

    /// Fail on fetch, listing or restore errors and skip branches that cannot
    /// be checked out
    #[arg(long, overrides_with = "no_strict")]
    strict: bool,

    /// Tolerate failures even if a config file enables strict mode
    #[arg(long, overrides_with = "strict")]
    no_strict: bool,

    /// Exit with an error if any branch was not pushed
    #[arg(long, overrides_with = "no_fail_on_conflict")]
    fail_on_conflict: bool,

    /// Exit successfully on conflicts even if a config file says otherwise
    #[arg(long, overrides_with = "fail_on_conflict")]
    no_fail_on_conflict: bool,

    /// Show what would be done without making changes
    #[arg(long, conflicts_with = "confirm")]
    dry_run: bool,

    /// Preview the plan and ask before executing
    #[arg(long)]
    confirm: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Command-line layer of the configuration; unset flags fall through
    fn overrides(&self) -> SyncConfig {
        SyncConfig {
            base: self.base.clone(),
            remote: self.remote.clone(),
            exclude: self.exclude.clone(),
            exact_exclude: flag(self.exact_exclude, self.no_exact_exclude),
            strict: flag(self.strict, self.no_strict),
            fail_on_conflict: flag(self.fail_on_conflict, self.no_fail_on_conflict),
        }
    }
}

/// `--flag` / `--no-flag` pair as a config layer value
fn flag(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("branch_sync={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = SyncOptions {
        dry_run: cli.dry_run,
        confirm: cli.confirm,
    };

    match run_sync(&cli.path, cli.overrides(), options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".error());
            ExitCode::FAILURE
        }
    }
}
