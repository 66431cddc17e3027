//! Sync command - merge the base branch into every remote branch

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow, check, spinner_style};
use anstream::println;
use branch_sync::config::SyncConfig;
use branch_sync::error::{Error, Result};
use branch_sync::sync::{
    FetchStatus, SyncPlan, SyncStep, enforce_policy, execute_sync, fetch_remote, gather_and_plan,
};
use branch_sync::types::SyncReport;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Options for the sync command
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Dry run - show what would be done without making changes
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before executing
    pub confirm: bool,
}

/// Run the sync command
pub async fn run_sync(path: &Path, overrides: SyncConfig, options: SyncOptions) -> Result<()> {
    let ctx = CommandContext::new(path, overrides).await?;
    let settings = &ctx.settings;
    let progress = CliProgress;

    // Fetch from remote with spinner
    if !options.dry_run {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!("Fetching from {}...", settings.remote.emphasis()));
        spinner.enable_steady_tick(Duration::from_millis(80));

        match fetch_remote(&ctx.git, settings).await {
            Ok(FetchStatus::Fetched) => spinner.finish_with_message(format!(
                "{} Fetched from {}",
                check(),
                settings.remote.emphasis()
            )),
            Ok(FetchStatus::Failed(reason)) => spinner.finish_with_message(format!(
                "{} Fetch from {} failed, using existing refs: {}",
                "warning:".warn(),
                settings.remote.emphasis(),
                reason.muted()
            )),
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        }
    }

    let plan = gather_and_plan(&ctx.git, settings, &progress).await?;

    if options.dry_run {
        print_sync_preview(&plan);
        println!("{}", "Dry run complete".muted());
        return Ok(());
    }

    if options.confirm {
        print_sync_preview(&plan);
        if !Confirm::new()
            .with_prompt("Proceed with sync?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let report = execute_sync(&plan, &ctx.git, settings, &progress).await;

    print_sync_summary(&report);

    enforce_policy(&report, settings)
}

/// Print the plan for --dry-run and --confirm
fn print_sync_preview(plan: &SyncPlan) {
    println!("{}:", "Sync plan".emphasis());
    println!();

    if plan.steps.is_empty() {
        println!("  {}", "No remote branches found".muted());
    }

    for step in &plan.steps {
        match step {
            SyncStep::Sync { .. } => println!("  {} {}", arrow(), step),
            SyncStep::Skip { .. } => println!("  {} {}", arrow(), step.to_string().muted()),
        }
    }
    println!("  {} checkout {}", arrow(), plan.restore_branch.accent());

    println!();
}

/// Print the closing summary
fn print_sync_summary(report: &SyncReport) {
    let attention = report.needs_attention();

    println!();
    println!(
        "{} {} pushed, {} need attention",
        format!("{CHECK} Sync complete:").success(),
        report.pushed().len().accent(),
        attention.len().accent()
    );

    for branch_report in &attention {
        println!("   {} {}", "-".warn(), branch_report.branch.warn());
    }

    if let Some(reason) = &report.restore_error {
        println!(
            "{} still not on {}: {}",
            "warning:".warn(),
            report.restore_branch.accent(),
            reason.muted()
        );
    }
}
