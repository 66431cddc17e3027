//! Sync execution - effectful operations
//!
//! Takes a `SyncPlan` (created by the pure planning functions) and drives
//! the git backend through checkout, merge and push for every target, then
//! returns to the base branch.

use crate::git::GitBackend;
use crate::sync::plan::{SyncPlan, SyncStep};
use crate::sync::progress::ProgressCallback;
use crate::types::{BranchOutcome, BranchReport, SyncReport, SyncSettings};
use tracing::{debug, info};

/// Execute the sync plan (EFFECTFUL)
///
/// Every target is processed to completion before the next one starts, and a
/// failure on one branch never stops the run. The base branch is checked out
/// exactly once at the end, whatever happened before.
pub async fn execute_sync(
    plan: &SyncPlan,
    git: &dyn GitBackend,
    settings: &SyncSettings,
    progress: &dyn ProgressCallback,
) -> SyncReport {
    let mut report = SyncReport {
        restore_branch: plan.restore_branch.clone(),
        ..SyncReport::default()
    };

    if plan.is_empty() {
        progress.on_message("No branches to sync").await;
    } else {
        progress
            .on_message(&format!(
                "Merging {} into {} branch(es)",
                settings.merge_ref(),
                plan.sync_count()
            ))
            .await;
    }

    for step in &plan.steps {
        match step {
            SyncStep::Sync {
                branch,
                merge_ref,
                message,
            } => {
                progress.on_branch_start(branch).await;

                let outcome =
                    sync_branch(git, settings, progress, branch, merge_ref, message).await;
                let branch_report = BranchReport {
                    branch: branch.clone(),
                    merge_ref: merge_ref.clone(),
                    outcome,
                };

                info!(branch = %branch, outcome = ?branch_report.outcome, "branch processed");
                progress.on_branch_done(&branch_report).await;
                report.branches.push(branch_report);
            }
            SyncStep::Skip { branch, reason } => {
                debug!(branch = %branch, %reason, "skipping");
            }
        }
    }

    if let Err(e) = git.checkout(&plan.restore_branch).await {
        debug!(branch = %plan.restore_branch, error = %e, "could not restore base branch");
        progress
            .on_warning(&format!(
                "Could not check out {}: {}",
                plan.restore_branch,
                e.reason()
            ))
            .await;
        report.restore_error = Some(e.reason());
    }

    report
}

/// Checkout, merge and push one branch
async fn sync_branch(
    git: &dyn GitBackend,
    settings: &SyncSettings,
    progress: &dyn ProgressCallback,
    branch: &str,
    merge_ref: &str,
    message: &str,
) -> BranchOutcome {
    if let Err(e) = git.checkout(branch).await {
        if settings.strict {
            return BranchOutcome::CheckoutFailed(e.reason());
        }
        // The merge still runs against whatever is checked out
        debug!(branch, error = %e, "checkout failed, merging anyway");
        progress
            .on_warning(&format!("Checkout of {branch} failed: {}", e.reason()))
            .await;
    }

    if let Err(e) = git.merge(merge_ref, message).await {
        return BranchOutcome::Conflict(e.reason());
    }

    match git.push(&settings.remote, branch).await {
        Ok(()) => BranchOutcome::Pushed,
        Err(e) => BranchOutcome::PushFailed(e.reason()),
    }
}
