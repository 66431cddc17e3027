//! Branch sync engine
//!
//! Three-phase pattern:
//! 1. Gather - fetch the remote and list its branches (effectful)
//! 2. Plan - create `SyncPlan` (pure, testable)
//! 3. Execute - checkout, merge, push each target, restore base (effectful)

mod execute;
mod gather;
mod plan;
mod progress;

pub use execute::execute_sync;
pub use gather::{FetchStatus, check_remote, fetch_remote, gather_remote_branches};
pub use plan::{
    SkipReason, SyncPlan, SyncStep, create_sync_plan, list_target_branches, matching_exclusion,
    merge_message, strip_remote_prefix,
};
pub use progress::{NoopProgress, ProgressCallback};

use crate::error::{Error, Result};
use crate::git::GitBackend;
use crate::types::{SyncReport, SyncSettings};

/// List the remote's branches and plan the run from them
///
/// Does not fetch. Callers that preview the plan before executing it use
/// this directly; [`run_branch_sync`] fetches first.
pub async fn gather_and_plan(
    git: &dyn GitBackend,
    settings: &SyncSettings,
    progress: &dyn ProgressCallback,
) -> Result<SyncPlan> {
    let remote_branches = gather_remote_branches(git, settings, progress).await?;
    Ok(create_sync_plan(&remote_branches, settings))
}

/// Run all three phases end to end
///
/// The returned report still has to go through [`enforce_policy`] to decide
/// the run's exit status.
pub async fn run_branch_sync(
    git: &dyn GitBackend,
    settings: &SyncSettings,
    progress: &dyn ProgressCallback,
) -> Result<SyncReport> {
    if let FetchStatus::Failed(reason) = fetch_remote(git, settings).await? {
        progress
            .on_warning(&format!("Fetch from {} failed: {reason}", settings.remote))
            .await;
    }
    let plan = gather_and_plan(git, settings, progress).await?;
    Ok(execute_sync(&plan, git, settings, progress).await)
}

/// Turn a finished report into the run's result
///
/// Lenient runs always succeed. Strict runs fail when the base branch could
/// not be restored, and `fail_on_conflict` fails when any branch was left
/// unpushed.
pub fn enforce_policy(report: &SyncReport, settings: &SyncSettings) -> Result<()> {
    if settings.strict {
        if let Some(reason) = &report.restore_error {
            return Err(Error::RestoreFailed {
                branch: report.restore_branch.clone(),
                reason: reason.clone(),
            });
        }
    }

    let unpushed = report.needs_attention().len();
    if settings.fail_on_conflict && unpushed > 0 {
        return Err(Error::BranchesNeedAttention(unpushed));
    }

    Ok(())
}
