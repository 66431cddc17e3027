//! Progress reporting for sync runs

use crate::types::BranchReport;
use async_trait::async_trait;

/// Receives progress events while a sync runs
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A target branch is about to be checked out
    async fn on_branch_start(&self, branch: &str);

    /// A target branch reached its terminal state
    async fn on_branch_done(&self, report: &BranchReport);

    /// A failure was tolerated and the run continues
    async fn on_warning(&self, message: &str);

    /// Free-form status message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_branch_start(&self, _branch: &str) {}
    async fn on_branch_done(&self, _report: &BranchReport) {}
    async fn on_warning(&self, _message: &str) {}
    async fn on_message(&self, _message: &str) {}
}
