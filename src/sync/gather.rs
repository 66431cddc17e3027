//! Gather phase - refresh and list remote branches
//!
//! In the default mode failures here are reported and tolerated, so a run
//! with an unreachable remote still works from the refs it already has.
//! Strict mode turns them into errors.

use crate::error::{Error, Result};
use crate::git::GitBackend;
use crate::sync::progress::ProgressCallback;
use crate::types::SyncSettings;
use tracing::{debug, info};

/// Check that the configured remote exists
pub async fn check_remote(git: &dyn GitBackend, remote: &str) -> Result<()> {
    let remotes = git.list_remotes().await?;
    if remotes.iter().any(|r| r == remote) {
        Ok(())
    } else {
        Err(Error::RemoteNotFound(remote.to_string()))
    }
}

/// What happened to the fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Remote-tracking refs are up to date
    Fetched,
    /// Fetch failed and was tolerated; the run uses the refs it already has
    Failed(String),
}

/// Fetch all refs from the configured remote
///
/// Strict mode checks the remote exists first and propagates a failed
/// fetch; otherwise the failure is returned as [`FetchStatus::Failed`].
pub async fn fetch_remote(git: &dyn GitBackend, settings: &SyncSettings) -> Result<FetchStatus> {
    if settings.strict {
        check_remote(git, &settings.remote).await?;
    }

    match git.fetch(&settings.remote).await {
        Ok(()) => {
            info!(remote = %settings.remote, "fetched");
            Ok(FetchStatus::Fetched)
        }
        Err(e) if !settings.strict => {
            debug!(remote = %settings.remote, error = %e, "fetch failed, continuing");
            Ok(FetchStatus::Failed(e.reason()))
        }
        Err(e) => Err(e),
    }
}

/// List the remote's branches as `<remote>/<name>`
///
/// A listing failure yields an empty list unless strict.
pub async fn gather_remote_branches(
    git: &dyn GitBackend,
    settings: &SyncSettings,
    progress: &dyn ProgressCallback,
) -> Result<Vec<String>> {
    match git.list_remote_branches(&settings.remote).await {
        Ok(branches) => {
            info!(count = branches.len(), remote = %settings.remote, "listed remote branches");
            Ok(branches)
        }
        Err(e) if !settings.strict => {
            debug!(error = %e, "listing remote branches failed, continuing with none");
            progress
                .on_warning(&format!("Could not list remote branches: {}", e.reason()))
                .await;
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
