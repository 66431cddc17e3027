//! Sync planning - pure functions for deciding which branches to sync
//!
//! No I/O happens here. The gathered remote branch listing is passed in,
//! which keeps the exclusion rules easy to unit test.

use crate::types::{ExcludeMatch, SyncSettings};
use std::fmt;

/// Why a remote branch is not a sync target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The branch is the base branch itself
    Base,
    /// The branch matched an exclusion
    Excluded(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base branch"),
            Self::Excluded(pattern) => write!(f, "excluded by '{pattern}'"),
        }
    }
}

/// A single step in the sync plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStep {
    /// Merge the base into this branch and push it
    Sync {
        /// Target branch name (without remote prefix)
        branch: String,
        /// Ref merged into the branch, e.g. `origin/master`
        merge_ref: String,
        /// Merge commit message
        message: String,
    },
    /// Leave this branch alone
    Skip {
        /// Branch name (without remote prefix)
        branch: String,
        /// Why it is not synced
        reason: SkipReason,
    },
}

impl SyncStep {
    /// Get the branch name for this step
    pub fn branch_name(&self) -> &str {
        match self {
            Self::Sync { branch, .. } | Self::Skip { branch, .. } => branch,
        }
    }
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync {
                branch, merge_ref, ..
            } => write!(f, "merge {merge_ref} into {branch}, push on success"),
            Self::Skip { branch, reason } => write!(f, "skip {branch} ({reason})"),
        }
    }
}

/// Sync plan - ordered steps plus the branch to return to afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// Steps in remote listing order
    pub steps: Vec<SyncStep>,
    /// Branch checked out once all targets are processed
    pub restore_branch: String,
}

impl SyncPlan {
    /// Target branches, in processing order
    pub fn targets(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| matches!(s, SyncStep::Sync { .. }))
            .map(SyncStep::branch_name)
            .collect()
    }

    /// Check if the plan has no branch to sync
    pub fn is_empty(&self) -> bool {
        !self.steps.iter().any(|s| matches!(s, SyncStep::Sync { .. }))
    }

    /// Count target branches
    pub fn sync_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, SyncStep::Sync { .. }))
            .count()
    }
}

/// Strip the `<remote>/` prefix from a remote-tracking branch name
///
/// Names without the prefix are returned unchanged.
pub fn strip_remote_prefix<'a>(name: &'a str, remote: &str) -> &'a str {
    name.strip_prefix(remote)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
}

/// Find the exclusion that matches `branch`, if any
pub fn matching_exclusion<'a>(
    branch: &str,
    exclude: &'a [String],
    mode: ExcludeMatch,
) -> Option<&'a str> {
    exclude
        .iter()
        .find(|pattern| match mode {
            ExcludeMatch::Substring => branch.contains(pattern.as_str()),
            ExcludeMatch::Exact => branch == pattern.as_str(),
        })
        .map(String::as_str)
}

/// Merge commit message for merging `merge_ref` into `branch`
pub fn merge_message(merge_ref: &str, branch: &str) -> String {
    format!("Merge {merge_ref} into {branch}")
}

/// List target branches (PURE)
///
/// Strips the remote prefix and removes the base branch and every excluded
/// name, keeping listing order.
pub fn list_target_branches(remote_branches: &[String], settings: &SyncSettings) -> Vec<String> {
    create_sync_plan(remote_branches, settings)
        .targets()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Create a sync plan (PURE - no I/O, easily testable)
///
/// # Arguments
/// * `remote_branches` - Remote-tracking names as listed, e.g. `origin/feature-a`
/// * `settings` - Resolved run settings
#[must_use]
pub fn create_sync_plan(remote_branches: &[String], settings: &SyncSettings) -> SyncPlan {
    let merge_ref = settings.merge_ref();

    let steps = remote_branches
        .iter()
        .map(|full| strip_remote_prefix(full, &settings.remote))
        .filter(|name| !name.is_empty() && *name != "HEAD")
        .map(|name| {
            let reason = if name == settings.base {
                Some(SkipReason::Base)
            } else {
                matching_exclusion(name, &settings.exclude, settings.exclude_match)
                    .map(|p| SkipReason::Excluded(p.to_string()))
            };

            match reason {
                Some(reason) => SyncStep::Skip {
                    branch: name.to_string(),
                    reason,
                },
                None => SyncStep::Sync {
                    branch: name.to_string(),
                    merge_ref: merge_ref.clone(),
                    message: merge_message(&merge_ref, name),
                },
            }
        })
        .collect();

    SyncPlan {
        steps,
        restore_branch: settings.base.clone(),
    }
}
