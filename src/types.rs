//! Core types for branch-sync

use std::fmt;

/// Default base branch merged into every target
pub const DEFAULT_BASE: &str = "master";

/// Default remote fetched from and pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch names excluded from the target set unless overridden
pub const DEFAULT_EXCLUDES: &[&str] = &["master", "main"];

/// How exclusion names are matched against branch names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcludeMatch {
    /// Exclude any branch whose name contains an exclusion as a substring
    /// (`mainline-feature` is excluded by `main`)
    #[default]
    Substring,
    /// Exclude only branches whose name equals an exclusion
    Exact,
}

impl fmt::Display for ExcludeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Fully resolved settings for one sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Branch whose remote-tracking ref is merged into every target
    pub base: String,
    /// Remote to fetch from and push to
    pub remote: String,
    /// Names excluded from the target set (the base is always excluded too)
    pub exclude: Vec<String>,
    /// Matching mode for `exclude`
    pub exclude_match: ExcludeMatch,
    /// Treat fetch/list/checkout/restore failures as failures instead of
    /// letting them fall through
    pub strict: bool,
    /// Fail the run if any branch was left unpushed
    pub fail_on_conflict: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            exclude: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
            exclude_match: ExcludeMatch::default(),
            strict: false,
            fail_on_conflict: false,
        }
    }
}

impl SyncSettings {
    /// Remote-tracking ref of the base branch, e.g. `origin/master`
    pub fn merge_ref(&self) -> String {
        format!("{}/{}", self.remote, self.base)
    }
}

/// Terminal state of one target branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// Merge was clean and the push succeeded
    Pushed,
    /// Merge was clean but the push was rejected
    PushFailed(String),
    /// Merge failed; the branch is left checked out for manual resolution
    Conflict(String),
    /// Checkout failed and the branch was skipped (strict mode only)
    CheckoutFailed(String),
}

impl BranchOutcome {
    /// Whether the branch ended up pushed
    pub const fn is_pushed(&self) -> bool {
        matches!(self, Self::Pushed)
    }
}

/// Outcome of one target branch, with the context needed to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchReport {
    /// Target branch name (without remote prefix)
    pub branch: String,
    /// Ref that was merged into it, e.g. `origin/master`
    pub merge_ref: String,
    /// What happened
    pub outcome: BranchOutcome,
}

impl fmt::Display for BranchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            branch,
            merge_ref,
            outcome,
        } = self;
        match outcome {
            BranchOutcome::Pushed => {
                write!(f, "Successfully merged {merge_ref} into {branch} and pushed.")
            }
            BranchOutcome::PushFailed(reason) => {
                write!(f, "Merged {merge_ref} into {branch} but push failed: {reason}")
            }
            BranchOutcome::Conflict(_) => {
                write!(f, "Merge conflict in {branch}. Please resolve manually.")
            }
            BranchOutcome::CheckoutFailed(reason) => {
                write!(f, "Could not check out {branch}, skipped: {reason}")
            }
        }
    }
}

/// Result of executing a sync plan
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Per-branch outcomes, in processing order
    pub branches: Vec<BranchReport>,
    /// Branch checked out at the end of the run
    pub restore_branch: String,
    /// Why the final checkout failed, if it did
    pub restore_error: Option<String>,
}

impl SyncReport {
    /// Whether the final checkout of the base branch succeeded
    pub const fn base_restored(&self) -> bool {
        self.restore_error.is_none()
    }

    /// Branches that were merged and pushed
    pub fn pushed(&self) -> Vec<&str> {
        self.branches
            .iter()
            .filter(|r| r.outcome.is_pushed())
            .map(|r| r.branch.as_str())
            .collect()
    }

    /// Branches that were not pushed, for any reason
    pub fn needs_attention(&self) -> Vec<&BranchReport> {
        self.branches
            .iter()
            .filter(|r| !r.outcome.is_pushed())
            .collect()
    }

    /// Whether every branch was pushed
    pub fn is_clean(&self) -> bool {
        self.branches.iter().all(|r| r.outcome.is_pushed())
    }
}
