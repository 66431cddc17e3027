//! Mock git backend for testing
//!
//! Keeps a remote branch listing and a checked-out branch in memory, records
//! every call in order, and fails selected operations on request.

#![allow(dead_code)]

use async_trait::async_trait;
use branch_sync::error::{Error, Result};
use branch_sync::git::GitBackend;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Conflict output in the shape `git merge` prints it
pub const CONFLICT_OUTPUT: &str = "Auto-merging README.md\n\
CONFLICT (content): Merge conflict in README.md\n\
Automatic merge failed; fix conflicts and then commit the result.";

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    ListRemotes,
    Fetch(String),
    ListRemoteBranches(String),
    Checkout(String),
    Merge {
        /// Branch checked out when the merge ran
        into: String,
        rev: String,
        message: String,
    },
    Push {
        remote: String,
        branch: String,
    },
}

/// Simple mock git backend
///
/// Keeps a current-branch pointer that moves on successful checkouts, so a
/// failed checkout leaves the merge running against the previous branch,
/// the same way a real working tree behaves.
///
/// Features:
/// - Call tracking for verification
/// - Per-branch conflict, checkout and push failures
/// - Error injection for fetch and listing
pub struct MockGitBackend {
    workdir: PathBuf,
    remotes: Vec<String>,
    remote_branches: Mutex<Vec<String>>,
    current: Mutex<String>,
    calls: Mutex<Vec<GitCall>>,
    // Failure injection
    conflicting: Mutex<HashSet<String>>,
    checkout_failures: Mutex<HashSet<String>>,
    push_failures: Mutex<HashSet<String>>,
    error_on_fetch: Mutex<Option<String>>,
    error_on_list: Mutex<Option<String>>,
}

impl MockGitBackend {
    /// Create a mock with an `origin` remote holding the given branch names
    /// (without prefix), checked out on `master`
    pub fn with_branches(branches: &[&str]) -> Self {
        Self::with_remote("origin", branches)
    }

    /// Create a mock with a single named remote
    pub fn with_remote(remote: &str, branches: &[&str]) -> Self {
        Self {
            workdir: PathBuf::from("/mock/repo"),
            remotes: vec![remote.to_string()],
            remote_branches: Mutex::new(
                branches.iter().map(|b| format!("{remote}/{b}")).collect(),
            ),
            current: Mutex::new("master".to_string()),
            calls: Mutex::new(Vec::new()),
            conflicting: Mutex::new(HashSet::new()),
            checkout_failures: Mutex::new(HashSet::new()),
            push_failures: Mutex::new(HashSet::new()),
            error_on_fetch: Mutex::new(None),
            error_on_list: Mutex::new(None),
        }
    }

    // === Failure injection methods ===

    /// Make merges into `branch` conflict
    pub fn conflict_on(&self, branch: &str) {
        self.conflicting.lock().unwrap().insert(branch.to_string());
    }

    /// Make `checkout(branch)` fail
    pub fn fail_checkout(&self, branch: &str) {
        self.checkout_failures
            .lock()
            .unwrap()
            .insert(branch.to_string());
    }

    /// Make `push` of `branch` fail
    pub fn fail_push(&self, branch: &str) {
        self.push_failures.lock().unwrap().insert(branch.to_string());
    }

    /// Make `fetch` return an error
    pub fn fail_fetch(&self, msg: &str) {
        *self.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_remote_branches` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Branches passed to `checkout`, in order
    pub fn checkouts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GitCall::Checkout(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    /// Branches passed to `push`, in order
    pub fn pushes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GitCall::Push { branch, .. } => Some(branch),
                _ => None,
            })
            .collect()
    }

    /// Recorded merges as (into, rev, message)
    pub fn merges(&self) -> Vec<(String, String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GitCall::Merge { into, rev, message } => Some((into, rev, message)),
                _ => None,
            })
            .collect()
    }

    /// Currently checked-out branch
    pub fn current_branch(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    /// Number of times `branch` was pushed
    pub fn push_count(&self, branch: &str) -> usize {
        self.pushes().iter().filter(|b| *b == branch).count()
    }

    /// Assert that `branch` was never pushed
    pub fn assert_not_pushed(&self, branch: &str) {
        let pushes = self.pushes();
        assert!(
            !pushes.iter().any(|b| b == branch),
            "Expected {branch} NOT to be pushed but it was: {pushes:?}"
        );
    }

    fn record(&self, call: GitCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn git_error(command: String, stderr: &str) -> Error {
    Error::GitCommand {
        command,
        code: Some(1),
        stderr: stderr.to_string(),
    }
}

#[async_trait]
impl GitBackend for MockGitBackend {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    async fn list_remotes(&self) -> Result<Vec<String>> {
        self.record(GitCall::ListRemotes);
        Ok(self.remotes.clone())
    }

    async fn fetch(&self, remote: &str) -> Result<()> {
        self.record(GitCall::Fetch(remote.to_string()));

        if let Some(msg) = self.error_on_fetch.lock().unwrap().as_ref() {
            return Err(git_error(format!("git fetch {remote}"), msg));
        }
        Ok(())
    }

    async fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        self.record(GitCall::ListRemoteBranches(remote.to_string()));

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(git_error("git for-each-ref".to_string(), msg));
        }

        let prefix = format!("{remote}/");
        Ok(self
            .remote_branches
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.record(GitCall::Checkout(branch.to_string()));

        if self.checkout_failures.lock().unwrap().contains(branch) {
            return Err(git_error(
                format!("git checkout {branch}"),
                &format!("error: pathspec '{branch}' did not match any file(s) known to git"),
            ));
        }

        *self.current.lock().unwrap() = branch.to_string();
        Ok(())
    }

    async fn merge(&self, rev: &str, message: &str) -> Result<()> {
        let into = self.current_branch();
        self.record(GitCall::Merge {
            into: into.clone(),
            rev: rev.to_string(),
            message: message.to_string(),
        });

        if self.conflicting.lock().unwrap().contains(&into) {
            return Err(git_error(format!("git merge {rev}"), CONFLICT_OUTPUT));
        }
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(GitCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });

        if self.push_failures.lock().unwrap().contains(branch) {
            return Err(git_error(
                format!("git push {remote} {branch}"),
                "! [rejected]        feature (fetch first)",
            ));
        }
        Ok(())
    }
}
