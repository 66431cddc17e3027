//! Git backend abstraction
//!
//! The sync runner never touches the repository directly. Every operation
//! goes through [`GitBackend`], so the same runner drives a real `git`
//! subprocess or a recording mock in tests.

mod cli;

pub use cli::{GitCli, parse_remote_refs};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Version-control operations consumed by the sync runner
///
/// Every method maps to one `git` invocation. A non-zero exit surfaces as
/// `Err(Error::GitCommand { .. })`; callers decide whether that is fatal.
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Root of the working tree
    fn workdir(&self) -> &Path;

    /// Names of the configured remotes
    async fn list_remotes(&self) -> Result<Vec<String>>;

    /// Fetch all refs from `remote`
    async fn fetch(&self, remote: &str) -> Result<()>;

    /// Remote-tracking branches of `remote`, as `<remote>/<name>`,
    /// in git's listing order. The symbolic `<remote>/HEAD` is not included.
    async fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>>;

    /// Switch the working tree to `branch`
    async fn checkout(&self, branch: &str) -> Result<()>;

    /// Merge `rev` into the current branch with a fixed commit message
    async fn merge(&self, rev: &str, message: &str) -> Result<()>;

    /// Push `branch` to `remote`
    async fn push(&self, remote: &str, branch: &str) -> Result<()>;
}
