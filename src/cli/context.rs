//! Shared command context
//!
//! Opens the repository and resolves the layered configuration once, so the
//! sync command starts from a validated state.

use branch_sync::config::{SyncConfig, load_layered, user_config_path};
use branch_sync::error::Result;
use branch_sync::git::{GitBackend, GitCli};
use branch_sync::types::SyncSettings;
use std::path::Path;
use tracing::debug;

/// Shared context for a sync run
///
/// - Opening the git working tree
/// - Loading user and repository config files
/// - Applying command-line overrides and validating the result
pub struct CommandContext {
    /// Git backend rooted at the working tree
    pub git: GitCli,
    /// Resolved settings
    pub settings: SyncSettings,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// `overrides` holds the command-line flags and wins over both files.
    pub async fn new(path: &Path, overrides: SyncConfig) -> Result<Self> {
        let git = GitCli::open(path).await?;

        let user_path = user_config_path();
        let files = load_layered(git.workdir(), user_path.as_deref())?;
        let settings = files.merge(overrides).resolve()?;

        debug!(
            workdir = %git.workdir().display(),
            base = %settings.base,
            remote = %settings.remote,
            exclude = ?settings.exclude,
            exclude_match = %settings.exclude_match,
            strict = settings.strict,
            "resolved settings"
        );

        Ok(Self { git, settings })
    }
}
