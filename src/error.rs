//! Error types for branch-sync

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while syncing branches
#[derive(Debug, Error)]
pub enum Error {
    /// The given path is not inside a git working tree
    #[error("not a git repository: {0}")]
    NotARepository(String),

    /// The configured remote does not exist in the repository
    #[error("remote '{0}' not found")]
    RemoteNotFound(String),

    /// A git invocation exited unsuccessfully
    #[error("`{command}` failed{}: {stderr}", exit_suffix(.code))]
    GitCommand {
        /// Rendered command line, e.g. `git merge origin/master`
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Trimmed stderr output
        stderr: String,
    },

    /// Spawning or talking to a subprocess failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The base branch could not be checked out after the run
    #[error("could not return to '{branch}': {reason}")]
    RestoreFailed {
        /// Branch that was being restored
        branch: String,
        /// Git's reason
        reason: String,
    },

    /// Run completed but some branches were not pushed
    #[error("{0} branch(es) need attention")]
    BranchesNeedAttention(usize),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

#[allow(clippy::ref_option)]
fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (exit {c})")).unwrap_or_default()
}

impl Error {
    /// Short human-readable reason, without the command prefix
    ///
    /// For git failures this is git's own stderr, which is what users need
    /// to see next to a branch name.
    pub fn reason(&self) -> String {
        match self {
            Self::GitCommand { stderr, code, .. } if stderr.is_empty() => {
                code.map_or_else(
                    || "terminated by signal".to_string(),
                    |c| format!("exit code {c}"),
                )
            }
            Self::GitCommand { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}
