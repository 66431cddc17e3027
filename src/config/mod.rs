//! Layered configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! user config file, the repository's `.branch-sync.toml`, and command-line
//! flags. Every layer is a partial [`SyncConfig`]; [`SyncConfig::resolve`]
//! turns the merged result into [`SyncSettings`].

mod storage;

pub use storage::{
    CONFIG_ENV_VAR, REPO_CONFIG_FILE, load_config_file, load_layered, repo_config_path,
    user_config_path,
};

use crate::error::{Error, Result};
use crate::types::{ExcludeMatch, SyncSettings};
use serde::Deserialize;

/// One configuration layer; unset fields fall through to lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Base branch merged into every target
    pub base: Option<String>,
    /// Remote to fetch from and push to
    pub remote: Option<String>,
    /// Names excluded from the target set
    pub exclude: Option<Vec<String>>,
    /// Match exclusions by exact name instead of substring
    pub exact_exclude: Option<bool>,
    /// Make fetch/list/checkout/restore failures explicit
    pub strict: Option<bool>,
    /// Fail the run if any branch was left unpushed
    pub fail_on_conflict: Option<bool>,
}

impl SyncConfig {
    /// Layer `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            base: other.base.or(self.base),
            remote: other.remote.or(self.remote),
            exclude: other.exclude.or(self.exclude),
            exact_exclude: other.exact_exclude.or(self.exact_exclude),
            strict: other.strict.or(self.strict),
            fail_on_conflict: other.fail_on_conflict.or(self.fail_on_conflict),
        }
    }

    /// Fill unset fields from defaults and validate
    pub fn resolve(self) -> Result<SyncSettings> {
        let defaults = SyncSettings::default();

        let base = non_empty("base", self.base.unwrap_or(defaults.base))?;
        let remote = non_empty("remote", self.remote.unwrap_or(defaults.remote))?;
        let exclude = self
            .exclude
            .unwrap_or(defaults.exclude)
            .into_iter()
            .map(|name| non_empty("exclude", name))
            .collect::<Result<Vec<_>>>()?;

        let exclude_match = if self.exact_exclude.unwrap_or(false) {
            ExcludeMatch::Exact
        } else {
            ExcludeMatch::Substring
        };

        Ok(SyncSettings {
            base,
            remote,
            exclude,
            exclude_match,
            strict: self.strict.unwrap_or(defaults.strict),
            fail_on_conflict: self.fail_on_conflict.unwrap_or(defaults.fail_on_conflict),
        })
    }
}

fn non_empty(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Config(format!("'{field}' must not be empty")));
    }
    Ok(trimmed.to_string())
}
