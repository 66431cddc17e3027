//! Config file locations and loading.

use super::SyncConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-repository config file, at the working tree root.
pub const REPO_CONFIG_FILE: &str = ".branch-sync.toml";

/// Environment variable overriding the user config file path.
pub const CONFIG_ENV_VAR: &str = "BRANCH_SYNC_CONFIG";

/// Directory name for branch-sync within the user config dir.
const APP_DIR: &str = "branch-sync";

/// Filename for the user config.
const USER_CONFIG_FILE: &str = "config.toml";

/// Get path to the user config file.
///
/// `$BRANCH_SYNC_CONFIG` wins over `<config_dir>/branch-sync/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(USER_CONFIG_FILE))
}

/// Get path to the repository config file.
pub fn repo_config_path(workdir: &Path) -> PathBuf {
    workdir.join(REPO_CONFIG_FILE)
}

/// Load one config file.
///
/// Returns an empty `SyncConfig` if the file doesn't exist.
pub fn load_config_file(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        return Ok(SyncConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load the user and repository layers, repository on top.
pub fn load_layered(workdir: &Path, user_path: Option<&Path>) -> Result<SyncConfig> {
    let user = match user_path {
        Some(path) => load_config_file(path)?,
        None => SyncConfig::default(),
    };
    let repo = load_config_file(&repo_config_path(workdir))?;
    Ok(user.merge(repo))
}
