//! `git` subprocess backend

use crate::error::{Error, Result};
use crate::git::GitBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Git backend that shells out to the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Open the working tree containing `path`
    ///
    /// Resolves the top-level directory with `git rev-parse`, so any path
    /// inside the repository works.
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::NotARepository(path.display().to_string()));
        }

        let output = run_git(path, &["rev-parse", "--show-toplevel"]).await?;
        if !output.status.success() {
            return Err(Error::NotARepository(path.display().to_string()));
        }

        let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            workdir: PathBuf::from(toplevel),
        })
    }

    async fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = run_git(&self.workdir, args).await?;

        if !output.status.success() {
            return Err(Error::GitCommand {
                command: format!("git {}", args.join(" ")),
                code: output.status.code(),
                stderr: failure_text(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

async fn run_git(dir: &Path, args: &[&str]) -> Result<Output> {
    debug!(dir = %dir.display(), "git {}", args.join(" "));

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        // Keep git's messages parseable and in English
        .env("LC_ALL", "C")
        .output()
        .await?;

    debug!(status = ?output.status.code(), "git {} finished", args[0]);
    Ok(output)
}

/// Failure text for a finished command: stderr, falling back to stdout
/// (`git merge` reports conflicts on stdout)
fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    }
}

/// Parse `git for-each-ref --format='%(refname:lstrip=2)%09%(symref)'` output
///
/// Symbolic refs (`origin/HEAD`) are dropped; everything else is kept in
/// listing order.
pub fn parse_remote_refs(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let (name, symref) = line.split_once('\t').unwrap_or((line, ""));
            let name = name.trim();
            (!name.is_empty() && symref.trim().is_empty()).then(|| name.to_string())
        })
        .collect()
}

#[async_trait]
impl GitBackend for GitCli {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    async fn list_remotes(&self) -> Result<Vec<String>> {
        let stdout = self.run_checked(&["remote"]).await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    async fn fetch(&self, remote: &str) -> Result<()> {
        self.run_checked(&["fetch", remote]).await?;
        Ok(())
    }

    async fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        let pattern = format!("refs/remotes/{remote}/");
        let stdout = self
            .run_checked(&[
                "for-each-ref",
                "--format=%(refname:lstrip=2)%09%(symref)",
                &pattern,
            ])
            .await?;
        Ok(parse_remote_refs(&stdout))
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.run_checked(&["checkout", branch]).await?;
        Ok(())
    }

    async fn merge(&self, rev: &str, message: &str) -> Result<()> {
        self.run_checked(&["merge", "--no-edit", "-m", message, rev])
            .await?;
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_checked(&["push", remote, branch]).await?;
        Ok(())
    }
}
