//! Throwaway git repositories: a bare remote plus a working clone

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Check that a `git` executable is on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Bare `remote.git` plus a `work` clone whose `origin` points at it
///
/// `master` holds one commit with `README.md`. Git runs with `HOME` and
/// `XDG_CONFIG_HOME` inside the temp dir so the user's config never leaks in.
pub struct TempGitRepo {
    dir: TempDir,
    pub remote: PathBuf,
    pub work: PathBuf,
    pub home: PathBuf,
}

impl TempGitRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let remote = dir.path().join("remote.git");
        let work = dir.path().join("work");
        let home = dir.path().join("home");
        fs::create_dir_all(&home).expect("create home");

        let repo = Self {
            dir,
            remote,
            work,
            home,
        };

        repo.git_in(repo.dir.path(), &["init", "--bare", "remote.git"]);
        repo.git_in(&repo.remote, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        repo.git_in(repo.dir.path(), &["clone", "remote.git", "work"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);

        repo.commit_file("README.md", "line one\n", "Initial commit");
        repo.git(&["push", "-u", "origin", "master"]);
        repo
    }

    /// Environment every git (and branch-sync) process in the fixture runs with
    pub fn envs(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("HOME", self.home.clone()),
            ("XDG_CONFIG_HOME", self.home.clone()),
            ("GIT_CONFIG_NOSYSTEM", PathBuf::from("1")),
            ("BRANCH_SYNC_CONFIG", self.home.join("branch-sync.toml")),
        ]
    }

    /// Run git in `dir`, panicking on failure; returns trimmed stdout
    pub fn git_in(&self, dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .envs(self.envs())
            .env("LC_ALL", "C")
            .output()
            .expect("spawn git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run git in the working clone
    pub fn git(&self, args: &[&str]) -> String {
        self.git_in(&self.work, args)
    }

    /// Run git against the bare remote
    pub fn remote_git(&self, args: &[&str]) -> String {
        self.git_in(&self.remote, args)
    }

    /// Write `file` and commit it on the current branch
    pub fn commit_file(&self, file: &str, content: &str, message: &str) {
        fs::write(self.work.join(file), content).expect("write file");
        self.git(&["add", file]);
        self.git(&["commit", "-m", message]);
    }

    /// Create `branch` from master with one commit, push it, return to master
    pub fn push_branch(&self, branch: &str, file: &str, content: &str) {
        self.git(&["checkout", "-b", branch, "master"]);
        self.commit_file(file, content, &format!("Change on {branch}"));
        self.git(&["push", "-u", "origin", branch]);
        self.git(&["checkout", "master"]);
    }

    /// Commit on master and push it
    pub fn advance_master(&self, file: &str, content: &str) {
        self.git(&["checkout", "master"]);
        self.commit_file(file, content, "Advance master");
        self.git(&["push", "origin", "master"]);
    }

    /// Subject of the tip commit of `branch` on the remote
    pub fn remote_tip_subject(&self, branch: &str) -> String {
        self.remote_git(&["log", "-1", "--format=%s", branch])
    }

    /// Branch checked out in the working clone
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }
}
