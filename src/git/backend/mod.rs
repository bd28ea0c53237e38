// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//!                     --> ShellBackend (git CLI)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, ProcessError, PublishResult};
use std::path::Path;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> PublishResult<Option<String>>;

    /// Check whether HEAD points at a commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the repository cannot be opened.
    fn has_commits(path: &Path) -> PublishResult<bool>;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_uncommitted_changes(path: &Path) -> PublishResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(path: &Path) -> PublishResult<()>;

    /// Stage every change in the work tree, including deletions.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    fn add_all(repo_path: &Path) -> PublishResult<()>;

    /// Commit the index, optionally with an explicit committer identity.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git commit` fails (e.g. no identity configured).
    fn commit(repo_path: &Path, message: &str, identity: &CommitIdentity<'_>) -> PublishResult<()>;

    /// Add a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote already exists or the URL is rejected.
    fn add_remote(repo_path: &Path, name: &str, url: &str) -> PublishResult<()>;

    /// Remove a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote does not exist.
    fn remove_remote(repo_path: &Path, name: &str) -> PublishResult<()>;

    /// Push a branch and set it as upstream.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected or the remote is unreachable.
    fn push_upstream(repo_path: &Path, remote: &str, branch: &str) -> PublishResult<()>;
}

/// Committer identity passed as `-c user.name=... -c user.email=...`.
///
/// Unset fields fall back to the user's git configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitIdentity<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
}

impl CommitIdentity<'_> {
    fn config_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(name) = self.name {
            args.push("-c".to_string());
            args.push(format!("user.name={name}"));
        }
        if let Some(email) = self.email {
            args.push("-c".to_string());
            args.push(format!("user.email={email}"));
        }
        args
    }
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Read-only; never spawns a subprocess.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn current_branch(path: &Path) -> PublishResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_commits(path: &Path) -> PublishResult<bool> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo.head().map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(!head.is_unborn())
    }

    fn has_uncommitted_changes(path: &Path) -> PublishResult<bool> {
        use gix::status::UntrackedFiles;

        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    ///
    /// Returns trimmed stdout. A non-zero exit becomes `GitError::CommandFailed`
    /// carrying trimmed stderr.
    pub(crate) fn git_command<S: AsRef<str>>(args: &[S], cwd: &Path) -> PublishResult<String> {
        use std::process::Command;

        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let command = format!("git {}", args.join(" "));
        tracing::debug!(cwd = %cwd.display(), %command, "running git");

        let output = Command::new("git")
            .args(&args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| {
                // a missing cwd also reports NotFound
                if source.kind() == std::io::ErrorKind::NotFound && cwd.is_dir() {
                    ProcessError::ExecutableNotFound {
                        name: "git".to_string(),
                    }
                } else {
                    ProcessError::SpawnFailed { command, source }
                }
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Resolve `git` on PATH and return its `--version` line.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if git is not on PATH, or a
    /// `GitError` if `git --version` exits with a non-zero status.
    pub fn version() -> PublishResult<String> {
        let exe = which::which("git").map_err(|_| ProcessError::ExecutableNotFound {
            name: "git".to_string(),
        })?;
        tracing::trace!(path = %exe.display(), "found git");
        let cwd = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
        Self::git_command(&["--version"], &cwd)
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(path: &Path) -> PublishResult<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }

    fn add_all(repo_path: &Path) -> PublishResult<()> {
        Self::git_command(&["add", "--all"], repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str, identity: &CommitIdentity<'_>) -> PublishResult<()> {
        let mut args = identity.config_args();
        args.extend(["commit", "--quiet", "-m", message].map(String::from));
        Self::git_command(args.as_slice(), repo_path)?;
        Ok(())
    }

    fn add_remote(repo_path: &Path, name: &str, url: &str) -> PublishResult<()> {
        Self::git_command(&["remote", "add", name, url], repo_path)?;
        Ok(())
    }

    fn remove_remote(repo_path: &Path, name: &str) -> PublishResult<()> {
        Self::git_command(&["remote", "remove", name], repo_path)?;
        Ok(())
    }

    fn push_upstream(repo_path: &Path, remote: &str, branch: &str) -> PublishResult<()> {
        Self::git_command(&["push", "--quiet", "-u", remote, branch], repo_path)?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path)
            .is_ok_and(|out| out == "true")
    }

    fn current_branch(path: &Path) -> PublishResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn has_commits(path: &Path) -> PublishResult<bool> {
        let output = Self::git_command(&["rev-parse", "--verify", "--quiet", "HEAD"], path);
        Ok(output.is_ok())
    }

    fn has_uncommitted_changes(path: &Path) -> PublishResult<bool> {
        let output = Self::git_command(&["status", "--porcelain"], path)?;
        Ok(!output.is_empty())
    }
}

#[cfg(test)]
mod tests;
