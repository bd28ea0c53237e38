// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (PATH)
//! ```

use crate::error::PublishResult;
use std::path::Path;

use super::backend::{CommitIdentity, GitMutation, ShellBackend};

/// Return the `git --version` line.
///
/// # Errors
///
/// Returns a `ProcessError::ExecutableNotFound` if git is not on PATH, or a
/// `GitError` if it exits with a non-zero status.
pub fn version() -> PublishResult<String> {
    ShellBackend::version()
}

/// Initialize a new repository.
///
/// # Errors
///
/// Returns a `GitError` if repository initialization fails.
pub fn init_repo(path: &Path) -> PublishResult<()> {
    ShellBackend::init_repo(path)
}

/// Stage all changes.
///
/// # Errors
///
/// Returns a `GitError` if `git add --all` fails.
pub fn add_all(repo_path: &Path) -> PublishResult<()> {
    ShellBackend::add_all(repo_path)
}

/// Commit the index.
///
/// # Errors
///
/// Returns a `GitError` if `git commit` fails.
pub fn commit(repo_path: &Path, message: &str, identity: &CommitIdentity<'_>) -> PublishResult<()> {
    ShellBackend::commit(repo_path, message, identity)
}

/// Add a remote.
///
/// # Errors
///
/// Returns a `GitError` if the remote cannot be added (e.g. it already exists).
pub fn add_remote(repo_path: &Path, name: &str, url: &str) -> PublishResult<()> {
    ShellBackend::add_remote(repo_path, name, url)
}

/// Remove a remote.
///
/// # Errors
///
/// Returns a `GitError` if the remote cannot be removed.
pub fn remove_remote(repo_path: &Path, name: &str) -> PublishResult<()> {
    ShellBackend::remove_remote(repo_path, name)
}

/// Push `branch` to `remote` with upstream tracking.
///
/// # Errors
///
/// Returns a `GitError` if the push fails.
pub fn push_upstream(repo_path: &Path, remote: &str, branch: &str) -> PublishResult<()> {
    ShellBackend::push_upstream(repo_path, remote, branch)
}
