// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations.
//!
//! ```text
//! query.rs --> GixBackend   --> .git/ (no subprocess)
//!          |     is_git_repo, current_branch, has_commits
//!          \-> ShellBackend --> git status --porcelain
//!                has_uncommitted_changes
//! ```
//!
//! Production reads go through the backend shown for each function above.
//! Both backends implement all of [`GitQuery`]; the other half of each is
//! only used by the backend tests, which compare the two.
//!
//! Pending changes are read with the CLI so the answer matches exactly what
//! `git add --all` is about to stage.

use crate::error::PublishResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend, ShellBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> PublishResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// Check whether HEAD points at a commit.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head lookup fails.
pub fn has_commits(path: &Path) -> PublishResult<bool> {
    GixBackend::has_commits(path)
}

/// Check for uncommitted changes (staged, unstaged, or untracked files).
///
/// # Errors
///
/// Returns a `GitError` if `git status` fails.
pub fn has_uncommitted_changes(path: &Path) -> PublishResult<bool> {
    ShellBackend::has_uncommitted_changes(path)
}
