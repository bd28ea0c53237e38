// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CommitIdentity, GitMutation, GitQuery, GixBackend, ShellBackend};
use crate::error::{GitError, PublishError};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

const IDENTITY: CommitIdentity<'static> = CommitIdentity {
    name: Some("Test"),
    email: Some("test@example.com"),
};

#[test]
fn test_gix_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!GixBackend::is_git_repo(temp.path()));

    gix::init(temp.path()).expect("failed to init repo");
    assert!(GixBackend::is_git_repo(temp.path()));
}

#[test]
fn test_shell_backend_is_git_repo() {
    let temp = temp_dir();
    assert!(!ShellBackend::is_git_repo(temp.path()));

    ShellBackend::init_repo(temp.path()).expect("failed to init repo");
    assert!(ShellBackend::is_git_repo(temp.path()));
}

#[test]
fn test_backends_agree_on_commits_and_changes() {
    let temp = temp_dir();
    ShellBackend::init_repo(temp.path()).unwrap();

    // Unborn HEAD, empty tree
    assert!(!GixBackend::has_commits(temp.path()).unwrap());
    assert!(!ShellBackend::has_commits(temp.path()).unwrap());
    assert!(!ShellBackend::has_uncommitted_changes(temp.path()).unwrap());

    std::fs::write(temp.path().join("README.md"), "# demo\n").unwrap();
    assert!(ShellBackend::has_uncommitted_changes(temp.path()).unwrap());

    ShellBackend::add_all(temp.path()).unwrap();
    ShellBackend::commit(temp.path(), "Initial commit", &IDENTITY).unwrap();

    assert!(GixBackend::has_commits(temp.path()).unwrap());
    assert!(ShellBackend::has_commits(temp.path()).unwrap());
    assert!(!GixBackend::has_uncommitted_changes(temp.path()).unwrap());
    assert!(!ShellBackend::has_uncommitted_changes(temp.path()).unwrap());

    std::fs::write(temp.path().join("notes.txt"), "later\n").unwrap();
    assert!(GixBackend::has_uncommitted_changes(temp.path()).unwrap());
    assert!(ShellBackend::has_uncommitted_changes(temp.path()).unwrap());
}

#[test]
fn test_current_branch_matches_between_backends() {
    let temp = temp_dir();
    ShellBackend::init_repo(temp.path()).unwrap();
    std::fs::write(temp.path().join("a.txt"), "a").unwrap();
    ShellBackend::add_all(temp.path()).unwrap();
    ShellBackend::commit(temp.path(), "Initial commit", &IDENTITY).unwrap();

    let gix_branch = GixBackend::current_branch(temp.path()).unwrap();
    let shell_branch = ShellBackend::current_branch(temp.path()).unwrap();
    assert!(gix_branch.is_some());
    assert_eq!(gix_branch, shell_branch);
}

#[test]
fn test_add_remote_twice_fails_with_stderr() {
    let temp = temp_dir();
    ShellBackend::init_repo(temp.path()).unwrap();
    ShellBackend::add_remote(temp.path(), "origin", "https://example.com/a.git").unwrap();

    let err = ShellBackend::add_remote(temp.path(), "origin", "https://example.com/b.git")
        .expect_err("second origin must be rejected");
    match err {
        PublishError::Git(boxed) => match *boxed {
            GitError::CommandFailed { command, message } => {
                assert_eq!(command, "git remote add origin https://example.com/b.git");
                assert!(message.contains("already exists"), "stderr was: {message}");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        },
        other => panic!("expected PublishError::Git, got {other:?}"),
    }

    ShellBackend::remove_remote(temp.path(), "origin").unwrap();
    ShellBackend::add_remote(temp.path(), "origin", "https://example.com/b.git").unwrap();
}

#[test]
fn test_commit_identity_args() {
    assert!(CommitIdentity::default().config_args().is_empty());
    assert_eq!(
        IDENTITY.config_args(),
        vec!["-c", "user.name=Test", "-c", "user.email=test@example.com"]
    );
}

#[test]
fn test_git_version_reports_git() {
    let version = ShellBackend::version().expect("git must be installed for tests");
    assert!(version.starts_with("git version"), "got {version}");
}
