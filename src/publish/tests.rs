// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::remote::push_branch;
use super::*;
use crate::config::types::PublishConfig;
use crate::error::{GitError, NetworkError};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn test_validate_directory_rejects_missing_and_files() {
    let temp = temp_dir();
    let missing = temp.path().join("missing");
    let file = temp.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    assert!(matches!(
        validate_directory(&missing),
        Err(PublishError::Fs(e)) if matches!(*e, FsError::NotFound(_))
    ));
    assert!(matches!(
        validate_directory(&file),
        Err(PublishError::Fs(e)) if matches!(*e, FsError::NotADirectory(_))
    ));

    let canonical = validate_directory(temp.path()).unwrap();
    assert!(canonical.is_absolute());
}

#[test]
fn test_repository_name_defaults_to_final_segment() {
    let path = Path::new("/home/user/projects/my-tool");
    assert_eq!(repository_name(None, path).unwrap(), "my-tool");
    assert_eq!(repository_name(Some("  "), path).unwrap(), "my-tool");
    assert_eq!(repository_name(Some("renamed"), path).unwrap(), "renamed");
    assert!(repository_name(None, Path::new("/")).is_err());
}

#[test]
fn test_stage_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&Stage::CreateRemote).unwrap(),
        "\"create_remote\""
    );
    assert_eq!(Stage::Prerequisite.to_string(), "prerequisite");
}

#[test]
fn test_remote_stage_mapping() {
    let api: PublishError = NetworkError::Api {
        status: 422,
        url: "http://x/user/repos".to_string(),
        message: "name already exists on this account".to_string(),
    }
    .into();
    assert_eq!(remote_stage(&api), Stage::CreateRemote);

    let git: PublishError = GitError::CommandFailed {
        command: "git push".to_string(),
        message: "rejected".to_string(),
    }
    .into();
    assert_eq!(remote_stage(&git), Stage::Push);
}

#[test]
fn test_stage_error_mentions_cleanup() {
    let mut err = StageError::new(
        Stage::Push,
        GitError::CommandFailed {
            command: "git push --quiet -u origin main".to_string(),
            message: "remote rejected".to_string(),
        },
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"git error: git command failed: git push --quiet -u origin main - remote rejected"
    );

    err.cleanup = Some("me/demo was left behind: forbidden".to_string());
    insta::assert_snapshot!(
        err.to_string(),
        @"git error: git command failed: git push --quiet -u origin main - remote rejected (me/demo was left behind: forbidden)"
    );
}

#[test]
fn test_upload_result_failure_json_omits_urls() {
    let err = StageError::new(Stage::Validate, ConfigError::MissingToken);
    let result = UploadResult::failed(&err, vec!["[publish/validate] error: x".to_string()]);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["stage"], "validate");
    assert!(json.get("url").is_none());
    assert!(json.get("clone_url").is_none());
    assert_eq!(json["log"][0], "[publish/validate] error: x");
}

#[test]
fn test_upload_request_builder_and_json() {
    let request = UploadRequest::builder()
        .directory("/tmp/demo")
        .name("demo")
        .build();
    assert_eq!(request.directory, PathBuf::from("/tmp/demo"));
    assert_eq!(request.name.as_deref(), Some("demo"));
    assert_eq!(request.private, None);

    let parsed: UploadRequest = serde_json::from_str(r#"{"directory":"/tmp/x"}"#).unwrap();
    assert!(parsed.name.is_none());
    assert!(parsed.private.is_none());
}

#[test]
fn test_push_branch_prefers_configuration() {
    let temp = temp_dir();
    let publish = PublishConfig {
        branch: Some("release".to_string()),
        ..PublishConfig::default()
    };
    assert_eq!(push_branch(&publish, temp.path()), "release");

    // not a repository: falls back
    assert_eq!(
        push_branch(&PublishConfig::default(), temp.path()),
        PublishConfig::FALLBACK_BRANCH
    );
}

#[tokio::test]
async fn test_publish_nonexistent_directory_fails_in_validate() {
    let temp = temp_dir();
    let publisher = Publisher::new(&Config::default());
    let request = UploadRequest::builder()
        .directory(temp.path().join("nope"))
        .build();

    let result = publisher.publish(&request, Some("token")).await;

    assert!(!result.success);
    assert_eq!(result.stage, Some(Stage::Validate));
    assert!(result.message.contains("path not found"), "{}", result.message);
    assert!(result.url.is_none());
}

#[tokio::test]
async fn test_publish_without_token_fails_in_validate() {
    let temp = temp_dir();
    let publisher = Publisher::new(&Config::default());
    let request = UploadRequest::builder().directory(temp.path()).build();

    let result = publisher.publish(&request, Some("")).await;

    assert!(!result.success);
    assert_eq!(result.stage, Some(Stage::Validate));
    assert!(result.message.contains("GITHUB_TOKEN"), "{}", result.message);
    // nothing was initialized
    assert!(!temp.path().join(".git").exists());
}
