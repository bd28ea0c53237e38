// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::config::Config;
use serde_json::json;

fn server(token: Option<&str>) -> ToolServer {
    ToolServer::new(
        ToolRegistry::standard().unwrap(),
        Publisher::new(&Config::default()),
        token.map(str::to_string),
    )
}

#[test]
fn test_standard_registry_is_valid() {
    let registry = ToolRegistry::standard().unwrap();
    let names: Vec<&str> = registry.tools().iter().map(|t| t.name).collect();
    assert_eq!(names, ["create_repo", "check_git", "init_repo"]);
}

#[test]
fn test_registry_rejects_duplicates_and_bad_schemas() {
    let base = ToolRegistry::standard().unwrap();
    let check_git = base.get("check_git").unwrap().clone();

    let mut duplicate = base.clone();
    duplicate.register(check_git.clone());
    let err = duplicate.validate().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'check_git' in section '[tools]': duplicate tool name"
    );

    let mut not_object = ToolRegistry::new();
    not_object.register(Tool {
        name: "odd",
        parameters: json!({"type": "array"}),
        ..check_git.clone()
    });
    assert!(not_object.validate().is_err());

    let mut undeclared = ToolRegistry::new();
    undeclared.register(Tool {
        name: "odd",
        parameters: json!({"type": "object", "properties": {}, "required": ["directory"]}),
        ..check_git
    });
    let err = undeclared.validate().unwrap_err();
    assert!(err.to_string().contains("'directory' is not declared"), "{err}");
}

#[tokio::test]
async fn test_list_tools() {
    let response = server(None)
        .handle_line(r#"{"operation":"list_tools"}"#)
        .await;
    let tools = response["tools"].as_array().unwrap();

    assert_eq!(tools.len(), 3);
    assert_eq!(tools[0]["name"], "create_repo");
    assert_eq!(tools[0]["parameters"]["required"], json!(["directory"]));
    assert!(tools[0].get("handler").is_none());
}

#[tokio::test]
async fn test_protocol_errors() {
    let s = server(None);

    insta::assert_snapshot!(
        s.handle_line("{oops").await.to_string(),
        @r#"{"error":"Invalid JSON"}"#
    );
    insta::assert_snapshot!(
        s.handle_line(r#"{"operation":"delete_everything"}"#).await.to_string(),
        @r#"{"error":"Unknown operation: delete_everything"}"#
    );

    let bad = s
        .handle_line(r#"{"operation":"create_repo","params":{"private":true}}"#)
        .await;
    let message = bad["error"].as_str().unwrap();
    assert!(message.starts_with("invalid params:"), "{message}");
}

#[tokio::test]
async fn test_create_repo_without_token_fails_with_log() {
    let temp = tempfile::tempdir().unwrap();
    let line = json!({
        "operation": "create_repo",
        "params": {"directory": temp.path()},
    })
    .to_string();

    let response = server(None).handle_line(&line).await;

    assert_eq!(response["success"], false);
    assert_eq!(response["stage"], "validate");
    assert!(response["error"].as_str().unwrap().contains("GITHUB_TOKEN"));
    assert!(response["log"].as_array().is_some());
}

#[tokio::test]
async fn test_init_repo_missing_directory() {
    let temp = tempfile::tempdir().unwrap();
    let line = json!({
        "operation": "init_repo",
        "params": {"directory": temp.path().join("nope")},
    })
    .to_string();

    let response = server(None).handle_line(&line).await;

    assert_eq!(response["success"], false);
    assert!(response["error"].as_str().unwrap().contains("path not found"));
}

#[tokio::test]
async fn test_serve_answers_each_line() {
    let input = "{\"operation\":\"list_tools\"}\n\nnot json\n";
    let mut output = Vec::new();

    server(None)
        .serve_until(input.as_bytes(), &mut output, std::future::pending())
        .await
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(r#"{"tools":"#));
    assert_eq!(lines[1], r#"{"error":"Invalid JSON"}"#);
}

#[tokio::test]
async fn test_serve_survives_invalid_utf8() {
    let mut input = b"\xff\xfe\n".to_vec();
    input.extend_from_slice(b"{\"operation\":\"list_tools\"}\n");
    let mut output = Vec::new();

    server(None)
        .serve_until(input.as_slice(), &mut output, std::future::pending())
        .await
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"error":"Invalid JSON"}"#);
    assert!(lines[1].starts_with(r#"{"tools":"#));
}
