// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::protocol::*;
use super::*;
use crate::config::Config;
use serde_json::json;

fn server() -> RpcServer {
    RpcServer::new(Publisher::new(&Config::default()))
}

async fn call(line: &str) -> RpcResponse {
    server().handle_line(line).await
}

#[tokio::test]
async fn test_check_git_keeps_id() {
    let response = call(r#"{"jsonrpc":"2.0","id":1,"method":"check_git","params":{}}"#).await;

    assert_eq!(response.jsonrpc, "2.0");
    assert_eq!(response.id, json!(1));
    match (&response.result, &response.error) {
        (Some(result), None) => {
            assert_eq!(result["success"], true);
            assert!(result["message"].as_str().unwrap().starts_with("git version"));
        }
        (None, Some(error)) => assert_eq!(error.code, GIT_MISSING),
        other => panic!("expected exactly one of result/error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error_with_null_id() {
    let response = call("{not json").await;

    assert_eq!(response.id, Value::Null);
    let error = response.error.unwrap();
    assert_eq!(error.code, PARSE_ERROR);
    insta::assert_snapshot!(error.message, @"Parse error: invalid JSON");
}

#[tokio::test]
async fn test_unknown_method() {
    let response = call(r#"{"jsonrpc":"2.0","id":"a","method":"frobnicate"}"#).await;

    assert_eq!(response.id, json!("a"));
    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    insta::assert_snapshot!(error.message, @"Method not found: frobnicate");
}

#[tokio::test]
async fn test_envelope_validation() {
    let wrong_version = call(r#"{"jsonrpc":"1.0","id":2,"method":"check_git"}"#).await;
    assert_eq!(wrong_version.id, json!(2));
    assert_eq!(wrong_version.error.unwrap().code, INVALID_REQUEST);

    let no_method = call(r#"{"jsonrpc":"2.0","id":3}"#).await;
    assert_eq!(no_method.id, json!(3));
    assert_eq!(no_method.error.unwrap().code, INVALID_REQUEST);

    let not_object = call("[1,2,3]").await;
    assert_eq!(not_object.id, Value::Null);
    assert_eq!(not_object.error.unwrap().code, INVALID_REQUEST);
}

#[tokio::test]
async fn test_missing_params() {
    let init = call(r#"{"jsonrpc":"2.0","id":4,"method":"init_repo"}"#).await;
    let error = init.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    insta::assert_snapshot!(error.message, @"missing parameter: directory");

    let create = call(
        r#"{"jsonrpc":"2.0","id":5,"method":"create_repo","params":{"directory":"/tmp","token":""}}"#,
    )
    .await;
    let error = create.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    insta::assert_snapshot!(error.message, @"missing parameters: token, repo_name");

    let publish = call(r#"{"jsonrpc":"2.0","id":6,"method":"publish","params":{}}"#).await;
    assert_eq!(publish.error.unwrap().code, INVALID_PARAMS);
}

#[tokio::test]
async fn test_nonexistent_directory_is_invalid_params() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("missing");
    let line = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "create_repo",
        "params": {"token": "t", "directory": missing, "repo_name": "demo"},
    })
    .to_string();

    let error = call(&line).await.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    assert!(error.message.contains("path not found"), "{}", error.message);
}

#[tokio::test]
async fn test_publish_failure_carries_stage_and_log() {
    let temp = tempfile::tempdir().unwrap();
    let line = json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "publish",
        "params": {"directory": temp.path(), "token": ""},
    })
    .to_string();

    let error = call(&line).await.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    let data = error.data.unwrap();
    assert_eq!(data["stage"], "validate");
    assert!(!data["log"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_init_repo_commits_files() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("README.md"), "# demo\n").unwrap();

    let mut config = Config::default();
    config.publish.author_name = Some("Test".to_string());
    config.publish.author_email = Some("test@example.com".to_string());
    let server = RpcServer::new(Publisher::new(&config));

    let line = json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "init_repo",
        "params": {"directory": temp.path()},
    })
    .to_string();
    let result = server.handle_line(&line).await.result.unwrap();

    assert_eq!(result["success"], true);
    assert_eq!(result["initialized"], true);
    assert_eq!(result["committed"], true);
    assert!(temp.path().join(".git").is_dir());
}

#[tokio::test]
async fn test_serve_writes_greeting_and_skips_blank_lines() {
    let input = concat!(
        "\n",
        r#"{"jsonrpc":"2.0","id":1,"method":"nope"}"#,
        "\n   \n",
        "garbage\n",
    );
    let mut output = Vec::new();

    server()
        .serve_until(input.as_bytes(), &mut output, std::future::pending())
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], "init");
    assert_eq!(lines[0]["result"]["success"], true);
    assert_eq!(lines[1]["error"]["code"], METHOD_NOT_FOUND);
    assert_eq!(lines[2]["error"]["code"], PARSE_ERROR);
    assert_eq!(lines[2]["id"], Value::Null);
}

#[tokio::test]
async fn test_serve_stops_on_shutdown() {
    let (client, server_side) = tokio::io::duplex(64);
    let (reader, _keep_open) = tokio::io::split(server_side);
    let mut output = Vec::new();

    server()
        .serve_until(tokio::io::BufReader::new(reader), &mut output, async {})
        .await
        .unwrap();

    drop(client);
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 1, "only the greeting: {text}");
}

#[tokio::test]
async fn test_serve_survives_invalid_utf8() {
    let mut input = b"\xff\xfe\n".to_vec();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"nope"}"#);
    input.push(b'\n');
    let mut output = Vec::new();

    server()
        .serve_until(input.as_slice(), &mut output, std::future::pending())
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["id"], Value::Null);
    assert_eq!(lines[1]["error"]["code"], PARSE_ERROR);
    assert_eq!(lines[2]["id"], 2);
    assert_eq!(lines[2]["error"]["code"], METHOD_NOT_FOUND);
}
