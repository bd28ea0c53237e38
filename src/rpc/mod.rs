// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON-RPC 2.0 line protocol over stdin/stdout.
//!
//! ```text
//! stdout <-- {"jsonrpc":"2.0","id":"init","result":{"success":true,...}}
//! stdin  --> {"jsonrpc":"2.0","id":1,"method":"check_git","params":{}}
//! stdout <-- {"jsonrpc":"2.0","id":1,"result":{...}} | {"error":{code,message}}
//! ```
//!
//! | Method        | Params                                      | Failure code |
//! |---------------|---------------------------------------------|--------------|
//! | `check_git`   | -                                           | -32000       |
//! | `init_repo`   | `directory`                                 | -32001       |
//! | `create_repo` | `token`, `directory`, `repo_name`, `private?` | -32002     |
//! | `publish`     | `directory`, `name?`, `private?`, `token?`  | per stage    |
//!
//! Envelope problems: -32700 parse error (id null), -32600 invalid request,
//! -32601 unknown method, -32602 invalid params or directory.

pub mod protocol;

#[cfg(test)]
mod tests;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{Instrument, info_span};

use crate::error::{ProcessError, PublishError, Result};
use crate::logging::LogContext;
use crate::publish::{Publisher, Stage, UploadRequest, validate_directory};
use crate::stdio::{self, LineService};

use protocol::{
    GIT_FAILED, GIT_MISSING, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR, REMOTE_FAILED, RpcError, RpcRequest, RpcResponse, VERSION,
};

type CallResult = std::result::Result<Value, RpcError>;

#[derive(Debug, Deserialize)]
struct DirectoryParams {
    directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CreateRepoParams {
    token: Option<String>,
    directory: Option<PathBuf>,
    repo_name: Option<String>,
    private: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PublishParams {
    #[serde(flatten)]
    request: UploadRequest,
    token: Option<String>,
}

/// Error code for a failure in `stage`.
#[must_use]
pub const fn stage_code(stage: Stage) -> i64 {
    match stage {
        Stage::Validate => INVALID_PARAMS,
        Stage::Prerequisite => GIT_MISSING,
        Stage::Prepare => GIT_FAILED,
        Stage::CreateRemote | Stage::Push => REMOTE_FAILED,
    }
}

fn git_code(err: &PublishError) -> i64 {
    match err {
        PublishError::Process(e) if matches!(**e, ProcessError::ExecutableNotFound { .. }) => {
            GIT_MISSING
        }
        _ => GIT_FAILED,
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> std::result::Result<T, RpcError> {
    let params = if params.is_null() {
        Value::Object(Map::new())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))
}

fn existing_directory(directory: &std::path::Path) -> std::result::Result<PathBuf, RpcError> {
    validate_directory(directory).map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))
}

fn encode(response: &RpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        json!({
            "jsonrpc": VERSION,
            "id": Value::Null,
            "error": {"code": INTERNAL_ERROR, "message": format!("Internal error: {e}")},
        })
        .to_string()
    })
}

/// Dispatches JSON-RPC requests to a [`Publisher`].
#[derive(Debug, Clone)]
pub struct RpcServer {
    publisher: Publisher,
}

impl RpcServer {
    #[must_use]
    pub const fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }

    /// Announcement written before the first request.
    #[must_use]
    pub fn ready_response() -> RpcResponse {
        RpcResponse::success(
            Value::String("init".to_string()),
            json!({
                "success": true,
                "message": format!("repo2gh {} ready", env!("CARGO_PKG_VERSION")),
            }),
        )
    }

    fn parse_error() -> RpcResponse {
        RpcResponse::failure(
            Value::Null,
            RpcError::new(PARSE_ERROR, "Parse error: invalid JSON"),
        )
    }

    /// Answer one request line.
    pub async fn handle_line(&self, line: &str) -> RpcResponse {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "unparsable request");
                return Self::parse_error();
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: RpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return RpcResponse::failure(
                    id,
                    RpcError::new(INVALID_REQUEST, format!("Invalid Request: {e}")),
                );
            }
        };
        self.handle(request).await
    }

    /// Validate the envelope and run the method.
    pub async fn handle(&self, request: RpcRequest) -> RpcResponse {
        let RpcRequest {
            jsonrpc,
            id,
            method,
            params,
        } = request;

        if jsonrpc.as_deref() != Some(VERSION) {
            return RpcResponse::failure(
                id,
                RpcError::new(INVALID_REQUEST, "Invalid Request: not JSON-RPC 2.0"),
            );
        }
        let Some(method) = method.filter(|m| !m.is_empty()) else {
            return RpcResponse::failure(
                id,
                RpcError::new(INVALID_REQUEST, "Invalid Request: method not specified"),
            );
        };

        let span = info_span!("rpc", %method, %id);
        let outcome = async {
            match method.as_str() {
                "check_git" => self.check_git(),
                "init_repo" => self.init_repo(params),
                "create_repo" => self.create_repo(params).await,
                "publish" => self.publish(params).await,
                other => Err(RpcError::new(
                    METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                )),
            }
        }
        .instrument(span)
        .await;

        match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::failure(id, error),
        }
    }

    fn check_git(&self) -> CallResult {
        match self.publisher.check_git() {
            Ok(version) => Ok(json!({"success": true, "message": version})),
            Err(e) => Err(RpcError::new(
                GIT_MISSING,
                format!("git is not installed: {e}"),
            )),
        }
    }

    fn init_repo(&self, params: Value) -> CallResult {
        let params: DirectoryParams = parse_params(params)?;
        let directory = params
            .directory
            .ok_or_else(|| RpcError::new(INVALID_PARAMS, "missing parameter: directory"))?;
        let directory = existing_directory(&directory)?;

        let mut log = LogContext::for_operation("init_repo");
        match self.publisher.prepare(&directory, &mut log) {
            Ok(outcome) => Ok(json!({
                "success": true,
                "message": outcome.summary(),
                "initialized": outcome.initialized,
                "committed": outcome.committed,
                "log": log.into_lines(),
            })),
            Err(e) => {
                log.error(e.to_string());
                Err(
                    RpcError::new(git_code(&e), format!("git operation failed: {e}"))
                        .with_data(json!({"log": log.into_lines()})),
                )
            }
        }
    }

    async fn create_repo(&self, params: Value) -> CallResult {
        let params: CreateRepoParams = parse_params(params)?;
        let token = params.token.filter(|t| !t.trim().is_empty());
        let repo_name = params.repo_name.filter(|n| !n.trim().is_empty());

        let missing: Vec<&str> = [
            ("token", token.is_none()),
            ("directory", params.directory.is_none()),
            ("repo_name", repo_name.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(token), Some(directory), Some(repo_name)) = (token, params.directory, repo_name)
        else {
            return Err(RpcError::new(
                INVALID_PARAMS,
                format!("missing parameters: {}", missing.join(", ")),
            ));
        };
        let directory = existing_directory(&directory)?;
        let private = params
            .private
            .unwrap_or(self.publisher.config().publish.private);

        let mut log = LogContext::for_operation("create_repo");
        match self
            .publisher
            .create_and_push(&token, &repo_name, &directory, private, &mut log)
            .await
        {
            Ok(repo) => Ok(json!({
                "success": true,
                "message": format!("created {}", repo.full_name),
                "url": repo.html_url,
                "clone_url": repo.clone_url,
                "log": log.into_lines(),
            })),
            Err(e) => {
                log.error(e.to_string());
                Err(RpcError::new(stage_code(e.stage), e.to_string())
                    .with_data(json!({"stage": e.stage, "log": log.into_lines()})))
            }
        }
    }

    async fn publish(&self, params: Value) -> CallResult {
        let params: PublishParams = parse_params(params)?;
        let result = self
            .publisher
            .publish(&params.request, params.token.as_deref())
            .await;

        if result.success {
            return serde_json::to_value(&result)
                .map_err(|e| RpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")));
        }
        let code = result.stage.map_or(INTERNAL_ERROR, stage_code);
        Err(RpcError::new(code, result.message)
            .with_data(json!({"stage": result.stage, "log": result.log})))
    }

    /// Serve stdin/stdout until EOF or Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or stdout cannot be written.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.serve_until(reader, writer, stdio::ctrl_c()).await
    }

    /// Serve until EOF or until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub async fn serve_until<R, W, F>(&self, reader: R, writer: W, shutdown: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: std::future::Future<Output = ()>,
    {
        stdio::serve_lines(self, reader, writer, shutdown).await
    }
}

impl LineService for RpcServer {
    fn greeting(&self) -> Option<String> {
        Some(encode(&Self::ready_response()))
    }

    async fn respond(&self, line: &str) -> String {
        encode(&self.handle_line(line).await)
    }

    fn malformed(&self) -> String {
        encode(&Self::parse_error())
    }
}
