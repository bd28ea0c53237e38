// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registered-tool server over stdin/stdout.
//!
//! ```text
//! stdin  --> {"operation":"list_tools"}
//! stdout <-- {"tools":[{name,description,parameters}, ...]}
//! stdin  --> {"operation":"create_repo","params":{"directory":"..."}}
//! stdout <-- {"success":true,"repo_url":..,"clone_url":..,"log":[..]}
//!          | {"success":false,"error":..,"log":[..]}
//! ```
//!
//! Protocol errors: `{"error":"Invalid JSON"}`,
//! `{"error":"Unknown operation: <op>"}`, `{"error":"invalid params: ..."}`.

pub mod registry;

#[cfg(test)]
mod tests;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{Instrument, info_span};

use crate::error::Result;
use crate::logging::LogContext;
use crate::publish::{Publisher, UploadRequest, validate_directory};
use crate::stdio::{self, LineService};

pub use registry::{Tool, ToolHandler, ToolRegistry};

/// Pseudo-operation listing the registry.
pub const LIST_TOOLS: &str = "list_tools";

const INVALID_JSON: &str = "Invalid JSON";

#[derive(Debug, Deserialize)]
struct ToolRequest {
    operation: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct InitRepoParams {
    directory: PathBuf,
}

fn protocol_error(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

fn parse_params<T: DeserializeOwned>(params: Value) -> std::result::Result<T, Value> {
    let params = if params.is_null() {
        Value::Object(Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| protocol_error(format!("invalid params: {e}")))
}

fn failure(error: impl Into<String>, log: Vec<String>) -> Value {
    json!({ "success": false, "error": error.into(), "log": log })
}

/// Serves the tools of a [`ToolRegistry`] backed by a [`Publisher`].
#[derive(Debug, Clone)]
pub struct ToolServer {
    registry: ToolRegistry,
    publisher: Publisher,
    token: Option<String>,
}

impl ToolServer {
    /// `token` comes from `--github-token` / `GITHUB_TOKEN`; the publisher
    /// falls back to `github.token`.
    #[must_use]
    pub const fn new(registry: ToolRegistry, publisher: Publisher, token: Option<String>) -> Self {
        Self {
            registry,
            publisher,
            token,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer one request line.
    pub async fn handle_line(&self, line: &str) -> Value {
        let Ok(value) = serde_json::from_str::<Value>(line) else {
            return protocol_error(INVALID_JSON);
        };
        let request: ToolRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => return protocol_error(format!("invalid request: {e}")),
        };

        if request.operation == LIST_TOOLS {
            return self.registry.list();
        }
        let Some(tool) = self.registry.get(&request.operation) else {
            return protocol_error(format!("Unknown operation: {}", request.operation));
        };

        let span = info_span!("tool", name = tool.name);
        self.call(tool.handler, request.params).instrument(span).await
    }

    async fn call(&self, handler: ToolHandler, params: Value) -> Value {
        match handler {
            ToolHandler::CreateRepo => match parse_params::<UploadRequest>(params) {
                Ok(request) => self.create_repo(&request).await,
                Err(e) => e,
            },
            ToolHandler::CheckGit => self.check_git(),
            ToolHandler::InitRepo => match parse_params::<InitRepoParams>(params) {
                Ok(params) => self.init_repo(&params),
                Err(e) => e,
            },
        }
    }

    async fn create_repo(&self, request: &UploadRequest) -> Value {
        let result = self.publisher.publish(request, self.token.as_deref()).await;
        if result.success {
            json!({
                "success": true,
                "repo_url": result.url,
                "clone_url": result.clone_url,
                "log": result.log,
            })
        } else {
            json!({
                "success": false,
                "error": result.message,
                "stage": result.stage,
                "log": result.log,
            })
        }
    }

    fn check_git(&self) -> Value {
        let mut log = LogContext::for_operation("check_git");
        match self.publisher.check_git() {
            Ok(version) => {
                log.record(&version);
                json!({ "success": true, "version": version, "log": log.into_lines() })
            }
            Err(e) => {
                log.error(e.to_string());
                failure(e.to_string(), log.into_lines())
            }
        }
    }

    fn init_repo(&self, params: &InitRepoParams) -> Value {
        let mut log = LogContext::for_operation("init_repo");
        let directory = match validate_directory(&params.directory) {
            Ok(directory) => directory,
            Err(e) => {
                log.error(e.to_string());
                return failure(e.to_string(), log.into_lines());
            }
        };
        match self.publisher.prepare(&directory, &mut log) {
            Ok(outcome) => json!({
                "success": true,
                "message": outcome.summary(),
                "initialized": outcome.initialized,
                "committed": outcome.committed,
                "log": log.into_lines(),
            }),
            Err(e) => {
                log.error(e.to_string());
                failure(e.to_string(), log.into_lines())
            }
        }
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
        tracing::info!(tools = self.registry.tools().len(), "tool server ready");
        stdio::serve_lines(self, reader, writer, shutdown).await
    }
}

impl LineService for ToolServer {
    async fn respond(&self, line: &str) -> String {
        self.handle_line(line).await.to_string()
    }

    fn malformed(&self) -> String {
        protocol_error(INVALID_JSON).to_string()
    }
}
