// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `rpc` and `serve` commands: stdio servers.

use tokio::io::{BufReader, stdin, stdout};

use crate::config::Config;
use crate::error::Result;
use crate::publish::Publisher;
use crate::rpc::RpcServer;
use crate::tools::{ToolRegistry, ToolServer};

/// Serve JSON-RPC requests until EOF or Ctrl-C.
///
/// # Errors
///
/// Returns an error if stdin or stdout fail.
pub async fn run_rpc_command(config: &Config) -> Result<()> {
    let server = RpcServer::new(Publisher::new(config));
    server.serve(BufReader::new(stdin()), stdout()).await
}

/// Serve the registered tools until EOF or Ctrl-C.
///
/// # Errors
///
/// Returns an error if the tool registry is invalid or stdin/stdout fail.
pub async fn run_serve_command(config: &Config, token: Option<&str>) -> Result<()> {
    let registry = ToolRegistry::standard()?;
    let server = ToolServer::new(registry, Publisher::new(config), token.map(str::to_string));
    server.serve(BufReader::new(stdin()), stdout()).await
}
