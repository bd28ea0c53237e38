// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `publish`, `check-git` and `init` commands.
//!
//! ```text
//! publish   --> Publisher::publish    --> repo URL on stdout
//! check-git --> Publisher::check_git  --> version on stdout
//! init      --> Publisher::prepare    --> summary on stdout
//! ```
//!
//! Progress goes through `tracing` (stderr); only results reach stdout.

use anyhow::{Context, anyhow};
use tracing::info;

use crate::cli::publish::{InitArgs, PublishArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::LogContext;
use crate::publish::{Publisher, UploadRequest, validate_directory};

/// Run the full pipeline for one directory.
///
/// # Errors
///
/// Returns an error naming the failed stage when publishing fails.
pub async fn run_publish_command(
    args: &PublishArgs,
    config: &Config,
    token: Option<&str>,
) -> Result<()> {
    let request = UploadRequest::builder()
        .directory(args.directory.clone())
        .maybe_name(args.name.clone())
        .maybe_private(args.visibility())
        .build();

    let result = Publisher::new(config).publish(&request, token).await;
    if !result.success {
        let stage = result.stage.map_or("publish", |s| s.as_str());
        return Err(anyhow!("{stage} failed: {}", result.message));
    }

    info!("{}", result.message);
    if let Some(url) = &result.url {
        println!("{url}");
    }
    if let Some(clone_url) = &result.clone_url {
        println!("{clone_url}");
    }
    Ok(())
}

/// Print the git version.
///
/// # Errors
///
/// Returns an error if git is not installed.
pub fn run_check_git_command(config: &Config) -> Result<()> {
    let version = Publisher::new(config)
        .check_git()
        .context("git is not installed")?;
    println!("{version}");
    Ok(())
}

/// Initialize a directory and commit its files.
///
/// # Errors
///
/// Returns an error if the directory is invalid or a git command fails.
pub fn run_init_command(args: &InitArgs, config: &Config) -> Result<()> {
    let directory = validate_directory(&args.directory)?;
    let mut log = LogContext::for_operation("init");
    let outcome = Publisher::new(config)
        .prepare(&directory, &mut log)
        .with_context(|| format!("failed to prepare {}", directory.display()))?;
    println!("{}", outcome.summary());
    Ok(())
}
