// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publishing pipeline shared by the CLI and both stdio servers.
//!
//! ```text
//! Publisher::publish(UploadRequest, token)
//!   1. validate      directory exists, is a dir; token present
//!   2. prerequisite  git --version
//!   3. prepare       init if needed, add + commit pending changes
//!   4. create_remote GET /user, POST /user/repos
//!   5. push          remote add origin, push -u origin <branch>
//!                    failure --> DELETE /repos/{owner}/{name}
//!        |
//!        v
//!   UploadResult { success, message, stage?, url?, clone_url?, log }
//! ```
//!
//! Each step is also exposed on its own (`check_git`, `prepare`,
//! `create_and_push`) for the transports that call them directly.
//!
//! # Key Types
//!
//! | Type             | Purpose                                  |
//! |------------------|------------------------------------------|
//! | `Publisher`      | Runs the pipeline against a `Config`     |
//! | `UploadRequest`  | Directory, optional name and visibility  |
//! | `UploadResult`   | Outcome plus the per-call operation log  |
//! | `Stage`          | Pipeline step a failure belongs to       |
//! | `StageError`     | Failure tagged with its `Stage`          |

mod prepare;
mod remote;

#[cfg(test)]
mod tests;

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{Instrument, info_span};

use crate::config::Config;
use crate::error::{ConfigError, FsError, PublishError, PublishResult};
use crate::git;
use crate::github::RemoteRepository;
use crate::logging::LogContext;

pub use prepare::PrepareOutcome;

/// Pipeline step, reported as `stage` when a call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validate,
    Prerequisite,
    Prepare,
    CreateRemote,
    Push,
}

impl Stage {
    /// Stable name used in logs and serialized results.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Prerequisite => "prerequisite",
            Self::Prepare => "prepare",
            Self::CreateRemote => "create_remote",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure tagged with the step it happened in.
///
/// `cleanup` is set when compensating for the failure went wrong too, e.g.
/// the created repository could not be deleted.
#[derive(Debug)]
pub struct StageError {
    pub stage: Stage,
    pub error: PublishError,
    pub cleanup: Option<String>,
}

impl StageError {
    pub fn new(stage: Stage, error: impl Into<PublishError>) -> Self {
        Self {
            stage,
            error: error.into(),
            cleanup: None,
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(cleanup) = &self.cleanup {
            write!(f, " ({cleanup})")?;
        }
        Ok(())
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// What to publish.
#[derive(Debug, Clone, Builder, Deserialize)]
pub struct UploadRequest {
    /// Local directory to publish.
    #[builder(into)]
    pub directory: PathBuf,
    /// Repository name; defaults to the directory's final path segment.
    #[builder(into)]
    #[serde(default)]
    pub name: Option<String>,
    /// Visibility; defaults to `publish.private`.
    #[serde(default)]
    pub private: Option<bool>,
}

/// Outcome of one pipeline call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    #[serde(default)]
    pub log: Vec<String>,
}

impl UploadResult {
    fn published(repo: &RemoteRepository, log: Vec<String>) -> Self {
        Self {
            success: true,
            message: format!("published {} to {}", repo.full_name, repo.html_url),
            stage: None,
            url: Some(repo.html_url.clone()),
            clone_url: Some(repo.clone_url.clone()),
            log,
        }
    }

    fn failed(err: &StageError, log: Vec<String>) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            stage: Some(err.stage),
            url: None,
            clone_url: None,
            log,
        }
    }
}

/// Validate and canonicalize the directory to publish.
///
/// # Errors
///
/// Returns `FsError::NotFound` or `FsError::NotADirectory` for a bad path,
/// `FsError::IoError` if it cannot be canonicalized.
pub fn validate_directory(directory: &Path) -> PublishResult<PathBuf> {
    let shown = directory.display().to_string();
    if !directory.exists() {
        return Err(FsError::NotFound(shown).into());
    }
    if !directory.is_dir() {
        return Err(FsError::NotADirectory(shown).into());
    }
    std::fs::canonicalize(directory).map_err(|source| FsError::IoError { path: shown, source }.into())
}

/// Repository name for `directory`: the explicit name, else the final path
/// segment.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if no usable name remains.
pub fn repository_name(requested: Option<&str>, directory: &Path) -> PublishResult<String> {
    let explicit = requested.map(str::trim).filter(|n| !n.is_empty());
    explicit
        .map(str::to_string)
        .or_else(|| {
            directory
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .ok_or_else(|| {
            ConfigError::InvalidValue {
                section: "request".to_string(),
                key: "name".to_string(),
                message: format!("cannot derive a repository name from '{}'", directory.display()),
            }
            .into()
        })
}

/// Runs the publishing pipeline with one configuration.
#[derive(Debug, Clone)]
pub struct Publisher {
    config: Config,
}

impl Publisher {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Verify `git` is callable; returns its version line.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when git is not on PATH.
    pub fn check_git(&self) -> PublishResult<String> {
        git::cmd::version()
    }

    /// Make `directory` a working tree whose changes are committed.
    ///
    /// Idempotent: a clean working tree is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` carrying stderr if any git command fails.
    pub fn prepare(&self, directory: &Path, log: &mut LogContext) -> PublishResult<PrepareOutcome> {
        prepare::prepare_directory(directory, &self.config.publish, log)
    }

    /// Create the remote repository and push `directory` to it.
    ///
    /// # Errors
    ///
    /// Returns a `StageError` in `create_remote` when the API call fails and
    /// in `push` when registering the remote or pushing fails. The created
    /// repository is deleted in the latter case when
    /// `publish.delete_on_failure` is set.
    pub async fn create_and_push(
        &self,
        token: &str,
        name: &str,
        directory: &Path,
        private: bool,
        log: &mut LogContext,
    ) -> Result<RemoteRepository, StageError> {
        remote::create_and_push(&self.config, token, name, directory, private, log).await
    }

    /// Run the whole pipeline. Never fails: errors become `success: false`.
    ///
    /// `token` wins over `github.token`; empty strings count as missing.
    pub async fn publish(&self, request: &UploadRequest, token: Option<&str>) -> UploadResult {
        let span = info_span!("publish", directory = %request.directory.display());
        async {
            let mut log = LogContext::for_operation("publish");
            match self.run(request, token, &mut log).await {
                Ok(repo) => {
                    log.clear_step();
                    log.record(format!("published {}", repo.html_url));
                    UploadResult::published(&repo, log.into_lines())
                }
                Err(err) => {
                    log.set_step(err.stage.as_str());
                    log.error(err.to_string());
                    UploadResult::failed(&err, log.into_lines())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        request: &UploadRequest,
        token: Option<&str>,
        log: &mut LogContext,
    ) -> Result<RemoteRepository, StageError> {
        log.set_step(Stage::Validate.as_str());
        let directory = validate_directory(&request.directory)
            .map_err(|e| StageError::new(Stage::Validate, e))?;
        let name = repository_name(request.name.as_deref(), &directory)
            .map_err(|e| StageError::new(Stage::Validate, e))?;
        let token = self
            .config
            .resolve_token(token)
            .ok_or_else(|| StageError::new(Stage::Validate, ConfigError::MissingToken))?
            .to_string();
        let private = request.private.unwrap_or(self.config.publish.private);
        log.record(format!(
            "publishing {} as '{name}' ({})",
            directory.display(),
            if private { "private" } else { "public" }
        ));

        log.set_step(Stage::Prerequisite.as_str());
        let version = self
            .check_git()
            .map_err(|e| StageError::new(Stage::Prerequisite, e))?;
        log.record(version);

        let outcome = self
            .prepare(&directory, log)
            .map_err(|e| StageError::new(Stage::Prepare, e))?;
        tracing::debug!(?outcome, "prepared working tree");

        self.create_and_push(&token, &name, &directory, private, log)
            .await
    }
}

/// Stage an API-side failure inside `create_and_push` belongs to.
///
/// Local checks before the first request report `Stage::Prepare` directly.
pub(crate) const fn remote_stage(err: &PublishError) -> Stage {
    match err {
        PublishError::Network(_) | PublishError::Config(_) => Stage::CreateRemote,
        _ => Stage::Push,
    }
}
