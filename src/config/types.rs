// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for repo2gh.
//!
//! ```text
//! Config: GlobalConfig, GithubConfig, PublishConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Unset means console only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Hosting API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Base URL of the REST API.
    pub api_url: String,
    /// API token. `--github-token` and `GITHUB_TOKEN` take precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

/// Publishing behaviour shared by every front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Create private repositories unless the request says otherwise.
    pub private: bool,
    /// Name of the remote registered for the new repository.
    pub remote: String,
    /// Branch to push. Unset means the current branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Message of the commit created for pending changes.
    pub commit_message: String,
    /// Committer name passed to `git commit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Committer email passed to `git commit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Delete the created remote repository when a later step fails.
    pub delete_on_failure: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            private: false,
            remote: "origin".to_string(),
            branch: None,
            commit_message: "Initial commit".to_string(),
            author_name: None,
            author_email: None,
            delete_on_failure: true,
        }
    }
}

impl PublishConfig {
    /// Branch pushed when neither configuration nor HEAD names one.
    pub const FALLBACK_BRANCH: &'static str = "master";
}
