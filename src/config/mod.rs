// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repo2gh.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. repo2gh.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. REPO2GH_* env vars
//! 5. --set section.key=value
//! 6. CLI flags (--github-token / GITHUB_TOKEN, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPO2GH_GITHUB__API_URL=http://..  → github.api_url
//! REPO2GH_PUBLISH__PRIVATE=true      → publish.private = true
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GithubConfig, GlobalConfig, PublishConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Hosting API settings.
    pub github: GithubConfig,
    /// Publishing behaviour.
    pub publish: PublishConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repo2gh::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("repo2gh.toml")
    ///     .with_env_prefix("REPO2GH")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Pick the API token: explicit value first, then `github.token`.
    ///
    /// Empty strings count as missing.
    #[must_use]
    pub fn resolve_token<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        let present = |t: &&str| !t.trim().is_empty();
        explicit
            .filter(present)
            .or_else(|| self.github.token.as_deref().filter(present))
    }

    /// Format configuration options for display.
    ///
    /// Secrets are shown as `[hidden]`. Output is sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_github_options(&mut options);
        self.format_publish_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_github_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("github.api_url".into(), self.github.api_url.clone());
        if self.github.token.is_some() {
            options.insert("github.token".into(), "[hidden]".into());
        }
    }

    fn format_publish_options(&self, options: &mut BTreeMap<String, String>) {
        let publish = &self.publish;
        options.insert("publish.private".into(), publish.private.to_string());
        options.insert("publish.remote".into(), publish.remote.clone());
        options.insert(
            "publish.branch".into(),
            publish.branch.clone().unwrap_or_default(),
        );
        options.insert(
            "publish.commit_message".into(),
            publish.commit_message.clone(),
        );
        if let Some(name) = &publish.author_name {
            options.insert("publish.author_name".into(), name.clone());
        }
        if let Some(email) = &publish.author_email {
            options.insert("publish.author_email".into(), email.clone());
        }
        options.insert(
            "publish.delete_on_failure".into(),
            publish.delete_on_failure.to_string(),
        );
    }
}
