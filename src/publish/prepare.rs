// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local repository preparation.
//!
//! ```text
//! is work tree? --no--> git init
//!      |
//! status --porcelain empty? --no--> git add --all; git commit -m <msg>
//! ```

use serde::Serialize;
use std::path::Path;

use crate::config::types::PublishConfig;
use crate::error::PublishResult;
use crate::git::{CommitIdentity, cmd, query};
use crate::logging::LogContext;

/// What `prepare` changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepareOutcome {
    /// A repository was created with `git init`.
    pub initialized: bool,
    /// Pending changes were committed.
    pub committed: bool,
}

impl PrepareOutcome {
    /// Human readable summary.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        match (self.initialized, self.committed) {
            (true, true) => "initialized repository and committed files",
            (true, false) => "initialized empty repository",
            (false, true) => "committed pending changes",
            (false, false) => "repository already up to date",
        }
    }
}

fn identity(publish: &PublishConfig) -> CommitIdentity<'_> {
    CommitIdentity {
        name: publish.author_name.as_deref(),
        email: publish.author_email.as_deref(),
    }
}

pub(super) fn prepare_directory(
    directory: &Path,
    publish: &PublishConfig,
    log: &mut LogContext,
) -> PublishResult<PrepareOutcome> {
    log.set_step("prepare");

    let initialized = if query::is_git_repo(directory) {
        log.record("using existing git repository");
        false
    } else {
        cmd::init_repo(directory)?;
        log.record(format!("initialized git repository in {}", directory.display()));
        true
    };

    let committed = if query::has_uncommitted_changes(directory)? {
        cmd::add_all(directory)?;
        cmd::commit(directory, &publish.commit_message, &identity(publish))?;
        log.record(format!("committed changes: {}", publish.commit_message));
        true
    } else {
        log.record("working tree clean, nothing to commit");
        false
    };

    Ok(PrepareOutcome {
        initialized,
        committed,
    })
}
