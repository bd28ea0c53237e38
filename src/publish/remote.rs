// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote creation and push, with compensation.
//!
//! ```text
//! HEAD has commits? --no--> NoCommits (no network)
//! GET /user --> POST /user/repos --> remote add --> push -u
//!                                       |             |
//!                                       +--failure----+
//!                                       v
//!                       remote remove (if added), DELETE repo
//! ```

use std::path::Path;

use super::{Stage, StageError, remote_stage};
use crate::config::Config;
use crate::config::types::PublishConfig;
use crate::error::{GitError, PublishError};
use crate::git::{cmd, query};
use crate::github::{GithubClient, RemoteRepository};
use crate::logging::LogContext;

/// Branch to push: configured, else current, else the fallback.
pub(super) fn push_branch(publish: &PublishConfig, directory: &Path) -> String {
    if let Some(branch) = publish.branch.as_deref().filter(|b| !b.is_empty()) {
        return branch.to_string();
    }
    match query::current_branch(directory) {
        Ok(Some(branch)) => branch,
        Ok(None) => PublishConfig::FALLBACK_BRANCH.to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "cannot read current branch");
            PublishConfig::FALLBACK_BRANCH.to_string()
        }
    }
}

fn staged(err: impl Into<PublishError>) -> StageError {
    let err = err.into();
    StageError::new(remote_stage(&err), err)
}

pub(super) async fn create_and_push(
    config: &Config,
    token: &str,
    name: &str,
    directory: &Path,
    private: bool,
    log: &mut LogContext,
) -> Result<RemoteRepository, StageError> {
    let publish = &config.publish;

    let has_commits =
        query::has_commits(directory).map_err(|e| StageError::new(Stage::Prepare, e))?;
    if !has_commits {
        return Err(StageError::new(
            Stage::Prepare,
            GitError::NoCommits {
                path: directory.display().to_string(),
            },
        ));
    }

    log.set_step(Stage::CreateRemote.as_str());
    let client = GithubClient::new(&config.github.api_url, token).map_err(staged)?;
    let user = client.current_user().await.map_err(staged)?;
    log.record(format!("authenticated as {}", user.login));

    let repo = client.create_repo(name, private).await.map_err(staged)?;
    log.record(format!(
        "created {} repository {}",
        if repo.private { "private" } else { "public" },
        repo.full_name
    ));

    log.set_step(Stage::Push.as_str());
    if let Err(e) = cmd::add_remote(directory, &publish.remote, &repo.clone_url) {
        let err = StageError::new(Stage::Push, e);
        return Err(compensate(&client, &repo, publish, directory, false, err, log).await);
    }
    log.record(format!("added remote {} -> {}", publish.remote, repo.clone_url));

    let branch = push_branch(publish, directory);
    if let Err(e) = cmd::push_upstream(directory, &publish.remote, &branch) {
        let err = StageError::new(Stage::Push, e);
        return Err(compensate(&client, &repo, publish, directory, true, err, log).await);
    }
    log.record(format!("pushed {branch} to {}", publish.remote));

    Ok(repo)
}

/// Undo what was created after a push-stage failure and return `err`,
/// annotated if the remote repository could not be deleted.
async fn compensate(
    client: &GithubClient,
    repo: &RemoteRepository,
    publish: &PublishConfig,
    directory: &Path,
    remote_added: bool,
    mut err: StageError,
    log: &mut LogContext,
) -> StageError {
    if !publish.delete_on_failure {
        log.warn(format!("leaving {} in place after failure", repo.full_name));
        return err;
    }

    if remote_added && let Err(e) = cmd::remove_remote(directory, &publish.remote) {
        log.warn(format!("could not remove remote {}: {e}", publish.remote));
    }

    match client.delete_repo(&repo.owner.login, &repo.name).await {
        Ok(()) => log.record(format!("deleted {} after failure", repo.full_name)),
        Err(e) => {
            log.warn(format!("could not delete {}: {e}", repo.full_name));
            err.cleanup = Some(format!("{} was left behind: {e}", repo.full_name));
        }
    }
    err
}
