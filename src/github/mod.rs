// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST client.
//!
//! ```text
//! GithubClient::new(api_url, token)
//!   current_user()  GET    /user
//!   create_repo()   POST   /user/repos        {name, private}
//!   delete_repo()   DELETE /repos/{owner}/{name}
//!
//! non-2xx --> NetworkError::Api { status, url, message }
//!             message = body.message [+ body.errors[].message]
//! ```
//!
//! # Key Types
//!
//! | Type                | Purpose                              |
//! |---------------------|--------------------------------------|
//! | `User`              | Authenticated account (`/user`)      |
//! | `RemoteRepository`  | Created repository record            |
//! | `CreateRepoRequest` | Body of `POST /user/repos`           |

use crate::error::{NetworkError, PublishResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Global HTTP client - initialized once, reused for every request.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("repo2gh/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Authenticated account.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Repository owner as embedded in a repository record.
#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// Repository record returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub clone_url: String,
    #[serde(default)]
    pub private: bool,
    pub owner: Owner,
}

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest<'a> {
    pub name: &'a str,
    pub private: bool,
}

/// Error body returned by the API.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ApiErrorBody {
    /// Flatten `message` and per-field details into one line.
    fn summary(&self) -> String {
        let details: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.message.as_deref().or(e.code.as_deref()))
            .collect();
        match (self.message.is_empty(), details.is_empty()) {
            (false, true) => self.message.clone(),
            (false, false) => format!("{} ({})", self.message, details.join("; ")),
            (true, false) => details.join("; "),
            (true, true) => String::new(),
        }
    }
}

/// Client for the subset of the GitHub API used to publish a repository.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    /// Create a client for `api_url` authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if `api_url` is not an http(s) URL.
    pub fn new(api_url: &str, token: impl Into<String>) -> PublishResult<Self> {
        let api_url = api_url.trim_end_matches('/');
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(NetworkError::InvalidUrl(api_url.to_string()).into());
        }
        Ok(Self {
            client: global_client().clone(),
            api_url: api_url.to_string(),
            token: token.into(),
        })
    }

    /// API base URL without trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Turn a non-success response into `NetworkError::Api`.
    async fn check(response: Response, url: &str) -> PublishResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.summary())
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| body.trim().to_string(), str::to_string)
            });
        Err(NetworkError::Api {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        }
        .into())
    }

    /// Resolve the account the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Api` for a rejected token, or
    /// `NetworkError::Reqwest` on transport or decoding failure.
    pub async fn current_user(&self) -> PublishResult<User> {
        let url = format!("{}/user", self.api_url);
        debug!(%url, "resolving authenticated user");

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(NetworkError::from)?;
        let response = Self::check(response, &url).await?;
        Ok(response.json::<User>().await.map_err(NetworkError::from)?)
    }

    /// Create a repository under the authenticated account.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Api` when the name is taken or invalid (422)
    /// or the token lacks permission, `NetworkError::Reqwest` otherwise.
    pub async fn create_repo(&self, name: &str, private: bool) -> PublishResult<RemoteRepository> {
        let url = format!("{}/user/repos", self.api_url);
        debug!(%url, name, private, "creating repository");

        let response = self
            .authorized(self.client.post(&url))
            .json(&CreateRepoRequest { name, private })
            .send()
            .await
            .map_err(NetworkError::from)?;
        let response = Self::check(response, &url).await?;
        Ok(response
            .json::<RemoteRepository>()
            .await
            .map_err(NetworkError::from)?)
    }

    /// Delete `owner/name`. Requires the `delete_repo` scope.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Api` if the API refuses the deletion.
    pub async fn delete_repo(&self, owner: &str, name: &str) -> PublishResult<()> {
        let url = format!("{}/repos/{owner}/{name}", self.api_url);
        debug!(%url, "deleting repository");

        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(NetworkError::from)?;
        Self::check(response, &url).await?;
        Ok(())
    }
}
