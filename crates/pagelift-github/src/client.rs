// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Provider trait and the GitHub REST implementation

use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{GithubError, GithubResult};
use crate::models::{
    Account, CreateRepository, EnablePages, PagesInfo, PagesSource, Repository, RepositoryFile,
    WriteFile,
};

/// Default API base for the public github.com instance
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// Statuses the Pages-enable endpoint reports on success
const PAGES_ENABLE_OK: [u16; 2] = [201, 204];

/// Operations the deployment flow needs from the hosting provider.
///
/// The orchestrator only ever talks to this trait, so tests can substitute a
/// scripted fake and the GitHub specifics stay inside [`GithubClient`].
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Identity lookup for the configured credential
    async fn authenticated_user(&self) -> GithubResult<Account>;

    /// Repository lookup; `NotFound` when the repository does not exist
    async fn get_repository(&self, owner: &str, name: &str) -> GithubResult<Repository>;

    /// Create a repository under the authenticated account, auto-initialized
    /// so it has a default branch to push to
    async fn create_repository(&self, name: &str) -> GithubResult<Repository>;

    /// File lookup by path on a branch; `NotFound` when absent
    async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> GithubResult<RepositoryFile>;

    /// Create a file that does not exist yet
    async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> GithubResult<()>;

    /// Overwrite an existing file; `sha` must be the current revision or the
    /// provider rejects the write
    async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: &str,
        branch: &str,
    ) -> GithubResult<()>;

    /// Enable static hosting sourced from `branch` at `path`
    async fn enable_pages(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: &str,
    ) -> GithubResult<()>;

    /// Fetch the hosting configuration
    async fn get_pages(&self, owner: &str, repo: &str) -> GithubResult<PagesInfo>;
}

/// GitHub REST API client
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: HttpClient,
    base_url: Url,
    token: String,
}

impl GithubClient {
    /// Create a new client against `base_url` with a pre-issued token
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .user_agent(concat!("pagelift/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str, token: impl Into<String>) -> GithubResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(base_url, token))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> GithubResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Read a success body as JSON, classifying non-success responses into
    /// the tagged error kinds.
    async fn read_json<T: DeserializeOwned>(response: Response) -> GithubResult<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GithubError::from_status(status.as_u16(), body))
        }
    }

    /// Discard a success body, classifying non-success responses.
    async fn read_unit(response: Response) -> GithubResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GithubError::from_status(status.as_u16(), body))
        }
    }
}

#[async_trait]
impl RepoHost for GithubClient {
    async fn authenticated_user(&self) -> GithubResult<Account> {
        let url = self.endpoint("/user")?;
        let response = self.request(Method::GET, url).send().await?;
        Self::read_json(response).await
    }

    async fn get_repository(&self, owner: &str, name: &str) -> GithubResult<Repository> {
        let url = self.endpoint(&format!("/repos/{owner}/{name}"))?;
        let response = self.request(Method::GET, url).send().await?;
        Self::read_json(response).await
    }

    async fn create_repository(&self, name: &str) -> GithubResult<Repository> {
        debug!(repo = name, "creating repository");
        let url = self.endpoint("/user/repos")?;
        let body = CreateRepository {
            name,
            auto_init: true,
        };
        let response = self.request(Method::POST, url).json(&body).send().await?;
        Self::read_json(response).await
    }

    async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> GithubResult<RepositoryFile> {
        let mut url = self.endpoint(&format!("/repos/{owner}/{repo}/contents/{path}"))?;
        url.set_query(Some(&format!("ref={branch}")));
        let response = self.request(Method::GET, url).send().await?;
        Self::read_json(response).await
    }

    async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> GithubResult<()> {
        debug!(repo, path, branch, "creating file");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/contents/{path}"))?;
        let body = WriteFile::new(message, content, branch, None);
        let response = self.request(Method::PUT, url).json(&body).send().await?;
        Self::read_unit(response).await
    }

    async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: &str,
        branch: &str,
    ) -> GithubResult<()> {
        debug!(repo, path, branch, sha, "updating file");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/contents/{path}"))?;
        let body = WriteFile::new(message, content, branch, Some(sha));
        let response = self.request(Method::PUT, url).json(&body).send().await?;
        Self::read_unit(response).await
    }

    async fn enable_pages(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: &str,
    ) -> GithubResult<()> {
        debug!(repo, branch, "enabling Pages");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pages"))?;
        let body = EnablePages {
            source: PagesSource { branch, path },
        };
        let response = self.request(Method::POST, url).json(&body).send().await?;

        // Only the documented creation statuses count as success here; the
        // caller wants every other status surfaced with its body.
        let status = response.status().as_u16();
        if PAGES_ENABLE_OK.contains(&status) {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GithubError::Api { status, body })
        }
    }

    async fn get_pages(&self, owner: &str, repo: &str) -> GithubResult<PagesInfo> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pages"))?;
        let response = self.request(Method::GET, url).send().await?;

        let status = response.status().as_u16();
        if status == 200 {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GithubError::Api { status, body })
        }
    }
}
