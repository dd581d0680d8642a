// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deployment orchestrator
//!
//! Drives the hosting provider through the publish sequence. Each provider
//! call is attempted exactly once; the only repetition is the bounded
//! readiness poll after a repository creation. A failure at any step aborts
//! the rest of the sequence with no compensating rollback, so a repository
//! created before a later failure stays behind, incompletely configured.

use std::sync::Arc;

use pagelift_github::{GithubError, RepoHost, Repository};
use tracing::{debug, info, warn};

use crate::config::ReadinessConfig;
use crate::error::{DeployError, DeployResult};

/// Path of the published file
pub const SITE_FILE: &str = "index.html";

/// Result of a successful deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Public URL serving the uploaded HTML
    pub url: String,
}

/// Sequential deployment orchestrator.
///
/// The provider collaborator and the readiness tuning are injected at
/// construction, so tests run the full sequence against a scripted fake.
pub struct Deployer {
    host: Arc<dyn RepoHost>,
    readiness: ReadinessConfig,
}

impl Deployer {
    /// Create an orchestrator over a provider collaborator
    pub fn new(host: Arc<dyn RepoHost>, readiness: ReadinessConfig) -> Self {
        Self { host, readiness }
    }

    /// Publish `html` as the `index.html` of `repo_name` and return the
    /// public URL serving it.
    pub async fn deploy(&self, repo_name: &str, html: &str) -> DeployResult<DeployOutcome> {
        if repo_name.trim().is_empty() {
            return Err(DeployError::Validation(
                "Repository name must not be empty".to_string(),
            ));
        }
        if html.trim().is_empty() {
            return Err(DeployError::Validation(
                "Empty HTML content provided".to_string(),
            ));
        }

        let account = self.host.authenticated_user().await.map_err(|err| {
            warn!(%err, "identity lookup failed");
            DeployError::Auth("Invalid GitHub token".to_string())
        })?;
        let owner = account.login.as_str();

        let (repository, created) = self.resolve_repository(owner, repo_name).await?;
        if created {
            self.await_repository(owner, repo_name).await;
        }

        let branch = repository.default_branch.as_str();
        self.publish_file(owner, repo_name, branch, html).await?;
        self.enable_pages(owner, repo_name, branch).await?;
        let url = self.pages_url(owner, repo_name).await?;

        info!(repo = repo_name, %url, "deployment complete");
        Ok(DeployOutcome { url })
    }

    /// Look up the repository, creating it when the provider reports it
    /// absent. Returns whether a creation happened.
    async fn resolve_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> DeployResult<(Repository, bool)> {
        match self.host.get_repository(owner, name).await {
            Ok(repository) => Ok((repository, false)),
            Err(GithubError::NotFound) => {
                debug!(repo = name, "repository absent, creating");
                let repository = self
                    .host
                    .create_repository(name)
                    .await
                    .map_err(|err| DeployError::RepoAccess(format!("Repo access error: {err}")))?;
                Ok((repository, true))
            }
            Err(err) => Err(DeployError::RepoAccess(format!("Repo access error: {err}"))),
        }
    }

    /// Poll a freshly created repository until it resolves, with a bounded
    /// number of attempts and a linearly increasing delay. Gives up quietly:
    /// the upsert that follows is the call that actually fails if the
    /// provider never catches up.
    async fn await_repository(&self, owner: &str, name: &str) {
        for attempt in 1..=self.readiness.max_attempts {
            tokio::time::sleep(self.readiness.retry_delay * attempt as u32).await;
            match self.host.get_repository(owner, name).await {
                Ok(_) => return,
                Err(err) => debug!(%err, attempt, "repository not visible yet"),
            }
        }
        warn!(repo = name, "repository never became visible, proceeding anyway");
    }

    /// Upsert `index.html`: update with the current revision identifier when
    /// the file exists, create it otherwise.
    async fn publish_file(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        html: &str,
    ) -> DeployResult<()> {
        let publish_error =
            |err: GithubError| DeployError::Publish(format!("Failed to push index.html: {err}"));

        let existing = match self.host.get_file(owner, repo, SITE_FILE, branch).await {
            Ok(file) => Some(file),
            Err(GithubError::NotFound) => None,
            Err(err) => return Err(publish_error(err)),
        };

        match existing {
            Some(file) => {
                self.host
                    .update_file(owner, repo, SITE_FILE, "Update index.html", html, &file.sha, branch)
                    .await
                    .map_err(publish_error)
            }
            None => {
                self.host
                    .create_file(owner, repo, SITE_FILE, "Add index.html", html, branch)
                    .await
                    .map_err(publish_error)
            }
        }
    }

    async fn enable_pages(&self, owner: &str, repo: &str, branch: &str) -> DeployResult<()> {
        self.host.enable_pages(owner, repo, branch, "/").await.map_err(|err| match err {
            GithubError::Api { status, body } => {
                DeployError::PagesEnable(format!("Enabling Pages failed ({status}): {body}"))
            }
            other => DeployError::PagesEnable(format!("Enabling Pages failed: {other}")),
        })
    }

    async fn pages_url(&self, owner: &str, repo: &str) -> DeployResult<String> {
        let pages = self.host.get_pages(owner, repo).await.map_err(|err| match err {
            GithubError::Api { status, body } => {
                DeployError::PagesFetch(format!("Fetching Pages info failed ({status}): {body}"))
            }
            other => DeployError::PagesFetch(format!("Fetching Pages info failed: {other}")),
        })?;

        match pages.html_url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(DeployError::PagesFetch(
                "No html_url in Pages response".to_string(),
            )),
        }
    }
}
