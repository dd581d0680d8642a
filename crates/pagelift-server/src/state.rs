// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use std::sync::Arc;

use pagelift_github::{GithubClient, RepoHost};

use crate::config::ServerConfig;
use crate::deploy::Deployer;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Deployment orchestrator
    pub deployer: Arc<Deployer>,
}

impl AppState {
    /// Create state wired to the real provider API
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let client = GithubClient::from_url(&config.api_url, config.github_token.clone())?;
        Ok(Self::with_host(config, Arc::new(client)))
    }

    /// Create state over an arbitrary provider collaborator (used by tests)
    pub fn with_host(config: ServerConfig, host: Arc<dyn RepoHost>) -> Self {
        let deployer = Arc::new(Deployer::new(host, config.readiness.clone()));
        Self { config, deployer }
    }
}
