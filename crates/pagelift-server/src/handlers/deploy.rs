// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deployment endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DeployResult;
use crate::state::AppState;

/// Body of `POST /deploy`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// Repository name to create or update
    pub repo_name: String,

    /// HTML content to publish
    pub html: String,
}

/// Success body of `POST /deploy`
#[derive(Debug, Serialize)]
pub struct DeployResponse {
    pub url: String,
}

/// Publish the posted HTML and respond with the public site URL
pub async fn deploy(
    State(state): State<AppState>,
    Json(request): Json<DeployRequest>,
) -> DeployResult<Json<DeployResponse>> {
    info!(repo = %request.repo_name, bytes = request.html.len(), "deploy requested");

    let outcome = state.deployer.deploy(&request.repo_name, &request.html).await?;

    Ok(Json(DeployResponse { url: outcome.url }))
}
