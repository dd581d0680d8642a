// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Deployment error taxonomy and HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Result type for deployment operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Everything that can abort a deployment.
///
/// Each variant carries the human-readable diagnostic surfaced to the
/// caller, including the upstream status code and body where available.
/// No variant is retried or recovered; the first failure ends the sequence.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Bad input, rejected before any provider call
    #[error("{0}")]
    Validation(String),

    /// The configured credential was rejected by the provider
    #[error("{0}")]
    Auth(String),

    /// Repository lookup or creation failed for a reason other than absence
    #[error("{0}")]
    RepoAccess(String),

    /// The `index.html` upsert failed
    #[error("{0}")]
    Publish(String),

    /// The hosting-enable call returned something other than 201 or 204
    #[error("{0}")]
    PagesEnable(String),

    /// The hosting-config fetch failed or lacked the public URL
    #[error("{0}")]
    PagesFetch(String),
}

impl DeployError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeployError::Validation(_) => StatusCode::BAD_REQUEST,
            DeployError::Auth(_) => StatusCode::UNAUTHORIZED,
            DeployError::RepoAccess(_)
            | DeployError::Publish(_)
            | DeployError::PagesEnable(_)
            | DeployError::PagesFetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body shape of the inbound API
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for DeployError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
