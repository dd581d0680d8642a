// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the GitHub client

/// Result type alias for provider operations
pub type GithubResult<T> = std::result::Result<T, GithubError>;

/// Errors surfaced at the hosting-provider boundary.
///
/// Lookup-style calls report `NotFound` and `Unauthorized` as their own
/// variants so callers can branch on them; everything else the API rejects
/// comes back as `Api` with the upstream status and body.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("resource not found")]
    NotFound,

    #[error("credential rejected by GitHub")]
    Unauthorized,

    #[error("GitHub returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid content encoding: {source}")]
    Decode {
        #[from]
        source: base64::DecodeError,
    },

    #[error("invalid URL: {source}")]
    Url {
        #[from]
        source: url::ParseError,
    },

    #[error("HTTP transport error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

impl GithubError {
    /// Classify a non-success response from a lookup-style endpoint.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => GithubError::NotFound,
            401 => GithubError::Unauthorized,
            _ => GithubError::Api { status, body },
        }
    }

    /// True when the error is the provider's not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GithubError::NotFound)
    }
}
