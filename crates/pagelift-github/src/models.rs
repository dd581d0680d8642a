// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Wire models for the subset of the GitHub REST API the service touches

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::GithubResult;

/// Authenticated account as reported by `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Repository metadata
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default = "default_branch_name")]
    pub default_branch: String,
}

fn default_branch_name() -> String {
    "main".to_string()
}

/// A file tracked in a repository, as returned by the contents API.
///
/// `sha` is the revision identifier the contents API requires when
/// overwriting an existing file.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryFile {
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub content: String,
}

impl RepositoryFile {
    /// Decode the base64 content blob. The API wraps the payload across
    /// lines, so whitespace is stripped before decoding.
    pub fn decoded_content(&self) -> GithubResult<Vec<u8>> {
        let compact: String = self.content.chars().filter(|ch| !ch.is_whitespace()).collect();
        Ok(BASE64.decode(compact.as_bytes())?)
    }
}

/// Pages configuration as reported by `GET /repos/{owner}/{repo}/pages`
#[derive(Debug, Clone, Deserialize)]
pub struct PagesInfo {
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Body for `POST /user/repos`
#[derive(Debug, Serialize)]
pub(crate) struct CreateRepository<'a> {
    pub name: &'a str,
    pub auto_init: bool,
}

/// Body for `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// `sha` must carry the current revision when updating and must be absent
/// when creating.
#[derive(Debug, Serialize)]
pub(crate) struct WriteFile<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

impl<'a> WriteFile<'a> {
    pub fn new(message: &'a str, content: &str, branch: &'a str, sha: Option<&'a str>) -> Self {
        Self {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch,
            sha,
        }
    }
}

/// Body for `POST /repos/{owner}/{repo}/pages`
#[derive(Debug, Serialize)]
pub(crate) struct EnablePages<'a> {
    pub source: PagesSource<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PagesSource<'a> {
    pub branch: &'a str,
    pub path: &'a str,
}
