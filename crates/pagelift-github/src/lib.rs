// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! GitHub REST API client for the Pagelift deployment service
//!
//! Exposes the [`RepoHost`] trait describing the hosting-provider operations
//! the deployment flow needs, plus [`GithubClient`], the `reqwest`-backed
//! implementation speaking the GitHub REST v3 API.

pub mod client;
pub mod error;
pub mod models;

pub use client::{GithubClient, RepoHost, DEFAULT_API_URL};
pub use error::{GithubError, GithubResult};
pub use models::{Account, PagesInfo, Repository, RepositoryFile};
