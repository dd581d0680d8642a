// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Pagelift deployment service
//!
//! Accepts HTML over HTTP and drives the hosting provider through a fixed
//! sequence of calls until the payload is reachable as a static site:
//! resolve-or-create the repository, upsert `index.html` on the default
//! branch, enable Pages, and read back the public URL.

pub mod config;
pub mod deploy;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::{ConfigError, ReadinessConfig, ServerConfig};
pub use deploy::{DeployOutcome, Deployer};
pub use error::{DeployError, DeployResult};
pub use server::Server;
pub use state::AppState;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
