//! HTTP clients for the release API and the artifact host.

use crate::config::NetworkConfig;
use crate::constants::USER_AGENT;
use crate::core::{LoomError, Result};
use std::time::Duration;

/// Builds the client used for the release listing request.
///
/// # Errors
///
/// Returns [`LoomError::NetworkError`] if the TLS backend cannot be initialised.
pub fn api_client(network: &NetworkConfig) -> Result<reqwest::Client> {
    build(network.api_timeout(), network.connect_timeout())
}

/// Builds the client used to download the artifact.
///
/// # Errors
///
/// Returns [`LoomError::NetworkError`] if the TLS backend cannot be initialised.
pub fn download_client(network: &NetworkConfig) -> Result<reqwest::Client> {
    build(network.download_timeout(), network.connect_timeout())
}

fn build(timeout: Duration, connect_timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| LoomError::network("create HTTP client", e))
}
