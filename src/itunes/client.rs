//! HTTP transport for iTunes requests.

use crate::config::Config;
use crate::itunes::error::StoreError;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Status and body of a completed upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Performs GET requests - enables mocking the transport in tests.
#[async_trait]
pub trait HttpGetter: Send + Sync {
    /// Fetches `url`. Connection errors and timeouts map to [`StoreError::Transport`].
    async fn get(&self, url: &str) -> Result<HttpResponse, StoreError>;
}

/// Production getter with per-call timeouts.
pub struct WreqGetter {
    client: Client,
}

impl WreqGetter {
    /// Creates a getter using the timeouts from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpGetter for WreqGetter {
    async fn get(&self, url: &str) -> Result<HttpResponse, StoreError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("GET {}: {}", url, e)))?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(format!("reading body of {}: {}", url, e)))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
