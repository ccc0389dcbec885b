// src/fetch.rs
//! Shared HTTP fetch seam.
//!
//! Every outbound request (discovery, feed polling, remote JSON refresh)
//! goes through the same client settings: fixed identifying user-agent and
//! a hard timeout so no fetch can stall a run.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const USER_AGENT: &str = "election-data.io-bot/1.0 (+https://www.election-data.io)";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the shared client. Timeout covers the whole request.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("building http client")
}

/// Fetching a page body as text. Production code uses [`HttpFetcher`];
/// tests substitute fixture-backed implementations.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http_client()?,
        })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;
        let resp = resp
            .error_for_status()
            .with_context(|| format!("status for {url}"))?;
        resp.text().await.with_context(|| format!("reading body of {url}"))
    }
}
