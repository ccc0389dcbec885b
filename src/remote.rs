// src/remote.rs
//! Remote JSON sources feeding the caches: the combined article list and
//! the per-constituency summary map. Endpoint locations are env-overridable.

use std::marker::PhantomData;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::cache::RemoteSource;
use crate::fetch;
use crate::ingest::types::{ArticleRecord, ConstituencySummary};

pub const ENV_ARTICLES_URL: &str = "NEWS_ARTICLES_URL";
pub const DEFAULT_ARTICLES_URL: &str = "https://www.election-data.io/data/combined_news.json";

pub const ENV_SUMMARY_URL: &str = "NEWS_SUMMARY_URL";
pub const DEFAULT_SUMMARY_URL: &str =
    "https://www.election-data.io/data/constituency_summary.json";

/// HTTPS JSON endpoint decoded strictly into `T`. A response that does not
/// match `T`'s shape is an error, which the cache treats like any other
/// failed fetch.
pub struct JsonEndpoint<T> {
    name: &'static str,
    url: String,
    client: reqwest::Client,
    _payload: PhantomData<fn() -> T>,
}

impl<T> JsonEndpoint<T> {
    pub fn new(name: &'static str, url: String) -> Result<Self> {
        Ok(Self {
            name,
            url,
            client: fetch::http_client()?,
            _payload: PhantomData,
        })
    }
}

#[async_trait]
impl<T> RemoteSource<T> for JsonEndpoint<T>
where
    T: DeserializeOwned + Send + Sync,
{
    async fn fetch(&self) -> Result<T> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("fetching {}", self.url))?
            .error_for_status()
            .with_context(|| format!("status for {}", self.url))?;
        resp.json::<T>()
            .await
            .with_context(|| format!("decoding {}", self.url))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Local-file variant for deployments where the serving layer sits next to
/// the batch output instead of polling an HTTPS endpoint.
pub struct FileSource<T> {
    name: &'static str,
    path: PathBuf,
    _payload: PhantomData<fn() -> T>,
}

impl<T> FileSource<T> {
    pub fn new(name: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<T> RemoteSource<T> for FileSource<T>
where
    T: DeserializeOwned + Send + Sync,
{
    async fn fetch(&self) -> Result<T> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("decoding {}", self.path.display()))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

pub fn articles_endpoint() -> Result<JsonEndpoint<Vec<ArticleRecord>>> {
    let url = std::env::var(ENV_ARTICLES_URL).unwrap_or_else(|_| DEFAULT_ARTICLES_URL.to_string());
    JsonEndpoint::new("articles", url)
}

pub fn summary_endpoint() -> Result<JsonEndpoint<ConstituencySummary>> {
    let url = std::env::var(ENV_SUMMARY_URL).unwrap_or_else(|_| DEFAULT_SUMMARY_URL.to_string());
    JsonEndpoint::new("constituency summary", url)
}
