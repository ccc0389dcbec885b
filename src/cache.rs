// src/cache.rs
//! # Bounded-staleness cache
//! Process-wide cache in front of a slow remote source.
//!
//! Serves the cached payload without network while it is younger than the
//! TTL; past that it refreshes, and a failed refresh degrades freshness
//! rather than availability: the last known-good value keeps being served
//! with its original timestamp.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::Mutex;
use tracing::warn;

pub const DEFAULT_TTL_SECS: u64 = 300;

/// A remote producer of `T`. Network problems, bad HTTP statuses and
/// wrong-shaped payloads all surface as `Err` — the cache does not
/// distinguish between them.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<T>;
    fn name(&self) -> &'static str;
}

/// The most recent successfully fetched value. A failed fetch never
/// replaces it.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub fetched_at: DateTime<Utc>,
    pub payload: T,
}

/// When the served value was obtained, or `Unavailable` when no fetch has
/// ever succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    FetchedAt(DateTime<Utc>),
    Unavailable,
}

impl Freshness {
    /// UTC second-resolution timestamp, or the literal `unavailable`.
    pub fn label(&self) -> String {
        match self {
            Freshness::FetchedAt(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            Freshness::Unavailable => "unavailable".to_string(),
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Thread-safe TTL cache over one [`RemoteSource`].
pub struct TtlCache<T> {
    source: Box<dyn RemoteSource<T>>,
    ttl: chrono::Duration,
    slot: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone + Default + Send> TtlCache<T> {
    pub fn new(source: Box<dyn RemoteSource<T>>) -> Self {
        Self::with_ttl(source, DEFAULT_TTL_SECS)
    }

    pub fn with_ttl(source: Box<dyn RemoteSource<T>>, ttl_secs: u64) -> Self {
        Self {
            source,
            ttl: chrono::Duration::seconds(ttl_secs as i64),
            slot: Mutex::new(None),
        }
    }

    /// Current payload plus its freshness.
    ///
    /// The lock spans the whole check-refresh-overwrite sequence, so
    /// concurrent expirations collapse into a single fetch; late arrivals
    /// find the refreshed entry and return without network.
    pub async fn get(&self) -> (T, Freshness) {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if Utc::now() - entry.fetched_at < self.ttl {
                return (entry.payload.clone(), Freshness::FetchedAt(entry.fetched_at));
            }
        }

        match self.source.fetch().await {
            Ok(payload) => {
                let fetched_at = Utc::now();
                *slot = Some(CacheEntry {
                    fetched_at,
                    payload: payload.clone(),
                });
                (payload, Freshness::FetchedAt(fetched_at))
            }
            Err(e) => {
                warn!(
                    error = ?e,
                    source = self.source.name(),
                    "refresh failed; serving last known value"
                );
                match slot.as_ref() {
                    Some(entry) => (entry.payload.clone(), Freshness::FetchedAt(entry.fetched_at)),
                    None => (T::default(), Freshness::Unavailable),
                }
            }
        }
    }
}
