// src/api.rs
//! Read surface consumed by the presentation collaborator. Every call
//! returns a value; remote trouble only ever degrades the freshness label.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::cache::{Freshness, TtlCache};
use crate::ingest::types::{ArticleRecord, ConstituencyBlock, ConstituencySummary};
use crate::remote;

pub struct NewsApi {
    articles: TtlCache<Vec<ArticleRecord>>,
    summaries: TtlCache<ConstituencySummary>,
}

impl NewsApi {
    pub fn new(
        articles: TtlCache<Vec<ArticleRecord>>,
        summaries: TtlCache<ConstituencySummary>,
    ) -> Self {
        Self {
            articles,
            summaries,
        }
    }

    /// Caches over the default endpoints (env-overridable).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            TtlCache::new(Box::new(remote::articles_endpoint()?)),
            TtlCache::new(Box::new(remote::summary_endpoint()?)),
        ))
    }

    /// Cached article list, optionally narrowed to records whose `topics`
    /// contain `topic` exactly. Order is preserved.
    pub async fn articles(&self, topic: Option<&str>) -> (Vec<ArticleRecord>, Freshness) {
        let (mut list, freshness) = self.articles.get().await;
        if let Some(topic) = topic {
            list.retain(|a| a.topics.iter().any(|t| t == topic));
        }
        (list, freshness)
    }

    /// All distinct topic strings across the full cached list, sorted.
    /// Independent of any article filter.
    pub async fn topics(&self) -> BTreeSet<String> {
        let (list, _) = self.articles.get().await;
        list.into_iter().flat_map(|a| a.topics).collect()
    }

    /// The named constituency block; with no or an unknown name, the first
    /// known constituency; an empty block when no summary data exists.
    pub async fn constituency(&self, name: Option<&str>) -> (ConstituencyBlock, Freshness) {
        let (map, freshness) = self.summaries.get().await;
        let block = name
            .and_then(|n| map.get(n))
            .cloned()
            .or_else(|| map.values().next().cloned())
            .unwrap_or_default();
        (block, freshness)
    }
}
