// src/ingest/types.rs
use std::collections::BTreeMap;

/// One normalized article. `url` is the identity key: two records with the
/// same `url` are the same article, and the first one seen wins.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    /// Plain text, capped at 500 characters.
    pub summary: String,
    /// Raw timestamp text as published by the feed; format varies by source
    /// and is not guaranteed parseable.
    pub published: String,
    /// Display name of the feed/site the record came from.
    pub source: String,
    /// Filled by a downstream enrichment stage; always empty here.
    pub topics: Vec<String>,
    pub entities: Entities,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Entities {
    pub people: Vec<String>,
    pub locations: Vec<String>,
}

/// Per-constituency summary block, produced by an upstream process and
/// served verbatim.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ConstituencyBlock {
    pub top_articles: Vec<ArticleRecord>,
    pub count: u64,
    pub top_sources: Vec<String>,
}

/// Constituency name -> summary block. Ordered map, so the fallback "first
/// known constituency" is well defined.
pub type ConstituencySummary = BTreeMap<String, ConstituencyBlock>;
