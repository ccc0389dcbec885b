// src/ingest/feed.rs
//! RSS/Atom feed parsing into [`ArticleRecord`]s.

use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::fetch::PageFetcher;
use crate::ingest::clean_summary;
use crate::ingest::types::{ArticleRecord, Entities};

pub const MAX_ENTRIES_PER_FEED: usize = 20;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    title: Option<String>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<String>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
}

/// Fetch `feed_url` and parse it into at most [`MAX_ENTRIES_PER_FEED`]
/// records. Non-feed or malformed content is an error for the caller to
/// swallow, never a panic.
pub async fn parse(fetcher: &dyn PageFetcher, feed_url: &str) -> Result<Vec<ArticleRecord>> {
    let body = fetcher
        .fetch_text(feed_url)
        .await
        .with_context(|| format!("fetching feed {feed_url}"))?;
    parse_feed_str(&body)
}

/// RSS is tried first: an RSS document would also satisfy the laxer Atom
/// shape, with zero entries.
pub(crate) fn parse_feed_str(xml: &str) -> Result<Vec<ArticleRecord>> {
    if let Ok(rss) = from_str::<Rss>(xml) {
        return Ok(records_from_rss(rss));
    }
    let atom: AtomFeed = from_str(xml).context("content is neither RSS nor Atom")?;
    Ok(records_from_atom(atom))
}

fn records_from_rss(rss: Rss) -> Vec<ArticleRecord> {
    let source = rss.channel.title.unwrap_or_default();
    rss.channel
        .items
        .into_iter()
        .take(MAX_ENTRIES_PER_FEED)
        .map(|item| build_record(item.title, item.link, item.description, item.pub_date, &source))
        .collect()
}

fn records_from_atom(feed: AtomFeed) -> Vec<ArticleRecord> {
    let source = feed.title.unwrap_or_default();
    feed.entries
        .into_iter()
        .take(MAX_ENTRIES_PER_FEED)
        .map(|entry| {
            let link = entry.links.into_iter().find_map(|l| l.href);
            // explicit publication time wins over the update time
            let published = entry.published.or(entry.updated);
            build_record(entry.title, link, entry.summary, published, &source)
        })
        .collect()
}

fn build_record(
    title: Option<String>,
    link: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    source: &str,
) -> ArticleRecord {
    ArticleRecord {
        title: title.as_deref().unwrap_or("").trim().to_string(),
        url: link.as_deref().unwrap_or("").trim().to_string(),
        summary: clean_summary(summary.as_deref().unwrap_or("")),
        published: published.unwrap_or_default(),
        source: source.to_string(),
        topics: Vec::new(),
        entities: Entities::default(),
    }
}
