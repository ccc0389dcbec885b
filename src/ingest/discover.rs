// src/ingest/discover.rs
//! Syndication-feed discovery from a site homepage.

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use crate::fetch::PageFetcher;

pub const MAX_FEEDS_PER_SITE: usize = 3;

/// Find up to [`MAX_FEEDS_PER_SITE`] candidate feed URLs advertised by the
/// homepage of `site_url`. Any fetch error is absorbed into an empty result.
pub async fn discover(fetcher: &dyn PageFetcher, site_url: &str) -> Vec<String> {
    let html = match fetcher.fetch_text(site_url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = ?e, site = %site_url, "homepage fetch failed");
            return Vec::new();
        }
    };
    extract_feed_links(&html, site_url)
}

/// Conventional feed locations, tried whenever discovery yields nothing —
/// including when the homepage fetch itself failed. Candidates are not
/// verified here; the feed parser tolerates non-feed responses.
pub fn fallback_candidates(site_url: &str) -> Vec<String> {
    let root = site_url.trim_end_matches('/');
    ["rss", "feed", "rss.xml", "feed.xml"]
        .iter()
        .map(|p| format!("{root}/{p}"))
        .collect()
}

pub(crate) fn extract_feed_links(html: &str, site_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("link").unwrap();

    let mut feeds: Vec<String> = Vec::new();
    for element in document.select(&link_selector) {
        let rel = element.value().attr("rel").unwrap_or("").to_ascii_lowercase();
        if !rel.contains("alternate") {
            continue;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        let media_type = element.value().attr("type").unwrap_or("").to_ascii_lowercase();
        let looks_like_feed = media_type.contains("rss")
            || media_type.contains("atom")
            || href.ends_with(".rss")
            || href.ends_with(".xml")
            || href.ends_with("/feed");
        if !looks_like_feed {
            continue;
        }
        let Some(resolved) = resolve_href(href, site_url) else {
            continue;
        };
        if !feeds.contains(&resolved) {
            feeds.push(resolved);
        }
    }
    feeds.truncate(MAX_FEEDS_PER_SITE);
    feeds
}

/// Protocol-relative and root-relative hrefs are made absolute against the
/// site; everything else passes through verbatim.
fn resolve_href(href: &str, site_url: &str) -> Option<String> {
    if href.starts_with("//") {
        return Some(format!("https:{href}"));
    }
    if href.starts_with('/') {
        let base = Url::parse(site_url).ok()?;
        return base.join(href).ok().map(|u| u.to_string());
    }
    Some(href.to_string())
}
