// src/ingest/mod.rs
pub mod config;
pub mod discover;
pub mod feed;
pub mod types;

use std::collections::HashSet;
use std::time::Duration;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::fetch::PageFetcher;
use types::ArticleRecord;

/// Hard cap on the combined article list.
pub const MAX_ARTICLES: usize = 200;

/// Pause after finishing each site, bounding request rate per host family.
pub const POLITENESS_DELAY: Duration = Duration::from_secs(1);

/// Characters kept of a summary after HTML stripping.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Reduce feed-supplied HTML to plain text: decode entities, drop tags,
/// collapse whitespace, cap at [`SUMMARY_MAX_CHARS`].
pub fn clean_summary(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let stripped = re_tags.replace_all(&decoded, " ");

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    let collapsed = re_ws.replace_all(&stripped, " ");

    collapsed.trim().chars().take(SUMMARY_MAX_CHARS).collect()
}

/// Run one aggregation pass over `sites`, in order.
///
/// Per site: discover advertised feeds, fall back to the conventional paths
/// when discovery yields nothing, parse every candidate, and keep the first
/// record seen for each article `url`. A bad feed contributes nothing; it
/// never aborts the run. The combined list is sorted newest-first by the
/// raw `published` text and capped at [`MAX_ARTICLES`].
pub async fn collect(fetcher: &dyn PageFetcher, sites: &[String]) -> Vec<ArticleRecord> {
    let mut all: Vec<ArticleRecord> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    for site in sites {
        let mut feeds = discover::discover(fetcher, site).await;
        if feeds.is_empty() {
            feeds = discover::fallback_candidates(site);
        }
        for feed_url in &feeds {
            let items = match feed::parse(fetcher, feed_url).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = ?e, feed = %feed_url, "feed contributed nothing");
                    continue;
                }
            };
            for item in items {
                if item.url.is_empty() || !seen_urls.insert(item.url.clone()) {
                    continue;
                }
                all.push(item);
            }
        }
        // brief politeness between sites
        tokio::time::sleep(POLITENESS_DELAY).await;
    }

    // Newest first, comparing the raw published strings as-is. Stable, so
    // ties keep their first-seen order.
    all.sort_by(|a, b| b.published.cmp(&a.published));
    all.truncate(MAX_ARTICLES);
    info!(count = all.len(), sites = sites.len(), "aggregation pass complete");
    all
}
