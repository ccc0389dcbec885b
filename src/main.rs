//! Aggregation batch entrypoint.
//! Pulls the latest items from each seed site's feeds (discovered from the
//! homepage, or the conventional paths) and rewrites the combined article
//! list only when it changed. Kept light so it runs fast under a scheduled
//! CI trigger.

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use constituency_news::fetch::HttpFetcher;
use constituency_news::{ingest, writer};

const ENV_OUTPUT_PATH: &str = "NEWS_OUTPUT_PATH";
const DEFAULT_OUTPUT_PATH: &str = "data/combined_news.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt().with_env_filter(filter).init();

    let sites = ingest::config::load_sites_default().context("loading seed site list")?;
    info!(sites = sites.len(), "news update starting");

    let fetcher = HttpFetcher::new()?;
    let articles = ingest::collect(&fetcher, &sites).await;

    let destination =
        std::env::var(ENV_OUTPUT_PATH).unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());
    let written = writer::commit(&articles, Path::new(&destination))
        .context("persisting article list")?;

    if written {
        info!(count = articles.len(), path = %destination, "wrote article list");
    } else {
        info!(path = %destination, "no changes detected; skipping write");
    }
    Ok(())
}
