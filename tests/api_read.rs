// tests/api_read.rs
//! Read API filtering and fallback rules over stubbed cache sources.

use anyhow::Result;
use async_trait::async_trait;

use constituency_news::api::NewsApi;
use constituency_news::cache::{Freshness, RemoteSource, TtlCache};
use constituency_news::{ArticleRecord, ConstituencyBlock, ConstituencySummary, Entities};

struct StubSource<T> {
    payload: T,
}

#[async_trait]
impl<T: Clone + Send + Sync> RemoteSource<T> for StubSource<T> {
    async fn fetch(&self) -> Result<T> {
        Ok(self.payload.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn article(url: &str, topics: &[&str]) -> ArticleRecord {
    ArticleRecord {
        title: url.to_string(),
        url: url.to_string(),
        summary: String::new(),
        published: "2024-01-01".to_string(),
        source: "Gazette".to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        entities: Entities::default(),
    }
}

fn api_with(articles: Vec<ArticleRecord>, summary: ConstituencySummary) -> NewsApi {
    NewsApi::new(
        TtlCache::new(Box::new(StubSource { payload: articles })),
        TtlCache::new(Box::new(StubSource { payload: summary })),
    )
}

fn five_articles() -> Vec<ArticleRecord> {
    vec![
        article("https://n.example/1", &["housing"]),
        article("https://n.example/2", &["transport"]),
        article("https://n.example/3", &["housing", "planning"]),
        article("https://n.example/4", &[]),
        article("https://n.example/5", &["health"]),
    ]
}

#[tokio::test]
async fn no_topic_returns_the_full_cached_list() {
    let api = api_with(five_articles(), ConstituencySummary::new());
    let (list, freshness) = api.articles(None).await;
    assert_eq!(list.len(), 5);
    assert!(matches!(freshness, Freshness::FetchedAt(_)));
}

#[tokio::test]
async fn topic_filter_is_exact_membership_with_order_preserved() {
    let api = api_with(five_articles(), ConstituencySummary::new());
    let (list, _) = api.articles(Some("housing")).await;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].url, "https://n.example/1");
    assert_eq!(list[1].url, "https://n.example/3");

    let (none, _) = api.articles(Some("hous")).await;
    assert!(none.is_empty(), "no substring or normalized matching");
}

#[tokio::test]
async fn topics_index_is_sorted_and_filter_independent() {
    let api = api_with(five_articles(), ConstituencySummary::new());
    // a filtered read beforehand must not narrow the index
    let _ = api.articles(Some("housing")).await;
    let topics: Vec<String> = api.topics().await.into_iter().collect();
    assert_eq!(topics, vec!["health", "housing", "planning", "transport"]);
}

/// Blocks are distinguishable by `count` so fallback picks are visible.
fn summary_with(names_and_counts: &[(&str, u64)]) -> ConstituencySummary {
    names_and_counts
        .iter()
        .map(|(n, c)| {
            (
                n.to_string(),
                ConstituencyBlock {
                    top_articles: vec![article("https://n.example/c", &[])],
                    count: *c,
                    top_sources: vec!["Gazette".to_string()],
                },
            )
        })
        .collect()
}

#[tokio::test]
async fn named_constituency_returns_its_block() {
    let api = api_with(
        Vec::new(),
        summary_with(&[("Bolton West", 11), ("Wigan", 5)]),
    );
    let (block, freshness) = api.constituency(Some("Wigan")).await;
    assert_eq!(block.count, 5);
    assert!(matches!(freshness, Freshness::FetchedAt(_)));
}

#[tokio::test]
async fn absent_or_unknown_name_falls_back_to_first_known() {
    let api = api_with(
        Vec::new(),
        summary_with(&[("Wigan", 5), ("Bolton West", 11)]),
    );

    let (by_none, _) = api.constituency(None).await;
    let (by_unknown, _) = api.constituency(Some("Nowhere-on-Sea")).await;

    // BTreeMap order: "Bolton West" sorts first regardless of insertion
    assert_eq!(by_none, by_unknown);
    assert_eq!(by_none.count, 11);
}

#[tokio::test]
async fn empty_summary_map_yields_the_empty_default_block() {
    let api = api_with(Vec::new(), ConstituencySummary::new());
    let (block, _) = api.constituency(Some("Anywhere")).await;
    assert_eq!(block, ConstituencyBlock::default());
    assert!(block.top_articles.is_empty());
    assert_eq!(block.count, 0);
    assert!(block.top_sources.is_empty());
}
