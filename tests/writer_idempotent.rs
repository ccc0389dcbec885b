// tests/writer_idempotent.rs
//! Change-gated write semantics: identical content never rewrites the
//! destination, changed content replaces it atomically.

use std::fs;

use constituency_news::writer;
use constituency_news::{ArticleRecord, Entities};

fn article(url: &str, published: &str) -> ArticleRecord {
    ArticleRecord {
        title: format!("Story at {url}"),
        url: url.to_string(),
        summary: "A short summary.".to_string(),
        published: published.to_string(),
        source: "Test Gazette".to_string(),
        topics: vec!["housing".to_string()],
        entities: Entities::default(),
    }
}

#[test]
fn first_commit_writes_second_is_a_noop() {
    let tmp = tempfile::tempdir().unwrap();
    // destination in a directory that does not exist yet
    let dest = tmp.path().join("data").join("combined_news.json");
    let feed = vec![article("https://a.example/1", "2024-01-02")];

    let written = writer::commit(&feed, &dest).expect("first commit");
    assert!(written);
    let bytes_after_first = fs::read(&dest).unwrap();

    let written_again = writer::commit(&feed, &dest).expect("second commit");
    assert!(!written_again, "identical content must be skipped");
    let bytes_after_second = fs::read(&dest).unwrap();
    assert_eq!(
        bytes_after_first, bytes_after_second,
        "destination must be byte-identical after the no-op"
    );
}

#[test]
fn changed_content_replaces_the_destination() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("combined_news.json");

    let feed_one = vec![article("https://a.example/1", "2024-01-02")];
    let feed_two = vec![
        article("https://a.example/1", "2024-01-02"),
        article("https://a.example/2", "2024-01-03"),
    ];

    assert!(writer::commit(&feed_one, &dest).unwrap());
    assert!(writer::commit(&feed_two, &dest).unwrap());

    let on_disk: Vec<ArticleRecord> =
        serde_json::from_str(&fs::read_to_string(&dest).unwrap()).expect("valid JSON array");
    assert_eq!(on_disk, feed_two);
}

#[test]
fn serialized_form_is_pretty_printed_with_expected_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("combined_news.json");

    writer::commit(&[article("https://a.example/1", "2024-01-02")], &dest).unwrap();
    let text = fs::read_to_string(&dest).unwrap();

    assert!(text.contains('\n'), "human-readable indentation expected");
    for key in [
        "\"title\"",
        "\"url\"",
        "\"summary\"",
        "\"published\"",
        "\"source\"",
        "\"topics\"",
        "\"entities\"",
        "\"people\"",
        "\"locations\"",
    ] {
        assert!(text.contains(key), "missing {key} in output");
    }
}

#[test]
fn empty_feed_writes_an_empty_array_and_leaves_no_temp_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("combined_news.json");

    assert!(writer::commit(&[], &dest).unwrap());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "[]");

    let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the destination file remains");
}
