// src/writer.rs
//! Change-gated persistence of the aggregated article list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::ingest::types::ArticleRecord;

/// Serialize `feed` and write it to `destination` only when the content
/// differs from what is already there (reduces noisy commits when the run
/// produced no changes). Returns whether a write happened.
///
/// The replace goes through a sibling temp file and a rename, so a reader
/// never observes a half-written blob.
pub fn commit(feed: &[ArticleRecord], destination: &Path) -> Result<bool> {
    let blob = serde_json::to_string_pretty(feed).context("serializing article list")?;

    if destination.exists() {
        let existing = fs::read(destination)
            .with_context(|| format!("reading {}", destination.display()))?;
        if Sha256::digest(&existing) == Sha256::digest(blob.as_bytes()) {
            return Ok(false);
        }
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let tmp = destination.with_extension("tmp");
    fs::write(&tmp, blob.as_bytes()).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, destination)
        .with_context(|| format!("replacing {}", destination.display()))?;
    Ok(true)
}
