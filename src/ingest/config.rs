// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "NEWS_SITES_PATH";

/// Seed list of sites (add more later).
pub fn default_sites() -> Vec<String> {
    [
        "https://www.theboltonnews.co.uk/",
        "https://www.manchestereveningnews.co.uk/",
        "https://www.bournemouthecho.co.uk/",
        "https://www.thetelegraphandargus.co.uk/",
        "https://www.lep.co.uk/",
        "https://www.theargus.co.uk/",
        "https://www.bathchronicle.co.uk/",
        "https://www.birminghamlive.co.uk/",
        "https://www.birminghampost.co.uk/",
        "https://www.wigantoday.net/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Load the seed site list from an explicit path. Supports TOML or JSON.
pub fn load_sites_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading site list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sites(&content, ext.as_str())
}

/// Load the seed site list using env var + fallbacks:
/// 1) $NEWS_SITES_PATH
/// 2) config/sites.toml
/// 3) config/sites.json
/// 4) the baked-in default list
pub fn load_sites_default() -> Result<Vec<String>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sites_from(&pb);
        } else {
            return Err(anyhow!("NEWS_SITES_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/sites.toml");
    if toml_p.exists() {
        return load_sites_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sites.json");
    if json_p.exists() {
        return load_sites_from(&json_p);
    }
    Ok(default_sites())
}

fn parse_sites(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("sites");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    // Try JSON array
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    // Fallback: also try TOML if not attempted
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported site list format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlSites {
        sites: Vec<String>,
    }
    let v: TomlSites = toml::from_str(s)?;
    Ok(clean_list(v.sites))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

/// Trim, drop empties, dedup. Configured order is preserved: sites are
/// visited in the order they were written down.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && seen.insert(t.to_string()) {
            out.push(t.to_string());
        }
    }
    out
}
