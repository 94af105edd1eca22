use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};

use crate::adblock::rules::{RuleSet, parse_rule_lines};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Stable on-disk cache name for a remote filter list.
pub fn list_fingerprint(url: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the combined rule set from local files and remote lists.
///
/// Remote lists are cached under `cache_dir`; a failed fetch falls back to
/// the cached copy, and a list that has never been fetched successfully
/// contributes nothing.
pub fn load_rule_sources(paths: &[PathBuf], urls: &[String], cache_dir: &Path) -> RuleSet {
    let mut rules = RuleSet::from_paths(paths);

    for url in urls {
        match fetch_remote_list(url, cache_dir) {
            Some(content) => {
                let fetched = RuleSet::new(parse_rule_lines(&content));
                info!("Filter list {} contributed {} rules", url, fetched.len());
                rules.extend(fetched);
            }
            None => warn!("Filter list {} unavailable and not cached", url),
        }
    }

    rules
}

fn cache_path(url: &str, cache_dir: &Path) -> PathBuf {
    cache_dir.join(format!("{}.txt", list_fingerprint(url)))
}

fn fetch_remote_list(url: &str, cache_dir: &Path) -> Option<String> {
    let cache = cache_path(url, cache_dir);

    match download(url) {
        Some(content) => {
            if std::fs::create_dir_all(cache_dir).is_ok() {
                if let Err(e) = std::fs::write(&cache, &content) {
                    warn!("Could not cache filter list {}: {}", url, e);
                }
            }
            Some(content)
        }
        None => std::fs::read_to_string(&cache).ok(),
    }
}

fn download(url: &str) -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .ok()?;
    let response = client.get(url).send().ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.text().ok()
}
