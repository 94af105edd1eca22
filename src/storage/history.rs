use std::path::PathBuf;

use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ShellError;
use crate::storage::paths;

pub const MAX_HISTORY_ENTRIES: usize = 500;

/// Single browsing history record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub timestamp: String,
}

fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Persistent browsing history, newest entries last on disk and served
/// newest-first to the UI.
#[derive(Debug)]
pub struct BrowserHistory {
    entries: Vec<HistoryEntry>,
    path: PathBuf,
    max_entries: usize,
}

impl BrowserHistory {
    pub fn new(path: PathBuf, max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            path,
            max_entries: max_entries.max(1),
        }
    }

    /// Load history from disk. Missing, unreadable, or corrupt files load
    /// as an empty history; malformed entries are skipped individually.
    pub fn load(path: Option<PathBuf>, max_entries: usize) -> Self {
        let path = path.unwrap_or_else(paths::history_path);
        let mut history = BrowserHistory::new(path, max_entries);

        let raw: Value = match std::fs::read_to_string(&history.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Corrupt history file {}: {}", history.path.display(), e);
                    return history;
                }
            },
            Err(_) => return history,
        };

        let Some(items) = raw.as_array() else {
            return history;
        };

        for item in items {
            let Some(url) = item["url"].as_str().map(str::trim).filter(|u| !u.is_empty())
            else {
                continue;
            };
            let title = item["title"]
                .as_str()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(url);
            let timestamp = item["timestamp"]
                .as_str()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .unwrap_or_else(now_timestamp);
            history.entries.push(HistoryEntry {
                url: url.to_string(),
                title: title.to_string(),
                timestamp,
            });
        }

        let max = history.max_entries;
        if history.entries.len() > max {
            history.entries.drain(..history.entries.len() - max);
        }
        history
    }

    pub fn save(&self) -> Result<(), ShellError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ShellError::Storage {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let data =
            serde_json::to_string_pretty(&self.entries).map_err(|e| ShellError::JsonSerialize {
                context: "history".into(),
                source: e,
            })?;
        std::fs::write(&self.path, data).map_err(|e| ShellError::Storage {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Record a visit. Internal URLs are skipped, a repeat of the most
    /// recent URL replaces that entry instead of duplicating it, and the
    /// history is truncated to its capacity before being persisted.
    pub fn add_entry(&mut self, url: &str, title: Option<&str>) {
        let url = url.trim();
        if url.is_empty() || url.starts_with("about:") || url.starts_with("data:") {
            return;
        }
        let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(url);
        let entry = HistoryEntry {
            url: url.to_string(),
            title: title.to_string(),
            timestamp: now_timestamp(),
        };

        match self.entries.last_mut() {
            Some(last) if last.url == entry.url => *last = entry,
            _ => {
                self.entries.push(entry);
                if self.entries.len() > self.max_entries {
                    self.entries.drain(..self.entries.len() - self.max_entries);
                }
            }
        }

        if let Err(e) = self.save() {
            warn!("Could not persist history: {}", e);
        }
    }

    /// Entries in reverse-chronological order (newest first).
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
