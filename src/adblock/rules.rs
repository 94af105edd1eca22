use std::path::Path;

use log::{debug, info};

use crate::engine::protocol::ResourceType;

/// Container for ad blocking rules.
///
/// The rule grammar is a small EasyList subset; the goal is to block the
/// most disruptive ad networks and trackers, not to replace a full
/// content blocker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<String>,
}

impl RuleSet {
    pub fn new(rules: Vec<String>) -> Self {
        Self { rules }
    }

    /// Read rules from every provided path. Missing paths are ignored to
    /// keep startup resilient; blank lines and `#`/`!` comments are
    /// skipped.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut collected = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match std::fs::read_to_string(path) {
                Ok(content) => collected.extend(parse_rule_lines(&content)),
                Err(_) => {
                    debug!("Filter list {} not readable, skipping", path.display());
                }
            }
        }
        Self { rules: collected }
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse filter-list text into rule strings.
pub fn parse_rule_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(String::from)
        .collect()
}

/// Request filter answering intercepted-request events with allow/block
/// decisions.
#[derive(Debug)]
pub struct AdBlocker {
    rules: Vec<String>,
    enabled: bool,
}

impl AdBlocker {
    pub fn new(rule_set: RuleSet, enabled: bool) -> Self {
        info!("Ad blocker initialised with {} rules", rule_set.rules.len());
        Self {
            rules: rule_set.rules,
            enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Decide whether an intercepted request should be blocked.
    ///
    /// Media-ish resource types are never blocked so embedded players keep
    /// working even when their hosts appear in a filter list.
    pub fn should_block(&self, url: &str, resource: ResourceType) -> bool {
        if !self.enabled || self.rules.is_empty() {
            return false;
        }
        if matches!(
            resource,
            ResourceType::Media | ResourceType::Video | ResourceType::Plugin
        ) {
            return false;
        }

        let url_lower = url.to_lowercase();
        if url_path(&url_lower).contains("/cdn-cgi/speculation") {
            return false;
        }
        let host = url_host(&url_lower);

        self.rules
            .iter()
            .any(|rule| matches_rule(rule, &host, &url_lower))
    }
}

/// Extract the host component of a URL string, without a URL parser.
fn url_host(url: &str) -> String {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("");
    let host = match authority.rfind('@') {
        Some(idx) => &authority[idx + 1..],
        None => authority,
    };
    match host.rfind(':') {
        Some(idx) if host[idx + 1..].chars().all(|c| c.is_ascii_digit()) => {
            host[..idx].to_string()
        }
        _ => host.to_string(),
    }
}

/// Extract the path component of a URL string.
fn url_path(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    match rest.find('/') {
        Some(idx) => rest[idx..].split(['?', '#']).next().unwrap_or(""),
        None => "",
    }
}

/// Extremely small rule syntax compatible with a subset of EasyList.
fn matches_rule(rule: &str, host: &str, url: &str) -> bool {
    if let Some(domain) = rule.strip_prefix("||") {
        return host.ends_with(&domain.to_lowercase());
    }
    if let Some(prefix) = rule.strip_prefix('|') {
        return url.starts_with(&prefix.to_lowercase());
    }
    if let Some(needle) = rule.strip_prefix('*') {
        return url.contains(&needle.to_lowercase());
    }
    if let Some(needle) = rule.strip_suffix('^') {
        return url.contains(&needle.to_lowercase());
    }
    let rule = rule.to_lowercase();
    host.contains(&rule) || url.contains(&rule)
}
