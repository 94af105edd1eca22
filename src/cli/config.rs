use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOMEPAGE: &str = "https://duckduckgo.com";
pub const DEFAULT_HOST_CMD: &str = "kite-host";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "kite",
    version,
    about = "Lightweight keyboard-driven web browser shell"
)]
pub struct Cli {
    /// Optional URL to load on startup
    pub start: Option<String>,

    /// Homepage used by the Home action
    #[arg(long)]
    pub homepage: Option<String>,

    /// Path to an additional ad-block filter list (can be provided
    /// multiple times)
    #[arg(long = "filter-list")]
    pub filter_lists: Vec<String>,

    /// URL of a remote ad-block filter list (can be provided multiple
    /// times; fetched at startup and cached)
    #[arg(long = "filter-url")]
    pub filter_urls: Vec<String>,

    /// Start without the ad blocker enabled
    #[arg(long)]
    pub no_adblock: bool,

    /// Engine host executable
    #[arg(long)]
    pub host_cmd: Option<String>,

    /// Path to config file (default: kite.yaml in current dir)
    #[arg(long)]
    pub config: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `kite.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub filter_lists: Vec<String>,
    #[serde(default)]
    pub filter_urls: Vec<String>,
    #[serde(default)]
    pub host_cmd: Option<String>,
}

/// Load config from a YAML file. Returns defaults if the file is missing
/// or malformed.
pub fn load_config(path: Option<&str>) -> LaunchConfig {
    let config_path = path.unwrap_or("kite.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => LaunchConfig::default(),
    }
}

// ============================================================================
// Resolved launch options (CLI > config file > defaults)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub start_url: Option<String>,
    pub homepage: String,
    pub filter_lists: Vec<PathBuf>,
    pub filter_urls: Vec<String>,
    pub adblock_enabled: bool,
    pub host_cmd: String,
}

pub fn resolve_options(cli: &Cli, config: &LaunchConfig) -> LaunchOptions {
    let homepage = cli
        .homepage
        .clone()
        .or_else(|| config.homepage.clone())
        .unwrap_or_else(|| DEFAULT_HOMEPAGE.to_string());

    let mut filter_lists: Vec<PathBuf> = config.filter_lists.iter().map(PathBuf::from).collect();
    filter_lists.extend(cli.filter_lists.iter().map(PathBuf::from));

    let mut filter_urls = config.filter_urls.clone();
    filter_urls.extend(cli.filter_urls.iter().cloned());

    let host_cmd = cli
        .host_cmd
        .clone()
        .or_else(|| config.host_cmd.clone())
        .unwrap_or_else(|| DEFAULT_HOST_CMD.to_string());

    LaunchOptions {
        start_url: cli.start.clone(),
        homepage,
        filter_lists,
        filter_urls,
        adblock_enabled: !cli.no_adblock,
        host_cmd,
    }
}
