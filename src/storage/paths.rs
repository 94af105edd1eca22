use std::path::PathBuf;

/// Per-user configuration directory (`~/.config/kite` on Linux).
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kite")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn history_path() -> PathBuf {
    config_dir().join("history.json")
}

/// Cache directory for downloaded filter lists.
pub fn filter_cache_dir() -> PathBuf {
    config_dir().join("filters")
}

/// Directory that accepted downloads are written into.
pub fn download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}
