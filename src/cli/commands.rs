use log::{debug, info};

use crate::adblock::rules::AdBlocker;
use crate::adblock::sources::load_rule_sources;
use crate::cli::config::LaunchOptions;
use crate::engine::session::EngineSession;
use crate::shell::window::{ShellWindow, WindowOptions};
use crate::storage::history::{BrowserHistory, MAX_HISTORY_ENTRIES};
use crate::storage::paths;
use crate::storage::settings::BrowserSettings;

/// Launch the engine host and run the browser until the window closes.
pub fn run_browser(options: LaunchOptions) -> Result<(), Box<dyn std::error::Error>> {
    let settings = BrowserSettings::load(None);
    let history = BrowserHistory::load(None, MAX_HISTORY_ENTRIES);

    let rules = load_rule_sources(
        &options.filter_lists,
        &options.filter_urls,
        &paths::filter_cache_dir(),
    );
    info!("Loaded {} filter rules", rules.len());
    let adblocker = AdBlocker::new(rules, settings.adblock_enabled && options.adblock_enabled);

    let mut engine = EngineSession::launch(&options.host_cmd)?;

    let mut window = ShellWindow::new(
        settings,
        history,
        adblocker,
        WindowOptions {
            homepage: options.homepage.clone(),
            downloads_dir: paths::download_dir(),
        },
    );
    window.startup(options.start_url.as_deref(), &mut engine)?;

    while let Some(event) = engine.next_event()? {
        debug!("Engine event: {:?}", event);
        if !window.handle_event(event, &mut engine)? {
            break;
        }
    }

    info!("Window closed, shutting down");
    Ok(())
}
