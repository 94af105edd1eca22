use std::path::PathBuf;

use log::{debug, info, warn};

use crate::adblock::rules::AdBlocker;
use crate::engine::agent::{DocumentAgent, FeedbackSink};
use crate::engine::protocol::{
    EngineEvent, EngineRequest, HistoryItem, KeyPress, Modifiers, ScriptPurpose, ScriptToken,
    ViewId,
};
use crate::engine::session::EngineLink;
use crate::error::ShellError;
use crate::hints::coordinator::HintCoordinator;
use crate::shell::downloads::{download_file_name, resolve_download_path};
use crate::shell::navigation::{build_media_wrapper, is_media_url, resolve_address, start_page_html};
use crate::shell::tabs::{Tab, TabStrip};
use crate::storage::history::BrowserHistory;
use crate::storage::settings::BrowserSettings;

const STATUS_SHORT_MS: u64 = 2000;
const STATUS_LONG_MS: u64 = 4000;

const SCROLL_DOWN_SCRIPT: &str = "window.scrollBy({top: 120, left: 0, behavior: 'smooth'});";
const SCROLL_UP_SCRIPT: &str = "window.scrollBy({top: -120, left: 0, behavior: 'smooth'});";

const CLEAR_FOCUS_SCRIPT: &str = r#"(function() {
    let cleared = false;
    const active = document.activeElement;
    if (active && (active.tagName === 'INPUT' || active.tagName === 'TEXTAREA' || active.isContentEditable)) {
        active.blur();
        cleared = true;
    }
    const selection = window.getSelection();
    if (selection && selection.rangeCount > 0) {
        selection.removeAllRanges();
        cleared = true;
    }
    return cleared;
})();"#;

#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub homepage: String,
    pub downloads_dir: PathBuf,
}

/// Shell-side controller for one browser window.
///
/// The engine host owns the widgets; this object owns the state and
/// answers every host event: tabs, address handling, shortcuts, the ad
/// filter, history, settings, downloads, and the hint coordinator.
pub struct ShellWindow {
    tabs: TabStrip,
    settings: BrowserSettings,
    history: BrowserHistory,
    adblocker: AdBlocker,
    hints: HintCoordinator,
    options: WindowOptions,
    fullscreen: bool,
    next_view: u64,
}

impl ShellWindow {
    pub fn new(
        settings: BrowserSettings,
        history: BrowserHistory,
        adblocker: AdBlocker,
        options: WindowOptions,
    ) -> Self {
        Self {
            tabs: TabStrip::new(),
            settings,
            history,
            adblocker,
            hints: HintCoordinator::new(),
            options,
            fullscreen: false,
            next_view: 1,
        }
    }

    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    pub fn history(&self) -> &BrowserHistory {
        &self.history
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn adblocker(&self) -> &AdBlocker {
        &self.adblocker
    }

    pub fn hints(&self) -> &HintCoordinator {
        &self.hints
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Apply startup state and open the initial tabs: the start page,
    /// plus the CLI-provided URL when there is one.
    pub fn startup<E>(&mut self, start_url: Option<&str>, engine: &mut E) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        engine.send(&EngineRequest::SetColorScheme {
            dark: self.settings.dark_mode,
        })?;
        self.open_tab(None, true, engine)?;
        if let Some(url) = start_url {
            let target = resolve_address(url).unwrap_or_else(|| url.to_string());
            self.open_tab(Some(&target), true, engine)?;
        }
        Ok(())
    }

    /// Handle one host event. Returns false when the event loop should
    /// stop.
    pub fn handle_event<E>(&mut self, event: EngineEvent, engine: &mut E) -> Result<bool, ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        match event {
            EngineEvent::Ready => {}

            EngineEvent::KeyPressed { view, key } => {
                if self.tabs.contains(view) {
                    if !self.hints.handle_key(view, &key, engine) {
                        self.handle_shortcut(&key, engine)?;
                    }
                }
            }

            EngineEvent::UrlChanged { view, url } => self.on_url_changed(view, url, engine)?,

            EngineEvent::TitleChanged { view, title } => {
                if let Some(tab) = self.tabs.get_mut(view) {
                    tab.title = if title.trim().is_empty() {
                        "New Tab".to_string()
                    } else {
                        title
                    };
                }
            }

            EngineEvent::LoadFinished { view, ok } => self.on_load_finished(view, ok, engine),

            EngineEvent::AddressEntered { text } => {
                if let Some(url) = resolve_address(&text) {
                    self.navigate_active(&url, engine)?;
                }
            }

            EngineEvent::HomeRequested => self.load_homepage(engine)?,

            EngineEvent::NewTabRequested => {
                self.open_tab(None, true, engine)?;
                engine.send(&EngineRequest::FocusAddressBar)?;
            }

            EngineEvent::TabCloseRequested { view } => self.close_tab(view, engine)?,

            EngineEvent::TabSelected { view } => {
                if self.tabs.set_active(view) {
                    let text = self.displayed_url(view);
                    engine.send(&EngineRequest::SetAddressText { text })?;
                    engine.send(&EngineRequest::FocusView { view })?;
                }
            }

            EngineEvent::ScriptResult { token, value } => {
                if self.tabs.contains(token.view) {
                    self.hints.handle_script_result(token, &value, engine);
                } else {
                    debug!("Discarding script result for closed {:?}", token.view);
                }
            }

            EngineEvent::RequestIntercepted {
                request,
                url,
                resource,
            } => {
                let block = self.adblocker.should_block(&url, resource);
                if block {
                    debug!("Blocked request to {}", url);
                }
                engine.send(&EngineRequest::SetRequestDecision { request, block })?;
            }

            EngineEvent::DownloadRequested {
                download,
                url,
                suggested_name,
            } => {
                let name = download_file_name(&suggested_name, &url);
                let path = resolve_download_path(&self.options.downloads_dir, &name);
                info!("Accepting download of {} to {}", url, path.display());
                engine.send(&EngineRequest::AcceptDownload {
                    download,
                    path: path.display().to_string(),
                })?;
                engine.show_status(&format!("Downloading {}", name), STATUS_SHORT_MS);
            }

            EngineEvent::DownloadFinished { download, ok } => {
                debug!("Download {} finished (ok={})", download, ok);
                if ok {
                    engine.show_status("Download complete", STATUS_SHORT_MS);
                } else {
                    engine.show_status("Download failed", STATUS_LONG_MS);
                }
            }

            EngineEvent::FullscreenRequested { view, on } => {
                engine.send(&EngineRequest::AcceptFullscreen { view, on })?;
                self.fullscreen = on;
            }

            EngineEvent::HistoryRequested => {
                let entries = self
                    .history
                    .entries()
                    .map(|e| HistoryItem {
                        url: e.url.clone(),
                        title: e.title.clone(),
                        timestamp: e.timestamp.clone(),
                    })
                    .collect();
                engine.send(&EngineRequest::ShowHistory { entries })?;
            }

            EngineEvent::HistoryActivated { url } => self.navigate_active(&url, engine)?,

            EngineEvent::SettingsRequested => {
                engine.send(&EngineRequest::ShowSettings {
                    dark_mode: self.settings.dark_mode,
                    zoom_factor: self.settings.zoom_factor,
                    adblock_enabled: self.settings.adblock_enabled,
                })?;
            }

            EngineEvent::SettingsSubmitted {
                dark_mode,
                zoom_factor,
                adblock_enabled,
            } => {
                self.settings
                    .update(Some(dark_mode), Some(zoom_factor), Some(adblock_enabled));
                self.apply_settings(engine)?;
                engine.show_status("Settings updated", STATUS_SHORT_MS);
            }

            EngineEvent::WindowClosed => return Ok(false),
        }
        Ok(true)
    }

    /// Open a new tab, loading `url` or the generated start page.
    pub fn open_tab<E>(
        &mut self,
        url: Option<&str>,
        focus: bool,
        engine: &mut E,
    ) -> Result<ViewId, ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        let view = ViewId(self.next_view);
        self.next_view += 1;

        engine.send(&EngineRequest::CreateView { view })?;
        engine.send(&EngineRequest::SetZoom {
            view,
            factor: self.settings.zoom_factor,
        })?;
        self.tabs.push(Tab::new(view), focus);
        if focus {
            engine.send(&EngineRequest::SelectView { view })?;
        }

        match url {
            Some(url) => {
                info!("Opening {} in new tab", url);
                engine.send(&EngineRequest::Navigate {
                    view,
                    url: url.to_string(),
                })?;
            }
            None => {
                engine.send(&EngineRequest::LoadHtml {
                    view,
                    html: start_page_html(),
                    base_url: "about:blank".to_string(),
                })?;
            }
        }
        Ok(view)
    }

    fn close_tab<E>(&mut self, view: ViewId, engine: &mut E) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        if !self.tabs.contains(view) {
            return Ok(());
        }

        if self.tabs.len() == 1 {
            // The last tab resets to the start page instead of closing.
            self.hints.handle_view_closed(view);
            if let Some(tab) = self.tabs.get_mut(view) {
                tab.url.clear();
                tab.title = "New Tab".to_string();
                tab.media_source = None;
            }
            engine.send(&EngineRequest::LoadHtml {
                view,
                html: start_page_html(),
                base_url: "about:blank".to_string(),
            })?;
            engine.send(&EngineRequest::SetAddressText {
                text: String::new(),
            })?;
            return Ok(());
        }

        self.hints.handle_view_closed(view);
        self.tabs.remove(view);
        engine.send(&EngineRequest::CloseView { view })?;

        if let Some(active) = self.tabs.active_view() {
            engine.send(&EngineRequest::SelectView { view: active })?;
            let text = self.displayed_url(active);
            engine.send(&EngineRequest::SetAddressText { text })?;
        }
        Ok(())
    }

    fn on_url_changed<E>(
        &mut self,
        view: ViewId,
        url: String,
        engine: &mut E,
    ) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        if !self.tabs.contains(view) {
            return Ok(());
        }

        // A hint session never survives a navigation.
        self.hints.handle_url_changed(view, engine);

        let mut wrapper = None;
        if let Some(tab) = self.tabs.get_mut(view) {
            if is_media_url(&url) {
                if tab.media_source.as_deref() != Some(url.as_str()) {
                    tab.media_source = Some(url.clone());
                    tab.url = url.clone();
                    wrapper = build_media_wrapper(&url);
                }
            } else {
                if tab.media_source.take().is_some() {
                    debug!("Cleared media wrapper after navigating away");
                }
                tab.url = url.clone();
            }
        }

        if let Some(html) = wrapper {
            info!("Embedding media wrapper for {}", url);
            engine.send(&EngineRequest::LoadHtml {
                view,
                html,
                base_url: url.clone(),
            })?;
        }

        if self.tabs.active_view() == Some(view) {
            let text = self.displayed_url(view);
            engine.send(&EngineRequest::SetAddressText { text })?;
        }
        Ok(())
    }

    fn on_load_finished<E>(&mut self, view: ViewId, ok: bool, engine: &mut E)
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        let Some(tab) = self.tabs.get(view) else {
            return;
        };
        let active = self.tabs.active_view() == Some(view);

        if ok {
            info!("Load finished for {}", tab.url);
            if active {
                engine.show_status("Loaded", STATUS_SHORT_MS);
            }
            let url = tab.url.clone();
            let title = tab.title.clone();
            self.history.add_entry(&url, Some(&title));
        } else {
            warn!("Load failure for {}", tab.url);
            if active {
                engine.show_status("Failed to load page", STATUS_LONG_MS);
            }
        }
    }

    fn handle_shortcut<E>(&mut self, key: &KeyPress, engine: &mut E) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        let Some(active) = self.tabs.active_view() else {
            return Ok(());
        };
        let mods = key.modifiers;

        match key.key.as_str() {
            "h" if mods.shift && !mods.has_command() => {
                engine.send(&EngineRequest::Back { view: active })?;
            }
            "l" if mods.shift && !mods.has_command() => {
                engine.send(&EngineRequest::Forward { view: active })?;
            }
            "l" if mods.control => engine.send(&EngineRequest::FocusAddressBar)?,
            "r" if mods == Modifiers::NONE => {
                engine.send(&EngineRequest::Reload { view: active })?;
            }
            "o" if mods == Modifiers::NONE => engine.send(&EngineRequest::FocusAddressBar)?,
            "j" if mods == Modifiers::NONE => {
                self.run_page_script(active, SCROLL_DOWN_SCRIPT, engine);
            }
            "k" if mods == Modifiers::NONE => {
                self.run_page_script(active, SCROLL_UP_SCRIPT, engine);
            }
            "escape" if mods == Modifiers::NONE => {
                self.run_page_script(active, CLEAR_FOCUS_SCRIPT, engine);
                engine.send(&EngineRequest::FocusView { view: active })?;
            }
            "t" if mods.control || mods.shift => {
                self.open_tab(None, true, engine)?;
                engine.send(&EngineRequest::FocusAddressBar)?;
            }
            "w" if mods.control || mods.shift => self.close_tab(active, engine)?,
            "f" if mods == Modifiers::NONE => self.hints.trigger(active, engine),
            _ => {}
        }
        Ok(())
    }

    /// Load the homepage in the active tab (the Home action).
    pub fn load_homepage<E>(&mut self, engine: &mut E) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        let homepage = self.options.homepage.clone();
        self.navigate_active(&homepage, engine)
    }

    fn navigate_active<E>(&mut self, url: &str, engine: &mut E) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        match self.tabs.active_view() {
            Some(view) => engine.send(&EngineRequest::Navigate {
                view,
                url: url.to_string(),
            }),
            None => self.open_tab(Some(url), true, engine).map(|_| ()),
        }
    }

    fn apply_settings<E>(&mut self, engine: &mut E) -> Result<(), ShellError>
    where
        E: EngineLink + DocumentAgent + FeedbackSink,
    {
        engine.send(&EngineRequest::SetColorScheme {
            dark: self.settings.dark_mode,
        })?;
        for tab in self.tabs.iter() {
            engine.send(&EngineRequest::SetZoom {
                view: tab.view,
                factor: self.settings.zoom_factor,
            })?;
        }
        self.adblocker.set_enabled(self.settings.adblock_enabled);
        Ok(())
    }

    fn run_page_script<E>(&mut self, view: ViewId, script: &str, engine: &mut E)
    where
        E: DocumentAgent,
    {
        let token = ScriptToken {
            view,
            purpose: ScriptPurpose::PageControl,
        };
        engine.run_script(token, script.to_string());
    }

    /// Address-bar text for a view: the logical URL, with the internal
    /// blank page shown as empty.
    fn displayed_url(&self, view: ViewId) -> String {
        match self.tabs.get(view) {
            Some(tab) if tab.url != "about:blank" => tab.url.clone(),
            _ => String::new(),
        }
    }
}
