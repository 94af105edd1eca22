use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shell-allocated identifier for one engine view (one tab's web page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

/// Why a script was sent, echoed back with its result so the shell can
/// route the response without call-order assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPurpose {
    HintDiscovery,
    HintOverlay,
    HintActivate,
    PageControl,
}

/// Identity token carried by every script request and echoed on its
/// result event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptToken {
    pub view: ViewId,
    pub purpose: ScriptPurpose,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub control: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    pub const CONTROL: Modifiers = Modifiers {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// True when a command-style modifier is held (anything but Shift).
    pub fn has_command(&self) -> bool {
        self.control || self.alt || self.meta
    }
}

/// One keystroke as delivered by the host, in user-typed order.
///
/// `key` is a lowercase key name ("a", "escape", "enter", "backspace");
/// `text` carries the printable character produced, if any. The host only
/// forwards keys the page itself did not consume (editable content keeps
/// its input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn named(key: &str) -> Self {
        Self {
            key: key.to_string(),
            text: None,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn character(c: char) -> Self {
        Self {
            key: c.to_lowercase().to_string(),
            text: Some(c.to_string()),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Resource classification for intercepted network requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Stylesheet,
    Script,
    Image,
    Font,
    Media,
    Video,
    Plugin,
    Xhr,
    Other,
}

/// History entry as presented to the host's history dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub url: String,
    pub title: String,
    pub timestamp: String,
}

/// Request sent to the engine host over stdin (one JSON line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum EngineRequest {
    CreateView { view: ViewId },
    CloseView { view: ViewId },
    SelectView { view: ViewId },
    Navigate { view: ViewId, url: String },
    LoadHtml { view: ViewId, html: String, base_url: String },
    Back { view: ViewId },
    Forward { view: ViewId },
    Reload { view: ViewId },
    SetZoom { view: ViewId, factor: f64 },
    SetColorScheme { dark: bool },
    FocusAddressBar,
    FocusView { view: ViewId },
    SetAddressText { text: String },
    RunScript { token: ScriptToken, script: String },
    ShowStatus { message: String, duration_ms: u64 },
    ShowHistory { entries: Vec<HistoryItem> },
    ShowSettings { dark_mode: bool, zoom_factor: f64, adblock_enabled: bool },
    SetRequestDecision { request: u64, block: bool },
    AcceptDownload { download: u64, path: String },
    AcceptFullscreen { view: ViewId, on: bool },
    Shutdown,
}

/// Event received from the engine host over stdout (one JSON line).
///
/// Script errors inside the page never surface as protocol errors: the
/// host resolves them to a null `value` on the matching `ScriptResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    Ready,
    KeyPressed { view: ViewId, key: KeyPress },
    UrlChanged { view: ViewId, url: String },
    TitleChanged { view: ViewId, title: String },
    LoadFinished { view: ViewId, ok: bool },
    AddressEntered { text: String },
    HomeRequested,
    NewTabRequested,
    TabCloseRequested { view: ViewId },
    TabSelected { view: ViewId },
    ScriptResult {
        token: ScriptToken,
        #[serde(default)]
        value: Value,
    },
    RequestIntercepted { request: u64, url: String, resource: ResourceType },
    DownloadRequested { download: u64, url: String, suggested_name: String },
    DownloadFinished { download: u64, ok: bool },
    FullscreenRequested { view: ViewId, on: bool },
    HistoryRequested,
    HistoryActivated { url: String },
    SettingsRequested,
    SettingsSubmitted { dark_mode: bool, zoom_factor: f64, adblock_enabled: bool },
    WindowClosed,
}
