use crate::engine::protocol::ViewId;

/// One tab's shell-side state. The engine host owns the widget; this is
/// the book-keeping the shell needs to label, persist, and route events.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub view: ViewId,
    pub url: String,
    pub title: String,
    /// Original media URL when the tab is showing a generated inline
    /// player instead of the raw file.
    pub media_source: Option<String>,
}

impl Tab {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            url: String::new(),
            title: "New Tab".to_string(),
            media_source: None,
        }
    }
}

/// Ordered tab list with one active tab.
#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: usize,
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn push(&mut self, tab: Tab, focus: bool) {
        self.tabs.push(tab);
        if focus {
            self.active = self.tabs.len() - 1;
        }
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.tabs.iter().any(|t| t.view == view)
    }

    pub fn get(&self, view: ViewId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.view == view)
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.view == view)
    }

    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active().map(|t| t.view)
    }

    pub fn set_active(&mut self, view: ViewId) -> bool {
        match self.tabs.iter().position(|t| t.view == view) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Remove a tab, keeping the active index on the nearest surviving
    /// neighbour. Returns the removed tab.
    pub fn remove(&mut self, view: ViewId) -> Option<Tab> {
        let index = self.tabs.iter().position(|t| t.view == view)?;
        let removed = self.tabs.remove(index);
        if self.active > index || self.active >= self.tabs.len() {
            self.active = self.active.saturating_sub(1);
        }
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }
}
