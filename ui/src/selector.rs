//! State of the collection selector dropdown.
//!
//! The selector never owns the selected collection. It reports choices as
//! [`SelectorEvent`]s and the parent decides what the selection is.

pub const LOAD_FAILED: &str = "Failed to load collections";

/// Fetch state of the collection name list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamesState {
    Loading,
    Loaded(Vec<String>),
    Failed(String),
}

/// Messages emitted to the owner of the selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorEvent {
    Selected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorState {
    pub names: NamesState,
    pub search: String,
    pub open: bool,
}

impl Default for SelectorState {
    fn default() -> Self {
        Self {
            names: NamesState::Loading,
            search: String::new(),
            open: false,
        }
    }
}

impl SelectorState {
    pub fn loaded(&mut self, names: Vec<String>) {
        self.names = NamesState::Loaded(names);
    }

    pub fn failed(&mut self) {
        self.names = NamesState::Failed(LOAD_FAILED.to_string());
        self.open = false;
    }

    /// Start another fetch after a failure.
    pub fn retry(&mut self) {
        self.names = NamesState::Loading;
        self.open = false;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.names, NamesState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.names {
            NamesState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Interaction is only possible once names are loaded.
    pub fn is_interactive(&self) -> bool {
        matches!(self.names, NamesState::Loaded(_))
    }

    pub fn toggle(&mut self) {
        if self.is_interactive() {
            self.open = !self.open;
        }
    }

    /// Pointer-down outside the control: close, keep the selection.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn select(&mut self, name: &str) -> SelectorEvent {
        self.open = false;
        SelectorEvent::Selected(name.to_string())
    }

    /// Names matching the search text, in server order
    pub fn filtered(&self) -> Vec<String> {
        match &self.names {
            NamesState::Loaded(names) => filter_names(names, &self.search),
            _ => Vec::new(),
        }
    }

    /// Default selection: the first name, once loaded, when nothing is selected.
    pub fn auto_select(&self, current: Option<&str>) -> Option<SelectorEvent> {
        if current.is_some_and(|c| !c.is_empty()) {
            return None;
        }
        match &self.names {
            NamesState::Loaded(names) => names.first().map(|n| SelectorEvent::Selected(n.clone())),
            _ => None,
        }
    }
}

/// Case-insensitive substring match over the full list.
pub fn filter_names(names: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return names.to_vec();
    }
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
