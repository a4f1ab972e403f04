//! [`History`] over `window.history` and `window.location`.

use web_sys::Window;

use super::js_error;
use crate::error::NavError;
use crate::routing::{History, HistoryEntry};

/// The browser's session history.
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    /// History of `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl History for BrowserHistory {
    fn current_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_owned())
    }

    fn push(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavError> {
        let state = js_sys::JSON::parse(&entry.to_json()?)
            .map_err(|e| NavError::Dom(js_error(&e)))?;
        self.window
            .history()
            .and_then(|history| {
                history.push_state_with_url(&state, "", Some(url))
            })
            .map_err(|e| NavError::Dom(js_error(&e)))
    }
}

/// Read the history entry carried by a `popstate` event's state.
#[must_use]
pub fn entry_from_state(state: &wasm_bindgen::JsValue) -> Option<HistoryEntry> {
    if state.is_null() || state.is_undefined() {
        return None;
    }
    let json = js_sys::JSON::stringify(state).ok()?;
    HistoryEntry::from_json(&String::from(json))
}
