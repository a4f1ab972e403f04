//! Browser history records and the history capability the router drives.

use serde::{Deserialize, Serialize};

use super::route_table::RouteKey;
use crate::error::NavError;

/// State record pushed with every user-initiated navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Route key the entry points at.
    pub page: RouteKey,
}

impl HistoryEntry {
    /// Entry for `page`.
    #[must_use]
    pub fn new(page: RouteKey) -> Self {
        Self { page }
    }

    /// Serialize as the JSON payload stored in the history stack.
    pub fn to_json(&self) -> Result<String, NavError> {
        serde_json::to_string(self)
            .map_err(|e| NavError::ConfigParse(e.to_string()))
    }

    /// Parse a JSON payload read back from the history stack. Returns
    /// `None` for foreign or empty states.
    #[must_use]
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

/// Browser history and visible-URL access.
pub trait History {
    /// Current location path (e.g. `/about`).
    fn current_path(&self) -> String;

    /// Push `entry` and make `url` the visible location.
    fn push(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_payload_is_page_object() {
        let entry = HistoryEntry::new(RouteKey::new("about"));
        assert_eq!(entry.to_json().unwrap(), r#"{"page":"about"}"#);
        assert_eq!(
            HistoryEntry::from_json(r#"{"page":"about"}"#),
            Some(entry)
        );
    }

    #[test]
    fn test_foreign_state_is_ignored() {
        assert_eq!(HistoryEntry::from_json("{}"), None);
        assert_eq!(HistoryEntry::from_json("null"), None);
    }
}
