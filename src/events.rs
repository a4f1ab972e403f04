//! The page-loaded notification contract.
//!
//! The router fires [`PageLoaded`] after every content swap. Consumers are
//! the transition controller and presentational widgets that must
//! re-initialize against the replaced DOM subtree. In the browser the same
//! payload is re-broadcast as a `page-loaded` `CustomEvent` whose `detail`
//! is the object `{"page": "<route key>"}`, so listeners read
//! `event.detail.page`.

use serde::{Deserialize, Serialize};

use crate::routing::RouteKey;

/// Name of the DOM event carrying [`PageLoaded`].
pub const PAGE_LOADED_EVENT: &str = "page-loaded";

/// Payload of the page-loaded notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLoaded {
    /// Route key of the page now displayed.
    pub page: RouteKey,
}

impl PageLoaded {
    /// JSON text of the DOM event's `detail` object.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({ "page": self.page.as_str() }).to_string()
    }
}

/// Observer of page-loaded notifications.
pub trait PageLoadedListener {
    /// Called once per completed navigation, after the swap and title
    /// update.
    fn on_page_loaded(&self, event: &PageLoaded);
}

impl<F: Fn(&PageLoaded)> PageLoadedListener for F {
    fn on_page_loaded(&self, event: &PageLoaded) {
        self(event);
    }
}
