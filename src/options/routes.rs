use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One navigable page as declared in the site configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Route")]
pub struct RouteEntry {
    /// Route key, e.g. `"about"`. The home page uses the router's home key.
    pub key: String,
    /// Path of the HTML fragment served for this page.
    pub source: String,
    /// Document title shown while the page is current.
    pub title: String,
    /// Whether the page is listed in the navigation menu.
    #[serde(default = "default_show_in_nav")]
    pub show_in_nav: bool,
    /// Position in the navigation menu (ascending).
    #[serde(default)]
    pub order: i32,
}

fn default_show_in_nav() -> bool {
    true
}

impl RouteEntry {
    /// Build an entry that is listed in the navigation menu.
    pub fn new(
        key: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            title: title.into(),
            show_in_nav: true,
            order,
        }
    }

    /// Hide this entry from the navigation menu.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.show_in_nav = false;
        self
    }
}
