use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reserved route key that must always resolve.
pub const NOT_FOUND_KEY: &str = "404";

/// Router wiring: which elements hold content and how pages are named.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Router", inline)]
#[serde(default)]
pub struct RouterOptions {
    /// Id of the container whose children are replaced on navigation.
    pub content_container_id: String,
    /// Id of the region extracted from each fetched fragment.
    pub content_region_id: String,
    /// Route key served at the root path.
    pub home_key: String,
    /// Appended to every page title as `"<title> | <site_title>"`.
    pub site_title: Option<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            content_container_id: "main-page".to_owned(),
            content_region_id: "page-content".to_owned(),
            home_key: "home".to_owned(),
            site_title: None,
        }
    }
}

impl RouterOptions {
    /// Compose the document title for a page title.
    #[must_use]
    pub fn document_title(&self, page_title: &str) -> String {
        match &self.site_title {
            Some(site) if !site.is_empty() => format!("{page_title} | {site}"),
            _ => page_title.to_owned(),
        }
    }
}
