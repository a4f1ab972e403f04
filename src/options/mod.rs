//! Site configuration with TOML and JSON loading.
//!
//! The route registry, router wiring and transition tuning are consolidated
//! here. Natively the configuration is read from a TOML file; in the browser
//! it arrives as the JSON object the static build injects into the page.

mod router;
mod routes;
mod transition;

use std::path::Path;

pub use router::{RouterOptions, NOT_FOUND_KEY};
pub use routes::RouteEntry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transition::{CommitStrategy, TransitionOptions};

use crate::error::NavError;

/// Top-level configuration. All sections use `#[serde(default)]` so partial
/// files (e.g. only overriding `[transition]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SiteConfig {
    /// Ordered page registry.
    pub routes: Vec<RouteEntry>,
    /// Router wiring.
    pub router: RouterOptions,
    /// Transition tuning.
    pub transition: TransitionOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            routes: vec![
                RouteEntry::new("home", "/home.html", "Home", 0),
                RouteEntry::new(
                    NOT_FOUND_KEY,
                    "/pages/404.html",
                    "Page Not Found",
                    i32::MAX,
                )
                .hidden(),
            ],
            router: RouterOptions::default(),
            transition: TransitionOptions::default(),
        }
    }
}

impl SiteConfig {
    /// Generate JSON Schema describing the configuration.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(SiteConfig)
    }

    /// Load configuration from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(NavError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, NavError> {
        toml::from_str(content)
            .map_err(|e| NavError::ConfigParse(e.to_string()))
    }

    /// Parse configuration from JSON text (the injected `SETTINGS` object).
    pub fn from_json_str(content: &str) -> Result<Self, NavError> {
        serde_json::from_str(content)
            .map_err(|e| NavError::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = SiteConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
[transition]
stretch_delay_ms = 100
commit = { kind = "fixed_delay", delay_ms = 600 }
"#;
        let config = SiteConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.transition.stretch_delay_ms, 100);
        assert_eq!(
            config.transition.commit,
            CommitStrategy::FixedDelay { delay_ms: 600 }
        );
        assert_eq!(config.transition.surface_id, "tetris-canvas");
        assert_eq!(config.router.home_key, "home");
        assert_eq!(config.routes.len(), 2);
    }

    #[test]
    fn test_routes_parse_from_injected_json() {
        let json = r#"{
            "routes": [
                { "key": "home", "source": "/home.html", "title": "Home" },
                { "key": "about", "source": "/pages/about.html",
                  "title": "About", "order": 2 },
                { "key": "404", "source": "/pages/404.html",
                  "title": "Not Found", "show_in_nav": false }
            ],
            "router": { "site_title": "Portfolio" }
        }"#;
        let config = SiteConfig::from_json_str(json).unwrap();
        assert_eq!(config.routes.len(), 3);
        assert!(config.routes[0].show_in_nav);
        assert_eq!(config.routes[1].order, 2);
        assert!(!config.routes[2].show_in_nav);
        assert_eq!(config.router.document_title("About"), "About | Portfolio");
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let err = SiteConfig::from_toml_str("routes = 3").unwrap_err();
        assert!(matches!(err, NavError::ConfigParse(_)));
    }

    #[test]
    fn test_schema_has_expected_sections() {
        let schema_value =
            serde_json::to_value(SiteConfig::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("routes"));
        assert!(props.contains_key("router"));
        assert!(props.contains_key("transition"));
    }
}
