//! Immutable page registry and URL ⇄ route key mapping.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::options::{RouteEntry, SiteConfig, NOT_FOUND_KEY};

/// Canonical identifier of a navigable page (`"home"`, `"about"`, `"404"`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RouteKey(String);

impl RouteKey {
    /// Wrap a route key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The reserved not-found key.
    #[must_use]
    pub fn not_found() -> Self {
        Self(NOT_FOUND_KEY.to_owned())
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved not-found key.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.0 == NOT_FOUND_KEY
    }

    /// Whether this is the empty key, an alias of the home route.
    #[must_use]
    pub fn is_home_alias(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl PartialEq<str> for RouteKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RouteKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Static metadata describing one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    /// Path of the fragment fetched for this page.
    pub source_path: String,
    /// Page title.
    pub title: String,
    /// Whether the page is listed in the navigation menu.
    pub show_in_nav: bool,
    /// Menu position (ascending).
    pub order: i32,
}

impl From<&RouteEntry> for PageDescriptor {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            source_path: entry.source.clone(),
            title: entry.title.clone(),
            show_in_nav: entry.show_in_nav,
            order: entry.order,
        }
    }
}

/// Mapping from route key to [`PageDescriptor`], built once at startup.
///
/// The reserved [`NOT_FOUND_KEY`] route is guaranteed to exist, so every
/// lookup through [`RouteTable::resolve`] yields a descriptor.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pages: FxHashMap<RouteKey, PageDescriptor>,
    home: RouteKey,
    not_found: RouteKey,
}

impl RouteTable {
    /// Build and validate the table from the site configuration.
    pub fn from_config(config: &SiteConfig) -> Result<Self, NavError> {
        let mut pages = FxHashMap::default();
        for entry in &config.routes {
            let key = match entry.key.trim_matches('/') {
                "" => config.router.home_key.as_str(),
                key => key,
            };
            if key.is_empty() {
                return Err(NavError::InvalidConfig(
                    "home key must not be empty".to_owned(),
                ));
            }
            let previous =
                pages.insert(RouteKey::new(key), PageDescriptor::from(entry));
            if previous.is_some() {
                return Err(NavError::InvalidConfig(format!(
                    "duplicate route key '{key}'"
                )));
            }
        }

        let not_found = RouteKey::not_found();
        if !pages.contains_key(&not_found) {
            return Err(NavError::InvalidConfig(format!(
                "reserved route '{NOT_FOUND_KEY}' is missing"
            )));
        }
        let home = RouteKey::new(config.router.home_key.as_str());
        if !pages.contains_key(&home) {
            log::warn!("home route '{home}' is not registered");
        }

        Ok(Self {
            pages,
            home,
            not_found,
        })
    }

    /// The key served at the root path.
    #[must_use]
    pub fn home(&self) -> &RouteKey {
        &self.home
    }

    /// The reserved not-found key.
    #[must_use]
    pub fn not_found(&self) -> &RouteKey {
        &self.not_found
    }

    /// `key` with the empty alias replaced by the home key.
    #[must_use]
    pub fn canonical_key<'a>(&'a self, key: &'a RouteKey) -> &'a RouteKey {
        if key.is_home_alias() {
            &self.home
        } else {
            key
        }
    }

    /// Whether `key` (or the route it aliases) is registered.
    #[must_use]
    pub fn contains(&self, key: &RouteKey) -> bool {
        self.pages.contains_key(self.canonical_key(key))
    }

    /// Descriptor for `key`, if registered.
    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<&PageDescriptor> {
        self.pages.get(self.canonical_key(key))
    }

    /// Canonical form of `key` if registered, otherwise the not-found key.
    #[must_use]
    pub fn resolve<'a>(&'a self, key: &'a RouteKey) -> &'a RouteKey {
        let key = self.canonical_key(key);
        if self.pages.contains_key(key) {
            key
        } else {
            &self.not_found
        }
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no routes are registered. Never true for a validated table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Derive the route key for a URL path.
    ///
    /// Strips leading/trailing slashes and a trailing file extension; the
    /// root path, `index` and the empty key map to the home key. Unknown
    /// paths resolve to the not-found key.
    #[must_use]
    pub fn route_for_path(&self, path: &str) -> RouteKey {
        let trimmed = path.trim_matches('/');
        let stem = trimmed
            .rsplit_once('.')
            .filter(|(stem, ext)| !stem.is_empty() && !ext.contains('/'))
            .map_or(trimmed, |(stem, _)| stem);

        if stem.is_empty() || stem == "index" {
            return self.resolve(&self.home).clone();
        }
        self.resolve(&RouteKey::new(stem)).clone()
    }

    /// Canonical URL path for `key`: `/` for home, `/<key>` otherwise.
    #[must_use]
    pub fn canonical_path(&self, key: &RouteKey) -> String {
        if *self.canonical_key(key) == self.home {
            "/".to_owned()
        } else {
            format!("/{key}")
        }
    }

    /// Pages listed in the navigation menu, sorted by order then key.
    #[must_use]
    pub fn nav_entries(&self) -> Vec<(&RouteKey, &PageDescriptor)> {
        let mut entries: Vec<_> = self
            .pages
            .iter()
            .filter(|(_, page)| page.show_in_nav)
            .collect();
        entries.sort_by(|(ka, a), (kb, b)| {
            a.order.cmp(&b.order).then_with(|| ka.cmp(kb))
        });
        entries
    }

    /// Iterate all registered routes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &PageDescriptor)> {
        self.pages.iter()
    }
}
