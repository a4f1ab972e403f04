//! The DOM capabilities the router and the transition controller rely on.
//!
//! Both components talk to the page only through [`ContentView`], so the
//! navigation logic runs unchanged against the browser (see the `web`
//! feature) or an in-memory fake in tests.

use crate::error::NavError;
use crate::routing::RouteKey;
use crate::transition::{Rect, SurfaceStyle};

/// Page capabilities used by navigation.
///
/// Methods take `&self`: the view is shared between the router and the
/// transition controller on a single-threaded event loop.
pub trait ContentView {
    /// Replace the content container's children with `html`.
    fn swap_content(&self, html: &str) -> Result<(), NavError>;

    /// Set the document title.
    fn set_title(&self, title: &str);

    /// Mark navigation links pointing at `page` active; clear the rest.
    fn mark_active(&self, page: &RouteKey);

    /// On-screen bounds of the animated surface, or `None` when the
    /// current page has no surface.
    fn surface_bounds(&self) -> Option<Rect>;

    /// Write `style` to the animated surface. Returns `false` when the
    /// surface is absent and nothing was written.
    fn apply_surface_style(&self, style: &SurfaceStyle) -> bool;

    /// Set or clear the page-level `grid-injected` flag.
    fn set_grid_injected(&self, injected: bool);

    /// Whether the `grid-injected` flag is set.
    fn is_grid_injected(&self) -> bool;
}

/// A clicked element carrying a page designator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkTarget {
    /// Value of the page-designator attribute, if present.
    pub page: Option<String>,
    /// The element's classes.
    pub classes: Vec<String>,
    /// The element's on-screen bounds.
    pub bounds: Option<Rect>,
}

impl LinkTarget {
    /// Link to `page` with no classes or bounds.
    pub fn to_page(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            ..Self::default()
        }
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the on-screen bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The designated route key, if the attribute is present. `"/"` and
    /// `""` yield the empty key, which the route table resolves to home.
    #[must_use]
    pub fn route(&self) -> Option<RouteKey> {
        self.page
            .as_deref()
            .map(|p| RouteKey::new(p.trim_matches('/')))
    }
}

/// Whether a click was claimed by a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// The listener handled the click; the default action must be
    /// prevented.
    Handled,
    /// The click belongs to someone else.
    Ignored,
}

impl Interception {
    /// Whether the click was handled.
    #[must_use]
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}
