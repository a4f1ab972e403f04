//! [`ContentView`] over the live DOM.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::NavError;
use crate::options::SiteConfig;
use crate::routing::RouteKey;
use crate::transition::{Rect, SurfaceStyle};
use crate::view::ContentView;

/// Class marking the surface as docked in the header.
pub const GRID_INJECTED_CLASS: &str = "grid-injected";

/// Class given to navigation links of the current page.
pub const ACTIVE_CLASS: &str = "active";

/// Looks elements up by id on every call: page swaps replace them.
pub struct DomView {
    document: Document,
    container_id: String,
    surface_id: String,
    page_attribute: String,
}

impl DomView {
    /// View over `document` using the element ids from `config`.
    #[must_use]
    pub fn new(document: Document, config: &SiteConfig) -> Self {
        Self {
            document,
            container_id: config.router.content_container_id.clone(),
            surface_id: config.transition.surface_id.clone(),
            page_attribute: config.transition.page_attribute.clone(),
        }
    }

    fn surface(&self) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(&self.surface_id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    /// Elements carrying the `grid-injected` class: `<body>` and the navbar.
    fn grid_hosts(&self) -> Vec<Element> {
        let mut hosts = Vec::with_capacity(2);
        if let Some(body) = self.document.body() {
            hosts.push(Element::from(body));
        }
        if let Ok(Some(navbar)) = self.document.query_selector(".navbar") {
            hosts.push(navbar);
        }
        hosts
    }
}

/// Client rectangle of `element`.
pub(crate) fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

impl ContentView for DomView {
    fn swap_content(&self, html: &str) -> Result<(), NavError> {
        let container = self
            .document
            .get_element_by_id(&self.container_id)
            .ok_or_else(|| {
                NavError::Dom(format!("#{} not found", self.container_id))
            })?;
        container.set_inner_html(html);
        Ok(())
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn mark_active(&self, page: &RouteKey) {
        let selector = format!("[{}]", self.page_attribute);
        let Ok(links) = self.document.query_selector_all(&selector) else {
            return;
        };
        for i in 0..links.length() {
            let Some(link) =
                links.get(i).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let is_current = link
                .get_attribute(&self.page_attribute)
                .is_some_and(|p| p.trim_matches('/') == page.as_str());
            let classes = link.class_list();
            let result = if is_current {
                classes.add_1(ACTIVE_CLASS)
            } else {
                classes.remove_1(ACTIVE_CLASS)
            };
            if let Err(e) = result {
                log::debug!("failed to toggle active link: {e:?}");
            }
        }
    }

    fn surface_bounds(&self) -> Option<Rect> {
        self.surface().map(|surface| rect_of(&surface))
    }

    fn apply_surface_style(&self, style: &SurfaceStyle) -> bool {
        let Some(surface) = self.surface() else {
            return false;
        };
        let css = surface.style();
        let properties = [
            ("transition", style.transition_css()),
            ("transform-origin", "center center".to_owned()),
            ("transform", style.transform.to_css()),
            ("opacity", style.opacity_css()),
        ];
        for (name, value) in properties {
            if let Err(e) = css.set_property(name, &value) {
                log::warn!("failed to set surface {name}: {e:?}");
            }
        }
        // Force a reflow so an instant pose registers before the next
        // animated one.
        if style.transition.is_none() {
            let _ = surface.offset_height();
        }
        true
    }

    fn set_grid_injected(&self, injected: bool) {
        for host in self.grid_hosts() {
            let classes = host.class_list();
            let result = if injected {
                classes.add_1(GRID_INJECTED_CLASS)
            } else {
                classes.remove_1(GRID_INJECTED_CLASS)
            };
            if let Err(e) = result {
                log::warn!("failed to toggle {GRID_INJECTED_CLASS}: {e:?}");
            }
        }
    }

    fn is_grid_injected(&self) -> bool {
        self.document
            .body()
            .is_some_and(|body| body.class_list().contains(GRID_INJECTED_CLASS))
    }
}
