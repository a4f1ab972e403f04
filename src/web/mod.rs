//! Browser binding: wires the router and transition controller to the
//! live document.
//!
//! [`start`] is the wasm entry point. It reads the optional
//! `window.SETTINGS` object as a [`SiteConfig`], installs the document
//! listeners and performs the initial load.

mod dom;
mod fetch;
mod history;
mod scheduler;

use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, MouseEvent, PopStateEvent,
    TransitionEvent, Window,
};

pub use self::dom::{DomView, ACTIVE_CLASS, GRID_INJECTED_CLASS};
pub use self::fetch::FetchSource;
pub use self::history::{entry_from_state, BrowserHistory};
pub use self::scheduler::{TriggerSink, WebScheduler};
use crate::error::NavError;
use crate::events::{PageLoaded, PageLoadedListener, PAGE_LOADED_EVENT};
use crate::options::SiteConfig;
use crate::routing::{RouteKey, Router};
use crate::transition::{Navigator, TransitionController, Trigger};
use crate::view::LinkTarget;

/// Router over the live document.
pub type WebRouter = Router<DomView, FetchSource, BrowserHistory>;

/// Transition controller over the live document.
pub type WebController =
    TransitionController<DomView, RouterHandle, WebScheduler>;

/// Render a thrown JS value for logs and errors.
pub(crate) fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// [`Navigator`] that starts router loads on the local executor.
pub struct RouterHandle(Rc<WebRouter>);

impl Navigator for RouterHandle {
    fn current_route(&self) -> RouteKey {
        self.0.resolve_current_route()
    }

    fn canonical_route(&self, page: RouteKey) -> RouteKey {
        self.0.table().canonical_key(&page).clone()
    }

    fn navigate_to(&self, page: RouteKey) {
        let router = Rc::clone(&self.0);
        spawn_local(async move { router.navigate_to(page).await });
    }
}

/// Re-broadcasts page-loaded notifications as a DOM `CustomEvent` on the
/// window, for widgets that live outside this crate.
pub struct DomEventBridge {
    window: Window,
}

impl PageLoadedListener for DomEventBridge {
    fn on_page_loaded(&self, event: &PageLoaded) {
        if let Err(e) = dispatch_page_loaded(&self.window, event) {
            log::warn!("failed to dispatch {PAGE_LOADED_EVENT}: {e}");
        }
    }
}

fn dispatch_page_loaded(
    window: &Window,
    event: &PageLoaded,
) -> Result<(), NavError> {
    let detail = js_sys::JSON::parse(&event.to_json())
        .map_err(|e| NavError::Dom(js_error(&e)))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let dom_event =
        CustomEvent::new_with_event_init_dict(PAGE_LOADED_EVENT, &init)
            .map_err(|e| NavError::Dom(js_error(&e)))?;
    let _ = window
        .dispatch_event(&dom_event)
        .map_err(|e| NavError::Dom(js_error(&e)))?;
    Ok(())
}

/// Everything the document listeners need. Lives as long as the page.
struct App {
    router: Rc<WebRouter>,
    controller: Rc<WebController>,
    page_attribute: String,
    surface_id: String,
    _bridge: Rc<DomEventBridge>,
}

impl App {
    fn mount(
        window: &Window,
        document: &Document,
        config: &SiteConfig,
    ) -> Result<Rc<Self>, NavError> {
        let view = Rc::new(DomView::new(document.clone(), config));
        let router = Rc::new(Router::new(
            config,
            Rc::clone(&view),
            FetchSource::new(window.clone()),
            BrowserHistory::new(window.clone()),
        )?);
        let controller = Rc::new(TransitionController::new(
            config.transition.clone(),
            view,
            RouterHandle(Rc::clone(&router)),
            WebScheduler::new(window.clone()),
        ));
        let sink: Weak<WebController> = Rc::downgrade(&controller);
        controller.scheduler().connect(sink);

        let bridge = Rc::new(DomEventBridge {
            window: window.clone(),
        });
        router.subscribe(&controller);
        router.subscribe(&bridge);

        Ok(Rc::new(Self {
            router,
            controller,
            page_attribute: config.transition.page_attribute.clone(),
            surface_id: config.transition.surface_id.clone(),
            _bridge: bridge,
        }))
    }

    fn on_click(&self, event: &MouseEvent) {
        let Some(link) = self.link_target(event) else {
            return;
        };
        if self.controller.intercept_click(&link).is_handled() {
            event.prevent_default();
            return;
        }
        if let Some(page) = self.router.intercept_link(&link) {
            event.prevent_default();
            let router = Rc::clone(&self.router);
            spawn_local(async move { router.navigate_to(page).await });
        }
    }

    /// The nearest ancestor of the click target carrying the page attribute.
    fn link_target(&self, event: &MouseEvent) -> Option<LinkTarget> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let link = target
            .closest(&format!("[{}]", self.page_attribute))
            .ok()
            .flatten()?;
        Some(LinkTarget {
            page: link.get_attribute(&self.page_attribute),
            classes: link
                .class_name()
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
            bounds: Some(dom::rect_of(&link)),
        })
    }

    fn on_popstate(&self, event: &PopStateEvent) {
        let entry = entry_from_state(&event.state());
        let router = Rc::clone(&self.router);
        spawn_local(async move { router.handle_popstate(entry).await });
    }

    fn on_transition_end(&self, event: &TransitionEvent) {
        let from_surface = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.id() == self.surface_id);
        if from_surface {
            self.controller
                .handle(Trigger::transition_end(event.property_name()));
        }
    }
}

fn listen<E: JsCast + 'static>(
    target: &web_sys::EventTarget,
    event_type: &str,
    app: &Rc<App>,
    handler: fn(&App, &E),
) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(&app, &event);
        }
    });
    target.add_event_listener_with_callback(
        event_type,
        callback.as_ref().unchecked_ref(),
    )?;
    callback.forget();
    Ok(())
}

/// `window.SETTINGS` as a site configuration, or the defaults.
fn read_settings(window: &Window) -> SiteConfig {
    let settings = js_sys::Reflect::get(window, &JsValue::from_str("SETTINGS"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null());
    let Some(settings) = settings else {
        return SiteConfig::default();
    };
    let parsed = js_sys::JSON::stringify(&settings)
        .map_err(|e| NavError::ConfigParse(js_error(&e)))
        .and_then(|json| SiteConfig::from_json_str(&String::from(json)));
    parsed.unwrap_or_else(|e| {
        log::error!("ignoring window.SETTINGS: {e}");
        SiteConfig::default()
    })
}

/// Wasm entry point: mount on the current document and load the initial
/// page.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = read_settings(&window);
    let app = App::mount(&window, &document, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    listen::<MouseEvent>(&document, "click", &app, App::on_click)?;
    listen::<PopStateEvent>(&window, "popstate", &app, App::on_popstate)?;
    // transitionend bubbles, so one listener survives surface replacement.
    listen::<TransitionEvent>(
        &document,
        "transitionend",
        &app,
        App::on_transition_end,
    )?;

    log::info!("elastic-nav mounted with {} routes", app.router.table().len());
    let router = Rc::clone(&app.router);
    spawn_local(async move { router.start().await });
    Ok(())
}
