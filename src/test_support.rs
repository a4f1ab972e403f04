//! In-memory fakes of the page, network, history and timers.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::error::NavError;
use crate::options::{RouteEntry, SiteConfig};
use crate::routing::{FragmentSource, History, HistoryEntry, RouteKey};
use crate::transition::{Navigator, Rect, Scheduler, SurfaceStyle, Trigger};
use crate::view::ContentView;

/// Home, about, contact, a hidden page and the reserved 404 route.
pub(crate) fn portfolio_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.routes = vec![
        RouteEntry::new("home", "/home.html", "Home", 0),
        RouteEntry::new("about", "/pages/about.html", "About", 1),
        RouteEntry::new("contact", "/pages/contact.html", "Contact", 2),
        RouteEntry::new("harchi", "/pages/index.html", "Harchi", 3).hidden(),
        RouteEntry::new("404", "/pages/404.html", "Page Not Found", 99)
            .hidden(),
    ];
    config
}

/// Ordered record of calls shared between fakes and listeners.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<&'static str>>>);

impl CallLog {
    pub(crate) fn record(&self, call: &'static str) {
        self.0.borrow_mut().push(call);
    }

    /// Drain the calls recorded so far.
    pub(crate) fn take(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Where the fake surface sits once a fragment containing it is swapped in.
pub(crate) const SURFACE_RECT: Rect = Rect::new(0.0, 120.0, 480.0, 480.0);

#[derive(Default)]
pub(crate) struct FakeView {
    content: RefCell<String>,
    title: RefCell<String>,
    active: RefCell<Option<RouteKey>>,
    surface: Cell<Option<Rect>>,
    styles: RefCell<Vec<SurfaceStyle>>,
    grid_injected: Cell<bool>,
    swaps: Cell<usize>,
    log: CallLog,
}

impl FakeView {
    pub(crate) fn with_log(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub(crate) fn content(&self) -> String {
        self.content.borrow().clone()
    }

    pub(crate) fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub(crate) fn active(&self) -> Option<RouteKey> {
        self.active.borrow().clone()
    }

    pub(crate) fn swap_count(&self) -> usize {
        self.swaps.get()
    }

    pub(crate) fn set_surface(&self, bounds: Option<Rect>) {
        self.surface.set(bounds);
    }

    pub(crate) fn styles(&self) -> Vec<SurfaceStyle> {
        self.styles.borrow().clone()
    }

    pub(crate) fn last_style(&self) -> Option<SurfaceStyle> {
        self.styles.borrow().last().copied()
    }
}

impl ContentView for FakeView {
    fn swap_content(&self, html: &str) -> Result<(), NavError> {
        self.log.record("swap");
        html.clone_into(&mut self.content.borrow_mut());
        self.swaps.set(self.swaps.get() + 1);
        self.surface
            .set(html.contains("tetris-canvas").then_some(SURFACE_RECT));
        Ok(())
    }

    fn set_title(&self, title: &str) {
        self.log.record("title");
        title.clone_into(&mut self.title.borrow_mut());
    }

    fn mark_active(&self, page: &RouteKey) {
        self.log.record("active");
        *self.active.borrow_mut() = Some(page.clone());
    }

    fn surface_bounds(&self) -> Option<Rect> {
        self.surface.get()
    }

    fn apply_surface_style(&self, style: &SurfaceStyle) -> bool {
        if self.surface.get().is_none() {
            return false;
        }
        self.styles.borrow_mut().push(*style);
        true
    }

    fn set_grid_injected(&self, injected: bool) {
        self.grid_injected.set(injected);
    }

    fn is_grid_injected(&self) -> bool {
        self.grid_injected.get()
    }
}

#[derive(Default)]
pub(crate) struct FakeSource {
    pages: RefCell<FxHashMap<String, Result<String, u16>>>,
    requests: RefCell<Vec<String>>,
}

impl FakeSource {
    /// Serves the portfolio routes with bare fragments.
    pub(crate) fn portfolio() -> Self {
        let source = Self::default();
        source.serve("/home.html", "<h1>Home</h1>");
        source.serve("/pages/about.html", "<h1>About</h1>");
        source.serve("/pages/contact.html", "<h1>Contact</h1>");
        source.serve("/pages/index.html", "<h1>Harchi</h1>");
        source.serve("/pages/404.html", "<h1>Missing</h1>");
        source
    }

    pub(crate) fn serve(&self, path: &str, html: &str) {
        let _ = self
            .pages
            .borrow_mut()
            .insert(path.to_owned(), Ok(html.to_owned()));
    }

    pub(crate) fn fail(&self, path: &str, status: u16) {
        let _ = self.pages.borrow_mut().insert(path.to_owned(), Err(status));
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl FragmentSource for FakeSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, NavError>> {
        self.requests.borrow_mut().push(path.to_owned());
        let result = match self.pages.borrow().get(path) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(NavError::FetchStatus {
                path: path.to_owned(),
                status: *status,
            }),
            None => Err(NavError::Network(format!("{path} unreachable"))),
        };
        std::future::ready(result)
    }
}

/// Browser-like history stack: pushing drops forward entries.
pub(crate) struct FakeHistory {
    stack: RefCell<Vec<(Option<HistoryEntry>, String)>>,
    index: Cell<usize>,
    log: CallLog,
}

impl FakeHistory {
    pub(crate) fn at(path: &str) -> Self {
        Self {
            stack: RefCell::new(vec![(None, path.to_owned())]),
            index: Cell::new(0),
            log: CallLog::default(),
        }
    }

    pub(crate) fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Entries pushed by the router, oldest first.
    pub(crate) fn entries(&self) -> Vec<HistoryEntry> {
        self.stack
            .borrow()
            .iter()
            .filter_map(|(entry, _)| entry.clone())
            .collect()
    }

    /// Simulate the browser back button; returns the popped-to state.
    pub(crate) fn back(&self) -> Option<HistoryEntry> {
        let index = self.index.get().saturating_sub(1);
        self.index.set(index);
        self.stack.borrow()[index].0.clone()
    }

    /// Change the visible URL without touching the stack.
    pub(crate) fn set_path(&self, path: &str) {
        path.clone_into(&mut self.stack.borrow_mut()[self.index.get()].1);
    }
}

impl History for FakeHistory {
    fn current_path(&self) -> String {
        self.stack.borrow()[self.index.get()].1.clone()
    }

    fn push(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavError> {
        self.log.record("push");
        let mut stack = self.stack.borrow_mut();
        stack.truncate(self.index.get() + 1);
        stack.push((Some(entry.clone()), url.to_owned()));
        self.index.set(stack.len() - 1);
        Ok(())
    }
}

/// Records scheduled triggers; tests fire them in order.
#[derive(Default)]
pub(crate) struct FakeScheduler {
    pending: RefCell<VecDeque<(Duration, Trigger)>>,
}

impl FakeScheduler {
    pub(crate) fn pop(&self) -> Option<(Duration, Trigger)> {
        self.pending.borrow_mut().pop_front()
    }

    pub(crate) fn pending(&self) -> Vec<(Duration, Trigger)> {
        self.pending.borrow().iter().cloned().collect()
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&self, delay: Duration, trigger: Trigger) {
        self.pending.borrow_mut().push_back((delay, trigger));
    }
}

/// Navigator that only records requests.
pub(crate) struct RecordingNavigator {
    current: RouteKey,
    calls: RefCell<Vec<RouteKey>>,
}

impl RecordingNavigator {
    pub(crate) fn at(page: &str) -> Self {
        Self {
            current: RouteKey::new(page),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RouteKey> {
        self.calls.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_route(&self) -> RouteKey {
        self.current.clone()
    }

    fn canonical_route(&self, page: RouteKey) -> RouteKey {
        if page.is_home_alias() {
            RouteKey::new("home")
        } else {
            page
        }
    }

    fn navigate_to(&self, page: RouteKey) {
        self.calls.borrow_mut().push(page);
    }
}
