//! The router: URL/history ⇄ rendered content, and the single source of
//! truth for the current page.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use web_time::Instant;

use super::fragment::FALLBACK_ERROR_FRAGMENT;
use super::history::{History, HistoryEntry};
use super::route_table::{RouteKey, RouteTable};
use super::source::FragmentSource;
use crate::error::NavError;
use crate::events::{PageLoaded, PageLoadedListener};
use crate::options::{RouterOptions, SiteConfig};
use crate::view::{ContentView, LinkTarget};

/// Where the router is within a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No navigation in progress.
    #[default]
    Idle,
    /// Waiting for the requested fragment.
    Fetching,
    /// The requested fragment failed; loading the not-found page instead.
    Fallback,
    /// Replacing the content container.
    Swapping,
    /// Pushing the history entry and URL.
    HistoryUpdate,
    /// Dispatching page-loaded.
    NotifyListeners,
}

/// Router-owned navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Page currently displayed.
    pub current_page: RouteKey,
    /// True until the first load has run.
    pub is_initial_load: bool,
}

/// Swaps page content by fetching fragments and keeps browser history in
/// step with what is displayed.
///
/// The first [`load_page`](Self::load_page) after construction is the
/// bootstrap: the server already delivered that page inline, so nothing is
/// fetched or swapped.
pub struct Router<V, S, H> {
    table: RouteTable,
    options: RouterOptions,
    /// Links carrying this class belong to the transition controller.
    transition_marker: String,
    view: Rc<V>,
    source: S,
    history: H,
    state: RefCell<NavigationState>,
    phase: Cell<LoadPhase>,
    listeners: RefCell<Vec<Weak<dyn PageLoadedListener>>>,
}

impl<V: ContentView, S: FragmentSource, H: History> Router<V, S, H> {
    /// Build the route table from `config` and attach to the page.
    pub fn new(
        config: &SiteConfig,
        view: Rc<V>,
        source: S,
        history: H,
    ) -> Result<Self, NavError> {
        let table = RouteTable::from_config(config)?;
        let current_page = table.route_for_path(&history.current_path());
        log::debug!(
            "router created with {} routes at '{current_page}'",
            table.len()
        );
        Ok(Self {
            table,
            options: config.router.clone(),
            transition_marker: config.transition.link_marker_class.clone(),
            view,
            source,
            history,
            state: RefCell::new(NavigationState {
                current_page,
                is_initial_load: true,
            }),
            phase: Cell::new(LoadPhase::Idle),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The fragment source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The history backend.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Snapshot of the navigation state.
    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Page currently displayed.
    pub fn current_page(&self) -> RouteKey {
        self.state.borrow().current_page.clone()
    }

    /// Current step of the navigation in progress.
    pub fn phase(&self) -> LoadPhase {
        self.phase.get()
    }

    /// Register a page-loaded observer. The router keeps only a weak
    /// reference; the caller owns the listener.
    pub fn subscribe<L: PageLoadedListener + 'static>(&self, listener: &Rc<L>) {
        let weak: Weak<L> = Rc::downgrade(listener);
        self.listeners.borrow_mut().push(weak);
    }

    /// Route key for the visible URL; the not-found key when unregistered.
    pub fn resolve_current_route(&self) -> RouteKey {
        self.table.route_for_path(&self.history.current_path())
    }

    /// Run the bootstrap load for the page the server delivered.
    pub async fn start(&self) {
        let page = self.resolve_current_route();
        self.load_page(page, false).await;
    }

    /// Navigate to `page`, pushing a history entry.
    ///
    /// No-op when `page` is already the visible route; unregistered keys are
    /// redirected to the not-found page before anything is fetched. The
    /// empty key navigates home.
    pub async fn navigate_to(&self, page: RouteKey) {
        let page = self.table.canonical_key(&page).clone();
        if page == self.resolve_current_route() {
            log::debug!("already on '{page}', ignoring navigation");
            return;
        }
        let page = if self.table.contains(&page) {
            page
        } else {
            log::warn!("{}", NavError::RouteNotFound(page.to_string()));
            self.table.not_found().clone()
        };
        self.load_page(page, true).await;
    }

    /// Reload the page the browser moved to on back/forward.
    ///
    /// Uses the preserved history state when present, otherwise the URL.
    /// Never pushes a new entry.
    pub async fn handle_popstate(&self, entry: Option<HistoryEntry>) {
        let page = entry
            .map(|e| e.page)
            .filter(|page| self.table.contains(page))
            .unwrap_or_else(|| self.resolve_current_route());
        log::debug!("history navigation to '{page}'");
        self.load_page(page, false).await;
    }

    /// Route for a clicked plain link, or `None` if the click is not ours
    /// (no page designator, or a link owned by the transition controller).
    pub fn intercept_link(&self, link: &LinkTarget) -> Option<RouteKey> {
        if link.has_class(&self.transition_marker) {
            return None;
        }
        link.route()
    }

    /// Load `page` into the content container.
    ///
    /// Order is fixed: swap, then history/URL, then title, then the
    /// page-loaded notification. Fetch failures fall back to the not-found
    /// page; if that fails too an inline error fragment is rendered.
    pub async fn load_page(&self, page: RouteKey, add_to_history: bool) {
        let page = self.table.resolve(&page).clone();
        let bootstrap = std::mem::replace(
            &mut self.state.borrow_mut().is_initial_load,
            false,
        );

        let (page, content) = if bootstrap {
            log::debug!("bootstrap load of '{page}', content is inline");
            (page, None)
        } else {
            let (page, html) = self.fetch_with_fallback(page).await;
            (page, Some(html))
        };

        if let Some(html) = content {
            self.set_phase(LoadPhase::Swapping);
            if let Err(e) = self.view.swap_content(&html) {
                log::error!("failed to swap content for '{page}': {e}");
            }
        }

        if add_to_history {
            self.set_phase(LoadPhase::HistoryUpdate);
            let url = self.table.canonical_path(&page);
            if let Err(e) = self.history.push(&HistoryEntry::new(page.clone()), &url)
            {
                log::warn!("failed to push history for '{page}': {e}");
            }
        }

        let title = self
            .table
            .get(&page)
            .map_or("Page Not Found", |descriptor| descriptor.title.as_str());
        self.view.set_title(&self.options.document_title(title));
        self.state.borrow_mut().current_page = page.clone();
        self.view.mark_active(&page);

        self.set_phase(LoadPhase::NotifyListeners);
        log::info!("navigated to '{page}'");
        self.notify(&PageLoaded { page });
        self.set_phase(LoadPhase::Idle);
    }

    /// Fetch `page`, retrying once with the not-found page. Returns the page
    /// actually displayed and its content.
    async fn fetch_with_fallback(&self, page: RouteKey) -> (RouteKey, String) {
        self.set_phase(LoadPhase::Fetching);
        let err = match self.fetch_page(&page).await {
            Ok(html) => return (page, html),
            Err(e) => e,
        };

        let not_found = self.table.not_found().clone();
        if page == not_found {
            log::error!("failed to load '{page}': {err}; rendering inline error");
            return (not_found, FALLBACK_ERROR_FRAGMENT.to_owned());
        }

        log::warn!("failed to load '{page}': {err}; falling back to '{not_found}'");
        self.set_phase(LoadPhase::Fallback);
        match self.fetch_page(&not_found).await {
            Ok(html) => (not_found, html),
            Err(e) => {
                log::error!(
                    "failed to load '{not_found}': {e}; rendering inline error"
                );
                (not_found, FALLBACK_ERROR_FRAGMENT.to_owned())
            }
        }
    }

    async fn fetch_page(&self, page: &RouteKey) -> Result<String, NavError> {
        let descriptor = self
            .table
            .get(page)
            .ok_or_else(|| NavError::RouteNotFound(page.to_string()))?;
        let started = Instant::now();
        let html = self.source.fetch(&descriptor.source_path).await?;
        log::debug!(
            "fetched {} in {:.1}ms",
            descriptor.source_path,
            started.elapsed().as_secs_f64() * 1000.0
        );

        let region = self
            .source
            .extract_region(&html, &self.options.content_region_id);
        if region.is_none() {
            log::debug!(
                "{} has no #{} region, using the whole fragment",
                descriptor.source_path,
                self.options.content_region_id
            );
        }
        Ok(region.unwrap_or(html))
    }

    fn notify(&self, event: &PageLoaded) {
        let listeners: Vec<_> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|l| l.strong_count() > 0);
            listeners.clone()
        };
        for listener in listeners.iter().filter_map(Weak::upgrade) {
            listener.on_page_loaded(event);
        }
    }

    fn set_phase(&self, phase: LoadPhase) {
        log::debug!("router {:?} -> {phase:?}", self.phase.get());
        self.phase.set(phase);
    }
}
