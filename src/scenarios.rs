//! End-to-end navigation scenarios: router and transition controller
//! wired together over the in-memory fakes.

use std::rc::Rc;

use crate::events::PageLoaded;
use crate::options::{SiteConfig, TransitionOptions};
use crate::routing::{HistoryEntry, History, RouteKey, Router};
use crate::test_support::{
    portfolio_config, FakeHistory, FakeScheduler, FakeSource, FakeView, SURFACE_RECT,
};
use crate::transition::{
    Navigator, Rect, TransitionController, TransitionPhase, Trigger,
};
use crate::view::{ContentView, LinkTarget};

type TestRouter = Router<FakeView, FakeSource, FakeHistory>;
type TestController =
    TransitionController<FakeView, RouterNavigator, FakeScheduler>;

/// Runs router navigations to completion synchronously.
struct RouterNavigator(Rc<TestRouter>);

impl Navigator for RouterNavigator {
    fn current_route(&self) -> RouteKey {
        self.0.resolve_current_route()
    }

    fn canonical_route(&self, page: RouteKey) -> RouteKey {
        self.0.table().canonical_key(&page).clone()
    }

    fn navigate_to(&self, page: RouteKey) {
        pollster::block_on(self.0.navigate_to(page));
    }
}

struct Site {
    view: Rc<FakeView>,
    router: Rc<TestRouter>,
    controller: Rc<TestController>,
}

impl Site {
    fn boot(path: &str) -> Self {
        Self::boot_with(&portfolio_config(), path)
    }

    fn boot_with(config: &SiteConfig, path: &str) -> Self {
        let view = Rc::new(FakeView::default());
        if path == "/" {
            view.set_surface(Some(SURFACE_RECT));
        }
        let source = FakeSource::portfolio();
        source.serve(
            "/home.html",
            "<main id=\"page-content\"><canvas id=\"tetris-canvas\"></canvas></main>",
        );
        let router = Rc::new(
            Router::new(config, Rc::clone(&view), source, FakeHistory::at(path))
                .unwrap(),
        );
        let controller = Rc::new(TransitionController::new(
            config.transition.clone(),
            Rc::clone(&view),
            RouterNavigator(Rc::clone(&router)),
            FakeScheduler::default(),
        ));
        router.subscribe(&controller);
        pollster::block_on(router.start());
        Self {
            view,
            router,
            controller,
        }
    }

    fn click(&self, page: &str) {
        let link = LinkTarget::to_page(page)
            .with_class("navbar-link")
            .with_bounds(Rect::new(520.0, 12.0, 90.0, 24.0));
        assert!(self.controller.intercept_click(&link).is_handled());
    }

    fn fire_next_timer(&self) {
        let (_, trigger) = self.controller.scheduler().pop().unwrap();
        self.controller.handle(trigger);
    }

    fn transform_end(&self) {
        self.controller.handle(Trigger::transition_end("transform"));
    }
}

#[test]
fn test_initial_load_at_root_is_inline() {
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let view = Rc::new(FakeView::default());
    let router = Router::new(
        &portfolio_config(),
        Rc::clone(&view),
        FakeSource::portfolio(),
        FakeHistory::at("/"),
    )
    .unwrap();
    let sink = Rc::clone(&seen);
    let listener = Rc::new(move |e: &PageLoaded| sink.borrow_mut().push(e.clone()));
    router.subscribe(&listener);

    assert_eq!(router.resolve_current_route(), "home");
    pollster::block_on(router.start());

    assert!(router.source().requests().is_empty());
    assert_eq!(view.swap_count(), 0);
    assert_eq!(
        *seen.borrow(),
        vec![PageLoaded {
            page: RouteKey::new("home")
        }]
    );
}

#[test]
fn test_gated_click_navigates_once_and_settles() {
    let site = Site::boot("/");
    site.click("about");
    assert!(site.controller.is_animating());

    site.fire_next_timer();
    assert!(site.view.is_grid_injected());
    assert!(site.router.source().requests().is_empty());

    site.transform_end();
    assert_eq!(site.router.source().requests(), ["/pages/about.html"]);
    assert_eq!(
        site.router.history().entries(),
        [HistoryEntry::new(RouteKey::new("about"))]
    );
    assert_eq!(site.router.history().current_path(), "/about");
    assert_eq!(site.router.current_page(), "about");
    assert!(!site.controller.is_animating());
    assert!(site.view.is_grid_injected());

    // Watchdog of the committed cycle must not navigate again.
    site.fire_next_timer();
    assert_eq!(site.router.source().requests().len(), 1);
}

#[test]
fn test_double_trigger_navigates_once() {
    let site = Site::boot("/");
    site.click("about");
    site.click("contact");
    while !site.controller.scheduler().pending().is_empty() {
        site.fire_next_timer();
    }
    site.transform_end();
    assert_eq!(site.router.source().requests(), ["/pages/about.html"]);
    assert_eq!(site.router.history().entries().len(), 1);
}

#[test]
fn test_failed_fetch_lands_on_not_found() {
    let site = Site::boot("/");
    site.router.source().fail("/pages/about.html", 500);
    site.click("about");
    site.fire_next_timer();
    site.transform_end();

    assert_eq!(site.router.current_page(), "404");
    assert_eq!(site.router.history().current_path(), "/404");
    assert_eq!(site.view.content(), "<h1>Missing</h1>");
    assert!(!site.controller.is_animating());
}

#[test]
fn test_back_to_host_page_plays_return_animation() {
    let site = Site::boot("/");
    site.click("about");
    site.fire_next_timer();
    site.transform_end();
    assert_eq!(site.view.surface_bounds(), None);
    let _watchdog = site.controller.scheduler().pop();

    let state = site.router.history().back();
    pollster::block_on(site.router.handle_popstate(state));

    assert_eq!(site.router.current_page(), "home");
    assert_eq!(site.router.history().entries().len(), 1);
    assert!(site.view.surface_bounds().is_some());
    assert_eq!(
        *site.controller.state().phase(),
        TransitionPhase::ReturnPrimed
    );
    assert!(!site.view.is_grid_injected());

    site.fire_next_timer();
    assert_eq!(*site.controller.state().phase(), TransitionPhase::Returning);
    site.transform_end();
    assert!(!site.controller.is_animating());
    assert!(!site.view.is_grid_injected());
}

#[test]
fn test_sub_page_without_surface_navigates_immediately() {
    let site = Site::boot("/about");
    assert!(site.view.is_grid_injected());
    site.click("contact");

    assert!(site.controller.scheduler().pending().is_empty());
    assert_eq!(site.router.source().requests(), ["/pages/contact.html"]);
    assert_eq!(site.router.history().current_path(), "/contact");
    assert!(!site.controller.is_animating());
}

#[test]
fn test_fixed_delay_commit_navigates_on_timer() {
    let mut config = portfolio_config();
    config.transition = TransitionOptions {
        commit: crate::options::CommitStrategy::FixedDelay { delay_ms: 150 },
        ..TransitionOptions::default()
    };
    let site = Site::boot_with(&config, "/");
    site.click("contact");
    site.fire_next_timer();
    site.transform_end();
    assert!(site.router.source().requests().is_empty());
    site.fire_next_timer();
    assert_eq!(site.router.current_page(), "contact");
}
