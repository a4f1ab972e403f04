//! Gates navigation-link clicks behind the elastic stretch-and-snap
//! animation and hands the navigation to the router at the commit point.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;

use super::geometry::pull_vector;
use super::state::{
    AnimationState, Scheduler, TimerKind, TransitionPhase, Trigger,
};
use super::style::SurfaceStyle;
use crate::events::{PageLoaded, PageLoadedListener};
use crate::options::{CommitStrategy, TransitionOptions};
use crate::routing::RouteKey;
use crate::view::{ContentView, Interception, LinkTarget};

/// The router operations the controller needs.
pub trait Navigator {
    /// Route key of the visible URL.
    fn current_route(&self) -> RouteKey;

    /// Registered form of `page`; resolves the empty home alias.
    fn canonical_route(&self, page: RouteKey) -> RouteKey;

    /// Start navigating to `page`. Completion is observed through the
    /// page-loaded notification.
    fn navigate_to(&self, page: RouteKey);
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn current_route(&self) -> RouteKey {
        (**self).current_route()
    }

    fn canonical_route(&self, page: RouteKey) -> RouteKey {
        (**self).canonical_route(page)
    }

    fn navigate_to(&self, page: RouteKey) {
        (**self).navigate_to(page);
    }
}

/// Drives the animated surface and decides when navigation happens.
///
/// Only one cycle runs at a time: clicks arriving while
/// [`is_animating`](Self::is_animating) are dropped. When the current page
/// has no surface every operation degrades to immediate navigation.
pub struct TransitionController<V, N, S> {
    options: TransitionOptions,
    view: Rc<V>,
    navigator: N,
    scheduler: S,
    state: RefCell<AnimationState>,
}

impl<V: ContentView, N: Navigator, S: Scheduler> TransitionController<V, N, S> {
    /// Attach to the page. Entering directly on a page other than the host
    /// marks the surface as docked so the header shows its residual.
    pub fn new(
        options: TransitionOptions,
        view: Rc<V>,
        navigator: N,
        scheduler: S,
    ) -> Self {
        if navigator.current_route() != options.host_page.as_str() {
            view.set_grid_injected(true);
        }
        Self {
            options,
            view,
            navigator,
            scheduler,
            state: RefCell::new(AnimationState::default()),
        }
    }

    /// Snapshot of the animation state.
    pub fn state(&self) -> AnimationState {
        self.state.borrow().clone()
    }

    /// Whether a cycle is in flight.
    pub fn is_animating(&self) -> bool {
        self.state.borrow().is_animating()
    }

    /// The navigator.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Claim clicks on links carrying the marker class and a page
    /// designator. Plain links are left to the router.
    pub fn intercept_click(&self, link: &LinkTarget) -> Interception {
        if !link.has_class(&self.options.link_marker_class) {
            return Interception::Ignored;
        }
        let Some(target) = link.route() else {
            return Interception::Ignored;
        };
        self.handle_nav_click(link, target);
        Interception::Handled
    }

    /// Start a cycle toward `target`, or navigate directly if the page has
    /// no surface. Dropped while animating or when already on `target`.
    pub fn handle_nav_click(&self, link: &LinkTarget, target: RouteKey) {
        let target = self.navigator.canonical_route(target);
        if self.is_animating() {
            log::debug!("animation in flight, dropping click to '{target}'");
            return;
        }
        if target == self.navigator.current_route() {
            return;
        }
        if self.view.surface_bounds().is_none() {
            self.navigator.navigate_to(target);
            return;
        }
        self.stretch_grid(link, target);
    }

    /// Pull the surface toward the clicked link and schedule the snap.
    pub fn stretch_grid(&self, link: &LinkTarget, target: RouteKey) {
        let Some(surface) = self.view.surface_bounds() else {
            self.navigator.navigate_to(target);
            return;
        };
        let cycle = {
            let mut state = self.state.borrow_mut();
            if state.is_animating() {
                return;
            }
            state.begin(TransitionPhase::Stretching { target })
        };

        let pull = link
            .bounds
            .map_or(Vec2::ZERO, |bounds| pull_vector(surface, bounds));
        let _ = self
            .view
            .apply_surface_style(&SurfaceStyle::stretched(pull, &self.options));
        self.scheduler.schedule(
            self.options.stretch_delay(),
            Trigger::timer(TimerKind::Snap, cycle),
        );
    }

    /// Dock the surface into the header and arm the commit.
    ///
    /// Driven by the stretch timer. If the surface has vanished the
    /// navigation is committed at once.
    pub fn snap_to_header(&self, target: RouteKey) {
        let docked = SurfaceStyle::docked(&self.options, true);
        if !self.view.apply_surface_style(&docked) {
            log::debug!("surface gone, navigating to '{target}' now");
            self.state.borrow_mut().advance(TransitionPhase::Committed {
                target: target.clone(),
            });
            self.navigator.navigate_to(target);
            return;
        }
        self.view.set_grid_injected(true);

        let cycle = {
            let mut state = self.state.borrow_mut();
            state.advance(TransitionPhase::Docking { target });
            state.cycle()
        };
        let delay = match self.options.commit {
            CommitStrategy::FixedDelay { delay_ms } => {
                Duration::from_millis(delay_ms)
            }
            CommitStrategy::TransitionEnd => self.options.commit_watchdog(),
        };
        self.scheduler
            .schedule(delay, Trigger::timer(TimerKind::Commit, cycle));
    }

    /// Reverse the docking: pin the docked pose, then animate back to
    /// identity once the return timer fires.
    pub fn play_return_animation(&self) {
        let pinned = SurfaceStyle::docked(&self.options, false);
        if !self.view.apply_surface_style(&pinned) {
            self.reset();
            return;
        }
        self.view.set_grid_injected(false);
        let cycle = self.state.borrow_mut().begin(TransitionPhase::ReturnPrimed);
        self.scheduler.schedule(
            self.options.return_start_delay(),
            Trigger::timer(TimerKind::ReturnStart, cycle),
        );
    }

    /// Snap the surface back to neutral without animation, clear the
    /// `grid-injected` flag and return to idle.
    pub fn reset(&self) {
        let _ = self
            .view
            .apply_surface_style(&SurfaceStyle::settling(&self.options));
        self.view.set_grid_injected(false);
        self.state.borrow_mut().settle();
    }

    /// Feed a timer or transition-end signal into the state machine.
    pub fn handle(&self, trigger: Trigger) {
        match trigger {
            Trigger::TimerElapsed { timer, cycle } => {
                if cycle != self.state.borrow().cycle() {
                    log::debug!("ignoring {timer:?} from cycle #{cycle}");
                    return;
                }
                match timer {
                    TimerKind::Snap => self.on_stretch_elapsed(),
                    TimerKind::Commit => self.on_commit_timer(),
                    TimerKind::ReturnStart => self.start_return(),
                    TimerKind::ReturnEnd => self.finish_return(),
                }
            }
            Trigger::TransitionEnd { property } => {
                self.on_transition_end(&property);
            }
        }
    }

    fn on_stretch_elapsed(&self) {
        let target = match self.state.borrow().phase() {
            TransitionPhase::Stretching { target } => target.clone(),
            _ => return,
        };
        self.snap_to_header(target);
    }

    fn on_commit_timer(&self) {
        let docking =
            matches!(self.state.borrow().phase(), TransitionPhase::Docking { .. });
        if docking && self.options.commit == CommitStrategy::TransitionEnd {
            log::warn!("no transform transition-end while docking, committing");
        }
        self.commit();
    }

    fn on_transition_end(&self, property: &str) {
        if property != "transform" {
            return;
        }
        let phase = self.state.borrow().phase().clone();
        match phase {
            TransitionPhase::Docking { .. }
                if self.options.commit == CommitStrategy::TransitionEnd
                    && self.view.is_grid_injected() =>
            {
                self.commit();
            }
            TransitionPhase::Returning => self.finish_return(),
            _ => {}
        }
    }

    /// Hand the pending navigation to the router. Runs at most once per
    /// cycle: only a docking cycle can commit.
    fn commit(&self) {
        let target = {
            let mut state = self.state.borrow_mut();
            let TransitionPhase::Docking { target } = state.phase() else {
                return;
            };
            let target = target.clone();
            state.advance(TransitionPhase::Committed {
                target: target.clone(),
            });
            target
        };

        if target == self.navigator.current_route() {
            log::debug!("already on '{target}' at commit, resetting");
            self.reset();
            return;
        }
        self.navigator.navigate_to(target);
    }

    fn start_return(&self) {
        if *self.state.borrow().phase() != TransitionPhase::ReturnPrimed {
            return;
        }
        if !self
            .view
            .apply_surface_style(&SurfaceStyle::undocking(&self.options))
        {
            self.reset();
            return;
        }
        let cycle = {
            let mut state = self.state.borrow_mut();
            state.advance(TransitionPhase::Returning);
            state.cycle()
        };
        self.scheduler.schedule(
            self.options.return_duration(),
            Trigger::timer(TimerKind::ReturnEnd, cycle),
        );
    }

    fn finish_return(&self) {
        if *self.state.borrow().phase() == TransitionPhase::Returning {
            self.reset();
        }
    }
}

impl<V: ContentView, N: Navigator, S: Scheduler> PageLoadedListener
    for TransitionController<V, N, S>
{
    fn on_page_loaded(&self, event: &PageLoaded) {
        if event.page != self.options.host_page.as_str() {
            self.state.borrow_mut().settle();
            return;
        }
        if self.view.is_grid_injected() && self.view.surface_bounds().is_some() {
            self.play_return_animation();
        } else {
            self.reset();
        }
    }
}
