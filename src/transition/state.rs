//! Named states and triggers of the navigation transition.

use std::time::Duration;

use crate::routing::RouteKey;

/// Where the transition controller is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// Nothing in flight; clicks are accepted.
    #[default]
    Idle,
    /// Surface is being pulled toward the clicked link.
    Stretching {
        /// Page the click asked for.
        target: RouteKey,
    },
    /// Surface is snapping into the header; waiting for the commit point.
    Docking {
        /// Page the click asked for.
        target: RouteKey,
    },
    /// Navigation handed to the router; waiting for page-loaded.
    Committed {
        /// Page being loaded.
        target: RouteKey,
    },
    /// Docked pose pinned without animation, return about to start.
    ReturnPrimed,
    /// Surface is animating back out of the header.
    Returning,
}

/// Controller-owned animation state.
///
/// `is_animating` is derived from the phase, so it cannot drift from the
/// state machine. Every cycle gets a fresh number; timer triggers carry the
/// cycle that scheduled them and are ignored once it is over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationState {
    phase: TransitionPhase,
    cycle: u64,
}

impl AnimationState {
    /// Whether a navigation animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// The page an accepted click is heading to, if any.
    #[must_use]
    pub fn pending_target(&self) -> Option<&RouteKey> {
        match &self.phase {
            TransitionPhase::Stretching { target }
            | TransitionPhase::Docking { target }
            | TransitionPhase::Committed { target } => Some(target),
            _ => None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    /// Current cycle number.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Start a new cycle in `phase`, returning its number.
    pub(crate) fn begin(&mut self, phase: TransitionPhase) -> u64 {
        self.cycle += 1;
        self.advance(phase);
        self.cycle
    }

    /// Move to `phase` within the current cycle.
    pub(crate) fn advance(&mut self, phase: TransitionPhase) {
        log::debug!(
            "transition #{}: {:?} -> {phase:?}",
            self.cycle,
            self.phase
        );
        self.phase = phase;
    }

    /// Return to idle.
    pub(crate) fn settle(&mut self) {
        if self.phase != TransitionPhase::Idle {
            self.advance(TransitionPhase::Idle);
        }
    }
}

/// Named timers the controller schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Stretch delay elapsed; start the snap.
    Snap,
    /// Fixed-delay commit, or the watchdog of a transition-end commit.
    Commit,
    /// Return priming delay elapsed; start the return.
    ReturnStart,
    /// Return duration elapsed.
    ReturnEnd,
}

/// External signals that advance the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A scheduled timer fired.
    TimerElapsed {
        /// Which timer.
        timer: TimerKind,
        /// Cycle that scheduled it.
        cycle: u64,
    },
    /// The surface finished a CSS transition of `property`.
    TransitionEnd {
        /// The transitioned CSS property, e.g. `transform`.
        property: String,
    },
}

impl Trigger {
    /// Timer trigger for `cycle`.
    #[must_use]
    pub fn timer(timer: TimerKind, cycle: u64) -> Self {
        Self::TimerElapsed { timer, cycle }
    }

    /// Transition-end trigger for `property`.
    pub fn transition_end(property: impl Into<String>) -> Self {
        Self::TransitionEnd {
            property: property.into(),
        }
    }
}

/// Deferred delivery of timer triggers.
pub trait Scheduler {
    /// Deliver `trigger` back to the controller after `delay`.
    fn schedule(&self, delay: Duration, trigger: Trigger);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_not_animating() {
        let state = AnimationState::default();
        assert!(!state.is_animating());
        assert_eq!(state.pending_target(), None);
    }

    #[test]
    fn test_cycles_are_numbered_and_targets_tracked() {
        let mut state = AnimationState::default();
        let first = state.begin(TransitionPhase::Stretching {
            target: RouteKey::new("about"),
        });
        assert!(state.is_animating());
        assert_eq!(state.pending_target(), Some(&RouteKey::new("about")));

        state.advance(TransitionPhase::Docking {
            target: RouteKey::new("about"),
        });
        assert_eq!(state.cycle(), first);

        state.settle();
        assert!(!state.is_animating());
        let second = state.begin(TransitionPhase::ReturnPrimed);
        assert_eq!(second, first + 1);
        assert_eq!(state.pending_target(), None);
    }
}
