//! Elastic "stretch and snap" navigation transition.
//!
//! A click on a marked navigation link pulls the page's animated surface
//! toward the link, snaps it into the header, and only then commits the
//! navigation to the router. Landing back on the host page plays the
//! reverse.
//!
//! The sequence is an explicit state machine ([`TransitionPhase`]) advanced
//! by [`Trigger`]s: timer expiries delivered through a [`Scheduler`] and
//! transition-end signals from the surface.

mod controller;
mod easing;
mod geometry;
mod state;
mod style;

pub use controller::{Navigator, TransitionController};
pub use easing::EasingFunction;
pub use geometry::{pull_vector, Rect};
pub use state::{
    AnimationState, Scheduler, TimerKind, TransitionPhase, Trigger,
};
pub use style::{
    ElasticTransform, SurfaceStyle, TransitionProperty, TransitionSpec,
};
