use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// When the controller hands a gated navigation over to the router.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CommitStrategy {
    /// Commit on the surface's `transform` transition-end signal.
    #[default]
    TransitionEnd,
    /// Commit after a fixed delay from the start of the snap.
    FixedDelay {
        /// Delay in milliseconds.
        delay_ms: u64,
    },
}

/// Timing, geometry and DOM hooks of the elastic navigation transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transition", inline)]
#[serde(default)]
pub struct TransitionOptions {
    /// Route key of the page that hosts the animated surface.
    pub host_page: String,
    /// Element id of the animated surface.
    pub surface_id: String,
    /// Marker class of links owned by the transition controller.
    pub link_marker_class: String,
    /// Attribute carrying a link's target route key.
    pub page_attribute: String,
    /// Stretch transition duration.
    #[schemars(range(min = 50, max = 2000))]
    pub stretch_duration_ms: u64,
    /// Delay between starting the stretch and starting the snap.
    #[schemars(range(min = 0, max = 1000))]
    pub stretch_delay_ms: u64,
    /// Snap-to-header transition duration.
    #[schemars(range(min = 50, max = 2000))]
    pub snap_duration_ms: u64,
    /// Return (un-dock) transition duration.
    #[schemars(range(min = 50, max = 2000))]
    pub return_duration_ms: u64,
    /// Pause between pinning the docked pose and starting the return.
    pub return_start_delay_ms: u64,
    /// Commit strategy for the real navigation.
    pub commit: CommitStrategy,
    /// Forced commit when no transition-end signal arrives in time.
    pub commit_watchdog_ms: u64,
    /// Fraction of the click vector applied as translation.
    pub translate_factor: f32,
    /// Scale gained per pixel of click distance along each axis.
    pub stretch_factor: f32,
    /// Skew degrees per pixel of click distance along each axis.
    pub skew_factor: f32,
    /// Vertical dock offset in viewport-height units.
    pub dock_offset_vh: f32,
    /// Uniform scale of the docked surface.
    pub dock_scale: f32,
    /// Rotation applied while docking, in degrees.
    pub dock_rotation_deg: f32,
    /// Opacity of the docked surface.
    pub dock_opacity: f32,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            host_page: "home".to_owned(),
            surface_id: "tetris-canvas".to_owned(),
            link_marker_class: "navbar-link".to_owned(),
            page_attribute: "data-page".to_owned(),
            stretch_duration_ms: 300,
            stretch_delay_ms: 80,
            snap_duration_ms: 400,
            return_duration_ms: 400,
            return_start_delay_ms: 10,
            commit: CommitStrategy::TransitionEnd,
            commit_watchdog_ms: 1000,
            translate_factor: 0.4,
            stretch_factor: 0.002,
            skew_factor: 0.03,
            dock_offset_vh: -60.0,
            dock_scale: 0.05,
            dock_rotation_deg: 360.0,
            dock_opacity: 0.2,
        }
    }
}

impl TransitionOptions {
    /// Stretch transition duration.
    #[must_use]
    pub fn stretch_duration(&self) -> Duration {
        Duration::from_millis(self.stretch_duration_ms)
    }

    /// Delay before the snap phase starts.
    #[must_use]
    pub fn stretch_delay(&self) -> Duration {
        Duration::from_millis(self.stretch_delay_ms)
    }

    /// Snap transition duration.
    #[must_use]
    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }

    /// Return transition duration.
    #[must_use]
    pub fn return_duration(&self) -> Duration {
        Duration::from_millis(self.return_duration_ms)
    }

    /// Pause before the return transition is applied.
    #[must_use]
    pub fn return_start_delay(&self) -> Duration {
        Duration::from_millis(self.return_start_delay_ms)
    }

    /// Watchdog delay for a transition-end commit.
    #[must_use]
    pub fn commit_watchdog(&self) -> Duration {
        Duration::from_millis(self.commit_watchdog_ms)
    }
}
