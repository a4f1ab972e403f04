//! Visual poses of the animated surface and their CSS rendering.

use std::time::Duration;

use glam::Vec2;

use super::easing::EasingFunction;
use crate::options::TransitionOptions;

/// CSS transform applied to the surface, composed in a fixed order:
/// translate, translateY (viewport units), scale, skew, rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticTransform {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Additional vertical translation in viewport-height units.
    pub translate_y_vh: f32,
    /// Per-axis scale.
    pub scale: Vec2,
    /// Per-axis skew in degrees.
    pub skew_deg: Vec2,
    /// Rotation in degrees.
    pub rotate_deg: f32,
}

impl ElasticTransform {
    /// No translation, scale, skew or rotation.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        translate_y_vh: 0.0,
        scale: Vec2::ONE,
        skew_deg: Vec2::ZERO,
        rotate_deg: 0.0,
    };

    /// Pull the surface toward a click `pull` pixels away from its center.
    #[must_use]
    pub fn stretch(pull: Vec2, options: &TransitionOptions) -> Self {
        Self {
            translate: pull * options.translate_factor,
            scale: Vec2::ONE + pull.abs() * options.stretch_factor,
            skew_deg: pull * options.skew_factor,
            ..Self::IDENTITY
        }
    }

    /// Collapsed pose parked in the header.
    #[must_use]
    pub fn docked(options: &TransitionOptions) -> Self {
        Self {
            translate_y_vh: options.dock_offset_vh,
            scale: Vec2::splat(options.dock_scale),
            rotate_deg: options.dock_rotation_deg,
            ..Self::IDENTITY
        }
    }

    /// Whether this transform leaves the surface untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// CSS `transform` value; `none` for the identity.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.is_identity() {
            return "none".to_owned();
        }
        let mut parts = Vec::new();
        if self.translate != Vec2::ZERO {
            parts.push(format!(
                "translate({}px, {}px)",
                css_num(self.translate.x),
                css_num(self.translate.y)
            ));
        }
        if self.translate_y_vh != 0.0 {
            parts.push(format!("translateY({}vh)", css_num(self.translate_y_vh)));
        }
        if self.scale != Vec2::ONE {
            if self.scale.x == self.scale.y {
                parts.push(format!("scale({})", css_num(self.scale.x)));
            } else {
                parts.push(format!("scaleX({})", css_num(self.scale.x)));
                parts.push(format!("scaleY({})", css_num(self.scale.y)));
            }
        }
        if self.skew_deg != Vec2::ZERO {
            parts.push(format!(
                "skew({}deg, {}deg)",
                css_num(self.skew_deg.x),
                css_num(self.skew_deg.y)
            ));
        }
        if self.rotate_deg != 0.0 {
            parts.push(format!("rotate({}deg)", css_num(self.rotate_deg)));
        }
        parts.join(" ")
    }
}

impl Default for ElasticTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Which properties a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionProperty {
    /// Only `transform`.
    Transform,
    /// Every animatable property (transform and opacity).
    All,
}

impl TransitionProperty {
    fn as_css(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::All => "all",
        }
    }
}

/// CSS `transition` shorthand for one animation phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    /// Animated properties.
    pub property: TransitionProperty,
    /// Duration of the transition.
    pub duration: Duration,
    /// Timing curve.
    pub easing: EasingFunction,
}

impl TransitionSpec {
    /// CSS `transition` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "{} {}ms {}",
            self.property.as_css(),
            self.duration.as_millis(),
            self.easing.to_css()
        )
    }
}

/// Everything the controller writes to the surface in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    /// Target transform.
    pub transform: ElasticTransform,
    /// Target opacity.
    pub opacity: f32,
    /// Transition used to reach the target; `None` applies it instantly.
    pub transition: Option<TransitionSpec>,
}

impl SurfaceStyle {
    /// Untransformed, fully opaque, applied without animation.
    pub const NEUTRAL: Self = Self {
        transform: ElasticTransform::IDENTITY,
        opacity: 1.0,
        transition: None,
    };

    /// Elastic pull toward a clicked link.
    #[must_use]
    pub fn stretched(pull: Vec2, options: &TransitionOptions) -> Self {
        Self {
            transform: ElasticTransform::stretch(pull, options),
            opacity: 1.0,
            transition: Some(TransitionSpec {
                property: TransitionProperty::Transform,
                duration: options.stretch_duration(),
                easing: EasingFunction::STRETCH,
            }),
        }
    }

    /// Snap into the header. With `animated == false` the docked pose is
    /// pinned instantly, which primes the return animation.
    #[must_use]
    pub fn docked(options: &TransitionOptions, animated: bool) -> Self {
        Self {
            transform: ElasticTransform::docked(options),
            opacity: options.dock_opacity,
            transition: animated.then(|| TransitionSpec {
                property: TransitionProperty::All,
                duration: options.snap_duration(),
                easing: EasingFunction::SNAP,
            }),
        }
    }

    /// Ease back to the neutral pose from wherever the surface is.
    #[must_use]
    pub fn settling(options: &TransitionOptions) -> Self {
        Self {
            transition: Some(TransitionSpec {
                property: TransitionProperty::All,
                duration: options.return_duration(),
                easing: EasingFunction::Ease,
            }),
            ..Self::NEUTRAL
        }
    }

    /// Animate from the docked pose back to the neutral pose.
    #[must_use]
    pub fn undocking(options: &TransitionOptions) -> Self {
        Self {
            transition: Some(TransitionSpec {
                property: TransitionProperty::All,
                duration: options.return_duration(),
                easing: EasingFunction::SNAP,
            }),
            ..Self::NEUTRAL
        }
    }

    /// CSS `opacity` value.
    #[must_use]
    pub fn opacity_css(&self) -> String {
        css_num(self.opacity)
    }

    /// CSS `transition` value; `none` for instant application.
    #[must_use]
    pub fn transition_css(&self) -> String {
        self.transition
            .as_ref()
            .map_or_else(|| "none".to_owned(), TransitionSpec::to_css)
    }
}

/// Format a CSS number with at most three decimals and no negative zero.
fn css_num(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}
