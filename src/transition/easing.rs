//! Timing curves for the surface's CSS transitions.

/// Easing curve variants, rendered as CSS timing functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    /// The CSS `ease` keyword.
    Ease,
    /// Cubic Bézier with control points (x1, y1) and (x2, y2).
    /// y values outside [0, 1] overshoot, which gives the elastic feel.
    CubicBezier {
        /// First control point x, in [0, 1].
        x1: f32,
        /// First control point y.
        y1: f32,
        /// Second control point x, in [0, 1].
        x2: f32,
        /// Second control point y.
        y2: f32,
    },
}

impl EasingFunction {
    /// Back-in-out overshoot used for the taffy-like stretch.
    pub const STRETCH: Self = Self::CubicBezier {
        x1: 0.68,
        y1: -0.55,
        x2: 0.265,
        y2: 1.55,
    };

    /// Back-out overshoot used for docking and the return.
    pub const SNAP: Self = Self::CubicBezier {
        x1: 0.175,
        y1: 0.885,
        x2: 0.32,
        y2: 1.275,
    };

    /// CSS `<easing-function>` text.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Ease => "ease".to_owned(),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                format!(
                    "cubic-bezier({}, {}, {}, {})",
                    x1.clamp(0.0, 1.0),
                    y1,
                    x2.clamp(0.0, 1.0),
                    y2
                )
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::Ease
    }
}
