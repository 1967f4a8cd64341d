//! # Window Geometry
//!
//! Sizes are in logical pixels. The terminal adapter converts cells to
//! pixels before anything reaches this module, so the numbers here match
//! what a browser-hosted widget would see.
//!
//! ```text
//! viewport < 600 wide   →  0.95·vw × 0.70·vh   (mobile)
//! viewport ≥ 600 wide   →  500 × 600           (desktop default)
//! drag-resize           →  clamp(w + dx, 320, 0.95·vw) × clamp(h + dy, 400, 0.95·vh)
//! ```

/// Viewport width below which the window follows the viewport and drag-resize is disabled.
pub const MOBILE_THRESHOLD: f64 = 600.0;

pub const DEFAULT_WIDTH: f64 = 500.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

pub const MIN_WIDTH: f64 = 320.0;
pub const MIN_HEIGHT: f64 = 400.0;

/// Upper bound for drag-resize, as a fraction of the viewport on both axes.
pub const MAX_VIEWPORT_FRACTION: f64 = 0.95;

const MOBILE_WIDTH_FRACTION: f64 = 0.95;
const MOBILE_HEIGHT_FRACTION: f64 = 0.7;

/// Size of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_THRESHOLD
    }
}

/// A pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Chat window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Geometry {
    /// Geometry the window snaps to whenever the viewport changes.
    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.is_mobile() {
            Self {
                width: viewport.width * MOBILE_WIDTH_FRACTION,
                height: viewport.height * MOBILE_HEIGHT_FRACTION,
            }
        } else {
            Self::default()
        }
    }

    /// Grow or shrink by a pointer delta, clamped to the viewport bounds.
    ///
    /// The upper bound is applied last, so on a viewport too small to fit
    /// the minimum the window follows the viewport instead.
    pub fn resized_by(self, dx: f64, dy: f64, viewport: Viewport) -> Self {
        Self {
            width: (self.width + dx)
                .max(MIN_WIDTH)
                .min(viewport.width * MAX_VIEWPORT_FRACTION),
            height: (self.height + dy)
                .max(MIN_HEIGHT)
                .min(viewport.height * MAX_VIEWPORT_FRACTION),
        }
    }
}

/// Drag-resize gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Resize {
    #[default]
    Idle,
    /// Dragging; holds the pointer position of the last applied step.
    Dragging { last: Point },
}

impl Resize {
    pub fn is_active(&self) -> bool {
        matches!(self, Resize::Dragging { .. })
    }
}
