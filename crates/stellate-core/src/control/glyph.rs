//! A single selectable star segment.

use kurbo::{Affine, Point, Rect};
use peniko::Color;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::flare::Flare;

/// Glyph color when emphasized.
pub const ACTIVE_COLOR: Color = Color::BLACK;
/// Glyph color when not emphasized.
pub const INACTIVE_COLOR: Color = Color::from_rgb8(128, 128, 128);

/// One segment of the rating row, identified by its 1-based index.
#[derive(Debug, Clone)]
pub struct GlyphElement {
    index: u8,
    bounds: Rect,
    emphasized: bool,
    flare: Option<Flare>,
}

impl GlyphElement {
    /// Create the element at `index`, laid out with a leading gap of
    /// `spacing` before every square of side `dimension`.
    pub(crate) fn new(index: u8, dimension: f64, spacing: f64) -> Self {
        let i = f64::from(index);
        let x = spacing * i + dimension * (i - 1.0);
        Self {
            index,
            bounds: Rect::new(x, 0.0, x + dimension, dimension),
            emphasized: false,
            flare: None,
        }
    }

    /// 1-based position in the row.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Frame in control-local coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether `point` falls inside this element (half-open on the far edges).
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }

    pub fn set_emphasized(&mut self, emphasized: bool) {
        self.emphasized = emphasized;
    }

    /// Current glyph color.
    pub fn color(&self) -> Color {
        if self.emphasized {
            ACTIVE_COLOR
        } else {
            INACTIVE_COLOR
        }
    }

    /// The most recent flare, finished or not.
    pub fn flare(&self) -> Option<&Flare> {
        self.flare.as_ref()
    }

    /// Start a flare, taking over from any flare still running.
    pub fn perform_flare(&mut self, now: Instant) {
        self.flare = Some(Flare::restart(self.flare.as_ref(), now));
    }

    /// Whether a flare is still running at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.flare.is_some_and(|flare| !flare.is_finished(now))
    }

    /// Scale factor at `now`.
    pub fn scale_at(&self, now: Instant) -> f64 {
        self.flare.map_or(1.0, |flare| flare.scale_at(now))
    }

    /// Presentation transform at `now`, scaling about the element's center.
    pub fn transform_at(&self, now: Instant) -> Affine {
        Affine::scale_about(self.scale_at(now), self.bounds.center())
    }
}
