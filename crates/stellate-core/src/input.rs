//! Pointer/touch input and gesture tracking.
//!
//! Hosts translate their native pointer events into [`PointerEvent`]s in
//! control-local coordinates. The [`GestureTracker`] turns that stream into
//! the begin/continue/end/cancel lifecycle the rating control reacts to.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers. Touches are reported as `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// The pointer left the surface without a final location.
    Gone,
    /// The host system interrupted the gesture.
    Cancel,
}

/// Gesture lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// No active gesture.
    #[default]
    Idle,
    /// A gesture began on the control and has not ended yet.
    Tracking,
}

/// A lifecycle step produced by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    Begin(Point),
    Continue(Point),
    /// Release; `None` when the terminating event carried no location.
    End(Option<Point>),
    Cancel,
}

/// Tracks a single pointer gesture against a control's bounds.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: TrackingState,
}

impl GestureTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        self.state == TrackingState::Tracking
    }

    /// Feed a pointer event. `bounds` are the control's local bounds and only
    /// decide whether a press starts a gesture; once tracking, every move and
    /// release is delivered regardless of position.
    pub fn handle_pointer_event(
        &mut self,
        event: &PointerEvent,
        bounds: Rect,
    ) -> Option<GestureStep> {
        match (self.state, event) {
            (
                TrackingState::Idle,
                PointerEvent::Down {
                    position,
                    button: MouseButton::Left,
                },
            ) => {
                if bounds.contains(*position) {
                    self.state = TrackingState::Tracking;
                    Some(GestureStep::Begin(*position))
                } else {
                    None
                }
            }
            (TrackingState::Tracking, PointerEvent::Move { position }) => {
                Some(GestureStep::Continue(*position))
            }
            (
                TrackingState::Tracking,
                PointerEvent::Up {
                    position,
                    button: MouseButton::Left,
                },
            ) => {
                self.state = TrackingState::Idle;
                Some(GestureStep::End(Some(*position)))
            }
            (TrackingState::Tracking, PointerEvent::Gone) => {
                self.state = TrackingState::Idle;
                Some(GestureStep::End(None))
            }
            (TrackingState::Tracking, PointerEvent::Cancel) => {
                self.state = TrackingState::Idle;
                Some(GestureStep::Cancel)
            }
            _ => None,
        }
    }
}
