//! Stellate Core Library
//!
//! Platform-agnostic interaction logic for the Stellate five-star rating
//! control: layout, pointer tracking, notifications and the selection flare.

pub mod control;
pub mod flare;
pub mod input;

pub use control::{
    intrinsic_size, ActionDispatcher, ControlAction, ControlEvent, GlyphElement, ListenerId,
    RatingControl, RatingError, ACTIVE_COLOR, COMPONENT_COUNT, COMPONENT_DIMENSION,
    COMPONENT_SPACING, INACTIVE_COLOR,
};
pub use flare::{Flare, FlarePhase, FLARE_DOWN_DURATION, FLARE_SCALE, FLARE_UP_DURATION};
pub use input::{GestureStep, GestureTracker, MouseButton, PointerEvent, TrackingState};
