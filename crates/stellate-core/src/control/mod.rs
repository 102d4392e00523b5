//! The five-star rating control.
//!
//! [`RatingControl`] owns a fixed row of [`GlyphElement`]s and reacts to the
//! pointer lifecycle:
//! - `begin_tracking` when a press lands on the control
//! - `continue_tracking` on every move while the gesture lasts
//! - `end_tracking` on release (a release without a location is a no-op)
//! - `cancel_tracking` when the host interrupts the gesture
//!
//! Every step updates the rating from the pointer position and notifies
//! listeners registered through [`RatingControl::add_listener`].

mod actions;
mod glyph;

pub use actions::{ActionDispatcher, ControlAction, ControlEvent, ListenerId};
pub use glyph::{GlyphElement, ACTIVE_COLOR, INACTIVE_COLOR};

use kurbo::{Point, Rect, Size};
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::input::{GestureStep, GestureTracker, PointerEvent, TrackingState};

/// Number of stars.
pub const COMPONENT_COUNT: u8 = 5;
/// Side of each star's square frame.
pub const COMPONENT_DIMENSION: f64 = 40.0;
/// Gap before each star.
pub const COMPONENT_SPACING: f64 = 8.0;

/// Errors from programmatic rating updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating {value} is outside 1..={max}")]
    OutOfRange { value: u8, max: u8 },
}

/// Size the control needs to show every star with its spacing.
pub fn intrinsic_size() -> Size {
    let count = f64::from(COMPONENT_COUNT);
    let components_width = count * COMPONENT_DIMENSION;
    let components_spacing = (count + 1.0) * COMPONENT_SPACING;
    Size::new(components_width + components_spacing, COMPONENT_DIMENSION)
}

/// A pointer-driven star rating, always in `1..=COMPONENT_COUNT`.
#[derive(Debug)]
pub struct RatingControl {
    value: u8,
    previous_value: u8,
    elements: Vec<GlyphElement>,
    actions: ActionDispatcher,
    tracker: GestureTracker,
}

impl RatingControl {
    /// Create a control rated 1 with the first star emphasized.
    pub fn new() -> Self {
        let mut control = Self {
            value: 1,
            previous_value: 1,
            elements: Vec::with_capacity(usize::from(COMPONENT_COUNT)),
            actions: ActionDispatcher::new(),
            tracker: GestureTracker::new(),
        };
        control.setup();
        control
    }

    fn setup(&mut self) {
        for index in 1..=COMPONENT_COUNT {
            let mut element = GlyphElement::new(index, COMPONENT_DIMENSION, COMPONENT_SPACING);
            element.set_emphasized(index == 1);
            self.elements.push(element);
        }
    }

    /// Current rating.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Last committed rating.
    pub fn previous_value(&self) -> u8 {
        self.previous_value
    }

    /// Stars in left-to-right order.
    pub fn elements(&self) -> &[GlyphElement] {
        &self.elements
    }

    /// Star by 1-based index.
    pub fn element(&self, index: u8) -> Option<&GlyphElement> {
        self.elements.iter().find(|element| element.index() == index)
    }

    /// Preferred layout size.
    pub fn intrinsic_size(&self) -> Size {
        intrinsic_size()
    }

    /// Local bounds, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.intrinsic_size())
    }

    /// State of the gesture driven through [`Self::handle_pointer_event`].
    pub fn tracking_state(&self) -> TrackingState {
        self.tracker.state()
    }

    /// Register a listener for one notification kind.
    pub fn add_listener<F>(&mut self, event: ControlEvent, callback: F) -> ListenerId
    where
        F: FnMut(&ControlAction) + 'static,
    {
        self.actions.add_listener(event, callback)
    }

    /// Unregister a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.actions.remove_listener(id)
    }

    /// Set the rating without notifying listeners or playing a flare.
    pub fn set_value(&mut self, value: u8) -> Result<(), RatingError> {
        if !(1..=COMPONENT_COUNT).contains(&value) {
            return Err(RatingError::OutOfRange {
                value,
                max: COMPONENT_COUNT,
            });
        }
        self.value = value;
        self.previous_value = value;
        self.refresh_emphasis();
        Ok(())
    }

    /// A press landed on the control. Always keeps tracking.
    pub fn begin_tracking(&mut self, point: Point) -> bool {
        self.update_value(point, Instant::now());
        self.send_actions(&[ControlEvent::PressDown, ControlEvent::ValueChanged]);
        true
    }

    /// The pointer moved during a gesture. Always keeps tracking.
    pub fn continue_tracking(&mut self, point: Point) -> bool {
        if self.bounds().contains(point) {
            self.update_value(point, Instant::now());
            self.send_actions(&[ControlEvent::DragInside, ControlEvent::ValueChanged]);
        } else {
            self.send_actions(&[ControlEvent::DragOutside]);
        }
        true
    }

    /// The gesture ended. Without a final location nothing happens.
    pub fn end_tracking(&mut self, point: Option<Point>) {
        let Some(point) = point else {
            return;
        };
        if self.bounds().contains(point) {
            self.update_value(point, Instant::now());
            self.send_actions(&[ControlEvent::UpInside, ControlEvent::ValueChanged]);
        } else {
            self.send_actions(&[ControlEvent::UpOutside]);
        }
    }

    /// The host cancelled the gesture.
    pub fn cancel_tracking(&mut self) {
        self.send_actions(&[ControlEvent::TouchCancel]);
    }

    /// Feed a raw pointer event in control-local coordinates.
    ///
    /// Returns true if the event advanced a gesture on this control.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        let Some(step) = self.tracker.handle_pointer_event(event, self.bounds()) else {
            return false;
        };
        match step {
            GestureStep::Begin(point) => {
                self.begin_tracking(point);
            }
            GestureStep::Continue(point) => {
                self.continue_tracking(point);
            }
            GestureStep::End(point) => self.end_tracking(point),
            GestureStep::Cancel => self.cancel_tracking(),
        }
        true
    }

    /// Whether any star is mid-flare.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.elements.iter().any(|element| element.is_animating(now))
    }

    fn update_value(&mut self, point: Point, now: Instant) {
        if let Some(element) = self.elements.iter_mut().find(|element| element.contains(point)) {
            self.value = element.index();
            if self.value != self.previous_value {
                self.previous_value = self.value;
                element.perform_flare(now);
                log::debug!("Rating committed: {}", self.value);
                // Listeners also get the caller's own ValueChanged afterwards.
                self.actions.send_actions(&[ControlEvent::ValueChanged], self.value);
            }
        }
        self.refresh_emphasis();
        debug_assert!(
            (1..=COMPONENT_COUNT).contains(&self.value),
            "rating {} out of range",
            self.value
        );
    }

    fn refresh_emphasis(&mut self) {
        let value = self.value;
        for element in &mut self.elements {
            element.set_emphasized(element.index() <= value);
        }
    }

    fn send_actions(&mut self, events: &[ControlEvent]) {
        self.actions.send_actions(events, self.value);
    }
}

impl Default for RatingControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Center of star `index`.
    fn star(index: u8) -> Point {
        let i = f64::from(index);
        Point::new(8.0 * i + 40.0 * (i - 1.0) + 20.0, 20.0)
    }

    fn recorded(control: &mut RatingControl) -> Rc<RefCell<Vec<ControlEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for event in ControlEvent::ALL {
            let sink = log.clone();
            control.add_listener(event, move |action| sink.borrow_mut().push(action.event));
        }
        log
    }

    fn emphasized(control: &RatingControl) -> Vec<bool> {
        control.elements().iter().map(|e| e.is_emphasized()).collect()
    }

    #[test]
    fn test_element_bounds() {
        let control = RatingControl::new();
        assert_eq!(control.elements().len(), 5);
        for (offset, element) in control.elements().iter().enumerate() {
            let i = offset as f64 + 1.0;
            assert_eq!(element.index(), offset as u8 + 1);
            let bounds = element.bounds();
            assert!((bounds.x0 - (8.0 * i + 40.0 * (i - 1.0))).abs() < f64::EPSILON);
            assert!(bounds.y0.abs() < f64::EPSILON);
            assert!((bounds.width() - 40.0).abs() < f64::EPSILON);
            assert!((bounds.height() - 40.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_intrinsic_size() {
        let control = RatingControl::new();
        assert_eq!(control.intrinsic_size(), Size::new(248.0, 40.0));
        assert_eq!(control.bounds(), Rect::new(0.0, 0.0, 248.0, 40.0));
    }

    #[test]
    fn test_initial_state() {
        let control = RatingControl::new();
        assert_eq!(control.value(), 1);
        assert_eq!(control.previous_value(), 1);
        assert_eq!(emphasized(&control), vec![true, false, false, false, false]);
        assert!(control.elements().iter().all(|e| e.flare().is_none()));
    }

    #[test]
    fn test_press_selects_star() {
        let mut control = RatingControl::new();
        let log = recorded(&mut control);

        assert!(control.begin_tracking(star(3)));

        assert_eq!(control.value(), 3);
        assert_eq!(emphasized(&control), vec![true, true, true, false, false]);
        assert!(control.element(3).unwrap().flare().is_some());
        // Commit notification, then the press pair
        assert_eq!(
            *log.borrow(),
            vec![
                ControlEvent::ValueChanged,
                ControlEvent::PressDown,
                ControlEvent::ValueChanged,
            ]
        );
    }

    #[test]
    fn test_emphasis_fills_every_star_up_to_value() {
        for target in 1..=COMPONENT_COUNT {
            let mut control = RatingControl::new();
            control.begin_tracking(star(target));
            let expected: Vec<bool> = (1..=COMPONENT_COUNT).map(|i| i <= target).collect();
            assert_eq!(emphasized(&control), expected);
        }

        // Upward drag from a lower rating lights the stars in between
        let mut control = RatingControl::new();
        control.begin_tracking(star(2));
        control.continue_tracking(star(5));
        assert_eq!(emphasized(&control), vec![true; 5]);
        control.end_tracking(Some(star(1)));
        assert_eq!(emphasized(&control), vec![true, false, false, false, false]);
    }

    #[test]
    fn test_press_in_gap_keeps_value() {
        let mut control = RatingControl::new();
        let log = recorded(&mut control);

        control.begin_tracking(Point::new(2.0, 20.0));

        assert_eq!(control.value(), 1);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::PressDown, ControlEvent::ValueChanged]
        );
    }

    #[test]
    fn test_drag_inside_and_outside() {
        let mut control = RatingControl::new();
        control.begin_tracking(star(3));
        let log = recorded(&mut control);

        control.continue_tracking(star(4));
        assert_eq!(control.value(), 4);
        control.continue_tracking(star(5));
        assert_eq!(control.value(), 5);
        assert_eq!(emphasized(&control), vec![true; 5]);
        assert_eq!(
            *log.borrow(),
            vec![
                ControlEvent::ValueChanged,
                ControlEvent::DragInside,
                ControlEvent::ValueChanged,
                ControlEvent::ValueChanged,
                ControlEvent::DragInside,
                ControlEvent::ValueChanged,
            ]
        );

        log.borrow_mut().clear();
        assert!(control.continue_tracking(Point::new(300.0, 20.0)));
        assert!(control.continue_tracking(Point::new(100.0, -5.0)));
        assert_eq!(control.value(), 5);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::DragOutside, ControlEvent::DragOutside]
        );
    }

    #[test]
    fn test_release_inside_and_outside() {
        let mut control = RatingControl::new();
        control.begin_tracking(star(5));
        let log = recorded(&mut control);

        control.end_tracking(Some(star(2)));
        assert_eq!(control.value(), 2);
        assert_eq!(emphasized(&control), vec![true, true, false, false, false]);
        assert_eq!(
            *log.borrow(),
            vec![
                ControlEvent::ValueChanged,
                ControlEvent::UpInside,
                ControlEvent::ValueChanged,
            ]
        );

        log.borrow_mut().clear();
        control.end_tracking(Some(Point::new(400.0, 400.0)));
        assert_eq!(control.value(), 2);
        assert_eq!(*log.borrow(), vec![ControlEvent::UpOutside]);
    }

    #[test]
    fn test_release_without_point_is_noop() {
        let mut control = RatingControl::new();
        control.begin_tracking(star(4));
        let log = recorded(&mut control);

        control.end_tracking(None);

        assert_eq!(control.value(), 4);
        assert_eq!(control.previous_value(), 4);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_cancel_only_notifies() {
        let mut control = RatingControl::new();
        control.begin_tracking(star(2));
        let log = recorded(&mut control);

        control.cancel_tracking();

        assert_eq!(control.value(), 2);
        assert_eq!(*log.borrow(), vec![ControlEvent::TouchCancel]);
    }

    #[test]
    fn test_repeat_selection_does_not_reflare() {
        let mut control = RatingControl::new();
        control.begin_tracking(star(3));
        control.end_tracking(Some(star(3)));
        let first_flare = *control.element(3).unwrap().flare().unwrap();
        let log = recorded(&mut control);

        control.begin_tracking(star(3));

        assert_eq!(control.value(), 3);
        assert_eq!(control.previous_value(), 3);
        assert_eq!(*control.element(3).unwrap().flare().unwrap(), first_flare);
        assert_eq!(
            *log.borrow(),
            vec![ControlEvent::PressDown, ControlEvent::ValueChanged]
        );
    }

    #[test]
    fn test_listener_sees_current_value() {
        let mut control = RatingControl::new();
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        control.add_listener(ControlEvent::ValueChanged, move |action| {
            sink.borrow_mut().push(action.value);
        });

        control.begin_tracking(star(4));
        control.continue_tracking(star(2));

        assert_eq!(*values.borrow(), vec![4, 4, 2, 2]);
    }

    #[test]
    fn test_set_value() {
        let mut control = RatingControl::new();
        let log = recorded(&mut control);

        control.set_value(4).unwrap();
        assert_eq!(control.value(), 4);
        assert_eq!(control.previous_value(), 4);
        assert_eq!(emphasized(&control), vec![true, true, true, true, false]);
        assert!(control.element(4).unwrap().flare().is_none());
        assert!(log.borrow().is_empty());

        assert_eq!(
            control.set_value(0),
            Err(RatingError::OutOfRange { value: 0, max: 5 })
        );
        assert_eq!(
            control.set_value(6),
            Err(RatingError::OutOfRange { value: 6, max: 5 })
        );
        assert_eq!(control.value(), 4);
    }

    #[test]
    fn test_pointer_events_drive_lifecycle() {
        let mut control = RatingControl::new();
        let log = recorded(&mut control);

        // A press that misses the control never starts a gesture
        assert!(!control.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(-10.0, 20.0),
            button: MouseButton::Left,
        }));
        assert!(!control.handle_pointer_event(&PointerEvent::Move { position: star(4) }));
        assert!(log.borrow().is_empty());

        assert!(control.handle_pointer_event(&PointerEvent::Down {
            position: star(2),
            button: MouseButton::Left,
        }));
        assert_eq!(control.tracking_state(), TrackingState::Tracking);
        assert!(control.handle_pointer_event(&PointerEvent::Move { position: star(5) }));
        assert!(control.handle_pointer_event(&PointerEvent::Up {
            position: star(5),
            button: MouseButton::Left,
        }));

        assert_eq!(control.tracking_state(), TrackingState::Idle);
        assert_eq!(control.value(), 5);
        assert_eq!(log.borrow().first(), Some(&ControlEvent::ValueChanged));
        assert_eq!(log.borrow().last(), Some(&ControlEvent::ValueChanged));
        assert!(log.borrow().contains(&ControlEvent::UpInside));
    }

    #[test]
    fn test_pointer_gone_ends_silently() {
        let mut control = RatingControl::new();
        control.handle_pointer_event(&PointerEvent::Down {
            position: star(3),
            button: MouseButton::Left,
        });
        let log = recorded(&mut control);

        assert!(control.handle_pointer_event(&PointerEvent::Gone));

        assert_eq!(control.tracking_state(), TrackingState::Idle);
        assert_eq!(control.value(), 3);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_is_animating_after_commit() {
        let mut control = RatingControl::new();
        let before = Instant::now();
        assert!(!control.is_animating(before));

        control.begin_tracking(star(5));

        let started = control.element(5).unwrap().flare().unwrap().started();
        assert!(control.is_animating(started));
        assert!(!control.is_animating(started + std::time::Duration::from_millis(400)));
    }
}
