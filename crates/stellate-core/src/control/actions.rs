//! Control notifications and the listener list that delivers them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of notification a rating control emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlEvent {
    /// A pointer pressed down on the control.
    PressDown,
    /// The pointer moved while inside the control's bounds.
    DragInside,
    /// The pointer moved while outside the control's bounds.
    DragOutside,
    /// The pointer was released inside the control's bounds.
    UpInside,
    /// The pointer was released outside the control's bounds.
    UpOutside,
    /// The host cancelled the gesture.
    TouchCancel,
    /// The rating may have changed.
    ValueChanged,
}

impl ControlEvent {
    /// Every event kind.
    pub const ALL: [ControlEvent; 7] = [
        ControlEvent::PressDown,
        ControlEvent::DragInside,
        ControlEvent::DragOutside,
        ControlEvent::UpInside,
        ControlEvent::UpOutside,
        ControlEvent::TouchCancel,
        ControlEvent::ValueChanged,
    ];

    /// Display name for this event kind.
    pub fn name(self) -> &'static str {
        match self {
            ControlEvent::PressDown => "press-down",
            ControlEvent::DragInside => "drag-inside",
            ControlEvent::DragOutside => "drag-outside",
            ControlEvent::UpInside => "up-inside",
            ControlEvent::UpOutside => "up-outside",
            ControlEvent::TouchCancel => "touch-cancel",
            ControlEvent::ValueChanged => "value-changed",
        }
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A delivered notification: the event kind plus the rating at send time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAction {
    pub event: ControlEvent,
    pub value: u8,
}

/// Handle returned by [`ActionDispatcher::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    event: ControlEvent,
    callback: Box<dyn FnMut(&ControlAction)>,
}

/// Ordered listener list. Listeners for an event run in registration order.
#[derive(Default)]
pub struct ActionDispatcher {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ActionDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event`.
    pub fn add_listener<F>(&mut self, event: ControlEvent, callback: F) -> ListenerId
    where
        F: FnMut(&ControlAction) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            event,
            callback: Box::new(callback),
        });
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Send each event in order to the listeners registered for it.
    pub fn send_actions(&mut self, events: &[ControlEvent], value: u8) {
        for &event in events {
            let action = ControlAction { event, value };
            log::trace!("Sending {} (value {})", event, value);
            for listener in self.listeners.iter_mut().filter(|l| l.event == event) {
                (listener.callback)(&action);
            }
        }
    }
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
