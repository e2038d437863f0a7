//! Event dispatch system
//!
//! Unified event handling for the widget: scroll notifications from the
//! host list, pointer input for the close affordance, and the internal
//! transition triggers consumed by widget state machines.

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    /// Scroll position changed (carries the absolute offset, not a delta)
    pub const SCROLL: EventType = 10;
    /// Scroll gesture ended (finger lifted / deceleration finished)
    pub const SCROLL_END: EventType = 11;
    /// Request to expand the map to full screen
    pub const EXPAND: EventType = 20;
    /// Request to collapse the map back to its default height
    pub const COLLAPSE: EventType = 21;
    /// An in-flight height transition reached its terminal value
    pub const SETTLED: EventType = 22;
    pub const RESIZE: EventType = 30;

    // Element lifecycle events
    pub const MOUNT: EventType = 40;
    pub const UNMOUNT: EventType = 41;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Widget ID
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    /// Absolute scroll offset of the list content. Negative means the list
    /// has been pulled past its top edge (overscroll).
    Scroll {
        offset_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    /// Create an event with no payload
    pub fn new(event_type: EventType, target: u64) -> Self {
        Self {
            event_type,
            target,
            data: EventData::None,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Create a scroll event carrying an absolute offset
    pub fn scroll(target: u64, offset_y: f32) -> Self {
        Self {
            event_type: event_types::SCROLL,
            target,
            data: EventData::Scroll { offset_y },
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Create a scroll-end event carrying the offset at release
    pub fn scroll_end(target: u64, offset_y: f32) -> Self {
        Self {
            event_type: event_types::SCROLL_END,
            target,
            data: EventData::Scroll { offset_y },
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Create a pointer-up event at the given position
    pub fn pointer_up(target: u64, x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_UP,
            target,
            data: EventData::Pointer { x, y, button: 0 },
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<(u64, EventType), Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register an event handler for a widget and event type
    pub fn register<F>(&mut self, widget_id: u64, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.handlers
            .entry((widget_id, event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch an event to all registered handlers
    pub fn dispatch(&self, event: &mut Event) {
        if let Some(handlers) = self.handlers.get(&(event.target, event.event_type)) {
            tracing::trace!(
                "dispatch event_type={} target={} handlers={}",
                event.event_type,
                event.target,
                handlers.len()
            );
            for handler in handlers {
                if event.propagation_stopped {
                    break;
                }
                handler(event);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_to_registered_handler() {
        let mut dispatcher = EventDispatcher::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        dispatcher.register(7, event_types::SCROLL, move |event| {
            if let EventData::Scroll { offset_y } = event.data {
                received_clone.lock().unwrap().push(offset_y);
            }
        });

        dispatcher.dispatch(&mut Event::scroll(7, -40.0));
        dispatcher.dispatch(&mut Event::scroll(7, 12.5));

        assert_eq!(*received.lock().unwrap(), vec![-40.0, 12.5]);
    }

    #[test]
    fn test_dispatch_ignores_other_targets() {
        let mut dispatcher = EventDispatcher::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        dispatcher.register(1, event_types::SCROLL, move |_| {
            *count_clone.lock().unwrap() += 1;
        });

        dispatcher.dispatch(&mut Event::scroll(2, 0.0));
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_stop_propagation() {
        let mut dispatcher = EventDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_a = log.clone();
        dispatcher.register(1, event_types::POINTER_UP, move |_| {
            log_a.lock().unwrap().push("a");
        });
        let log_b = log.clone();
        dispatcher.register(1, event_types::POINTER_UP, move |_| {
            log_b.lock().unwrap().push("b");
        });

        let mut event = Event::pointer_up(1, 0.0, 0.0);
        event.stop_propagation();
        dispatcher.dispatch(&mut event);

        assert!(log.lock().unwrap().is_empty());
    }
}
