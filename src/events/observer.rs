//! Event observers.
//!
//! Components that react to play implement [`GameObserver`]. The engine
//! knows nothing about who is listening: it only queues events, and the
//! host calls [`dispatch`] with whatever observers it owns.

use super::event::GameEvent;

/// Receives game events in the order they occurred.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Deliver every event to every observer, event by event.
pub fn dispatch(events: &[GameEvent], observers: &mut [&mut dyn GameObserver]) {
    for event in events {
        for observer in observers.iter_mut() {
            observer.on_event(event);
        }
    }
}

/// Observer that records every event it sees.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    pub events: Vec<GameEvent>,
}

impl GameObserver for EventRecorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_dispatch_order() {
        let mut a = EventRecorder::default();
        let mut b = EventRecorder::default();
        let events = vec![
            GameEvent::Rolled { color: Color::Red, value: 3 },
            GameEvent::TurnPassed { from: Color::Red, to: Color::Green },
        ];

        dispatch(&events, &mut [&mut a, &mut b]);

        assert_eq!(a.events, events);
        assert_eq!(b.events, events);
    }
}
