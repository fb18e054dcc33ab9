//! Event system for reacting to play.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: A transition that occurred, with its data
//! - [`GameObserver`]: Anything that reacts to events
//! - [`dispatch`]: Fan a batch of events out to observers
//!
//! The wager ledger subscribes as an observer and settles on
//! [`GameEvent::Won`]; the engine never calls into it.
//!
//! ## Example Usage
//!
//! ```
//! use ludo_bet::core::Color;
//! use ludo_bet::events::{dispatch, EventRecorder, GameEvent};
//!
//! let mut recorder = EventRecorder::default();
//! let events = [GameEvent::Won { color: Color::Green }];
//!
//! dispatch(&events, &mut [&mut recorder]);
//! assert_eq!(recorder.events.len(), 1);
//! ```

mod event;
mod observer;

pub use event::GameEvent;
pub use observer::{dispatch, EventRecorder, GameObserver};
