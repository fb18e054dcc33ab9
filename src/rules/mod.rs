//! Game rules.
//!
//! - `movement`: pure legality and destination of a single token
//! - `engine`: the turn state machine built on top of it
//!
//! Nothing here knows about wagers. The engine's only outward signal is the
//! event queue.

pub mod movement;
pub mod engine;

pub use movement::{destination, is_legal_move};
pub use engine::{GameEngine, LegalTokens, MoveOutcome, RollResolution};
