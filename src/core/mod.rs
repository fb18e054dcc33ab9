//! Core board types: colors, tokens, state, RNG, configuration.
//!
//! These are plain data with no turn logic. The rules that move them live
//! in `rules`.

pub mod color;
pub mod token;
pub mod rng;
pub mod config;
pub mod state;

pub use color::{Color, ColorMap, COLOR_COUNT};
pub use token::{Token, TokenId, TokenRef, TrackPosition};
pub use rng::{DiceRng, DiceRngState, DIE_FACES};
pub use config::{GameConfig, ENTRY_ROLL, HOME_STRETCH_LEN, TOKENS_PER_COLOR, TRACK_LEN};
pub use state::{GameState, LogEntry, PlayerState, RollPhase, WELCOME_MESSAGE};
