//! # ludo-bet
//!
//! A four-player race-board game engine with a side wager.
//!
//! Players take turns rolling a die and moving two tokens each from base,
//! around a shared 52-cell track, up a private home stretch and home.
//! Landing on an opponent sends it back to base. A single bettor backs one
//! color for a fixed payout multiplier, settled when someone wins.
//!
//! ## Design Principles
//!
//! 1. **Pure core**: The engine and the ledger are synchronous state
//!    machines with no I/O. Illegal operations return a [`Rejection`] and
//!    leave state untouched.
//!
//! 2. **One-way coupling**: The engine emits events; the ledger observes
//!    them. The win is passed by value as a color, never by reference.
//!
//! 3. **Host-owned time**: Pacing delays and the commentary collaborator
//!    live in the async session, not in the rules.
//!
//! ## Modules
//!
//! - `core`: Colors, tokens, state, RNG, configuration
//! - `rules`: Movement legality and the turn engine
//! - `events`: Game events and observers
//! - `wager`: Wallet and wager settlement
//! - `commentary`: Narrative commentary collaborator and feed
//! - `session`: Async host loop with cancellable timers

pub mod core;
pub mod error;
pub mod rules;
pub mod events;
pub mod wager;
pub mod commentary;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap, DiceRng, DiceRngState, GameConfig, GameState, LogEntry, PlayerState,
    RollPhase, Token, TokenId, TokenRef, TrackPosition,
};

pub use crate::error::{CommentaryError, ConfigError, Rejection, SessionError};

pub use crate::rules::{GameEngine, LegalTokens, MoveOutcome, RollResolution};

pub use crate::events::{dispatch, GameEvent, GameObserver};

pub use crate::wager::{Settlement, Wager, WagerLedger, WalletState};

pub use crate::commentary::{CommentaryFeed, Commentator, ScriptedCommentator, SilentCommentator};

pub use crate::session::{GameSession, SessionHandle, SessionSnapshot, TimerKind};
