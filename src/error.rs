//! Error and rejection types.
//!
//! Illegal operations never panic and never mutate state. They return a
//! [`Rejection`] reason code and the caller decides whether to surface it.

use thiserror::Error;

use crate::core::{Color, RollPhase, TokenRef};

/// Why an engine or ledger operation was refused.
///
/// Every rejection leaves the owning component's state exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The operation is not valid in the current phase, or the game is over.
    #[error("operation not allowed in phase {phase:?} (winner: {winner:?})")]
    RejectedIllegalPhase {
        phase: RollPhase,
        winner: Option<Color>,
    },

    /// The token belongs to a color whose turn it is not.
    #[error("{token} does not belong to the current player {current}")]
    RejectedNotCurrentPlayer { token: TokenRef, current: Color },

    /// A die value from an outside source is not a face of the die.
    #[error("{value} is not a die face")]
    RejectedInvalidRoll { value: u8 },

    /// The token cannot move by the rolled value.
    #[error("{token} cannot move {roll} steps")]
    RejectedIllegalMove { token: TokenRef, roll: u8 },

    /// The wager is zero or exceeds the wallet balance.
    #[error("wager of {amount} exceeds balance {balance}")]
    RejectedInsufficientFunds { amount: u64, balance: u64 },

    /// A wager is already outstanding.
    #[error("a wager on {backed} is already active")]
    RejectedDuplicateWager { backed: Color },

    /// Settlement requested with nothing to settle.
    #[error("no active wager")]
    NoOpAlreadySettled,
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("home entry boundary {0} must lie inside the main track")]
    HomeEntryOutOfRange(u8),

    #[error("finish home step {0} must lie inside the home stretch")]
    FinishStepOutOfRange(u8),

    #[error("overshoot limit {limit} is below the finishing step count {finish}")]
    OvershootBelowFinish { limit: u8, finish: u8 },

    #[error("turn log capacity must be at least 1")]
    EmptyTurnLog,

    #[error("payout multiplier must be at least 1")]
    ZeroPayout,
}

/// Failure reported by a commentary collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommentaryError {
    #[error("commentary service unavailable")]
    Unavailable,

    #[error("commentary request failed: {0}")]
    Failed(String),
}

/// Failure talking to a running game session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session task has stopped.
    #[error("game session is closed")]
    Closed,

    /// The session processed the command and refused it.
    #[error(transparent)]
    Rejected(#[from] Rejection),
}
