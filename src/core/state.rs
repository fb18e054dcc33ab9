//! Game state.
//!
//! ## GameState
//!
//! The canonical state owned by the engine:
//! - Per-color players and their tokens
//! - Current player, die value, roll phase
//! - Winner (terminal once set)
//! - Bounded turn log, most recent entry first
//!
//! Cloning is cheap: the turn log uses an `im` persistent vector, so the
//! engine can hand out snapshots to renderers and commentators freely.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::color::{Color, ColorMap};
use super::config::TOKENS_PER_COLOR;
use super::token::{Token, TokenId, TokenRef};

/// Greeting placed in the turn log of a fresh game.
pub const WELCOME_MESSAGE: &str = "Welcome to the table! Place your bets!";

/// Where the current turn is in the roll/move cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollPhase {
    /// Waiting for the current player to roll.
    #[default]
    Idle,
    /// Die rolled; resolution (or an automatic pass) is pending.
    Rolling,
    /// Waiting for the current player to pick a token.
    AwaitingMove,
}

/// One color's seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    pub tokens: [Token; TOKENS_PER_COLOR],
}

impl PlayerState {
    /// A player with every token at base.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            tokens: [Token::at_base(TokenId(0)), Token::at_base(TokenId(1))],
        }
    }

    /// True iff every token is finished.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.tokens.iter().all(Token::is_finished)
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id.index())
    }

    /// References to this player's tokens.
    pub fn token_refs(&self) -> impl Iterator<Item = TokenRef> + '_ {
        self.tokens.iter().map(|t| TokenRef {
            color: self.color,
            id: t.id,
        })
    }
}

/// A turn log line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn number the entry was written in.
    pub turn: u32,
    pub message: String,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: ColorMap<PlayerState>,

    /// Whose turn it is.
    pub current_player: Color,

    /// Value of the pending roll, cleared once the turn resolves.
    pub die_value: Option<u8>,

    pub phase: RollPhase,

    /// Set once, when a player finishes both tokens. Terminal.
    pub winner: Option<Color>,

    /// Turn number (starts at 1, advances on each change of player or bonus
    /// roll).
    pub turn_number: u32,

    turn_log: Vector<LogEntry>,
    log_capacity: usize,
}

impl GameState {
    /// Create a new game with every token at base and Red to play.
    #[must_use]
    pub fn new(log_capacity: usize) -> Self {
        let log_capacity = log_capacity.max(1);
        let mut turn_log = Vector::new();
        turn_log.push_back(LogEntry {
            turn: 0,
            message: WELCOME_MESSAGE.to_string(),
        });

        Self {
            players: ColorMap::new(PlayerState::new),
            current_player: Color::Red,
            die_value: None,
            phase: RollPhase::Idle,
            winner: None,
            turn_number: 1,
            turn_log,
            log_capacity,
        }
    }

    /// Look up a token.
    #[must_use]
    pub fn token(&self, token: TokenRef) -> Option<&Token> {
        self.players[token.color].token(token.id)
    }

    pub fn token_mut(&mut self, token: TokenRef) -> Option<&mut Token> {
        self.players[token.color].token_mut(token.id)
    }

    /// Every token on the board, in rotation order.
    pub fn tokens(&self) -> impl Iterator<Item = (TokenRef, &Token)> {
        self.players.iter().flat_map(|(color, player)| {
            player.tokens.iter().map(move |t| (TokenRef { color, id: t.id }, t))
        })
    }

    /// True once a winner has been declared.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    // === Turn Log ===

    /// Log entries, most recent first.
    pub fn turn_log(&self) -> impl Iterator<Item = &LogEntry> {
        self.turn_log.iter()
    }

    /// Most recent log entry.
    #[must_use]
    pub fn last_log(&self) -> Option<&LogEntry> {
        self.turn_log.front()
    }

    /// Prepend a log line, dropping the oldest past capacity.
    pub fn push_log(&mut self, message: impl Into<String>) {
        self.turn_log.push_front(LogEntry {
            turn: self.turn_number,
            message: message.into(),
        });
        while self.turn_log.len() > self.log_capacity {
            self.turn_log.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::TrackPosition;

    #[test]
    fn test_new_game() {
        let state = GameState::new(5);

        assert_eq!(state.current_player, Color::Red);
        assert_eq!(state.phase, RollPhase::Idle);
        assert_eq!(state.die_value, None);
        assert_eq!(state.winner, None);
        assert_eq!(state.tokens().count(), 8);
        assert!(state.tokens().all(|(_, t)| t.is_at_base() && t.steps_taken == 0));
        assert_eq!(state.last_log().map(|e| e.message.as_str()), Some(WELCOME_MESSAGE));
    }

    #[test]
    fn test_turn_log_bounded_most_recent_first() {
        let mut state = GameState::new(3);
        for i in 0..5 {
            state.push_log(format!("entry {i}"));
        }

        let messages: Vec<_> = state.turn_log().map(|e| e.message.clone()).collect();
        assert_eq!(messages, vec!["entry 4", "entry 3", "entry 2"]);
    }

    #[test]
    fn test_push_log_below_capacity() {
        let mut state = GameState::new(5);
        state.push_log("RED rolled a 2");

        let messages: Vec<_> = state.turn_log().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["RED rolled a 2", WELCOME_MESSAGE]);
    }

    #[test]
    fn test_has_finished() {
        let mut player = PlayerState::new(Color::Green);
        assert!(!player.has_finished());

        player.tokens[0].position = TrackPosition::Finished;
        assert!(!player.has_finished());

        player.tokens[1].position = TrackPosition::Finished;
        assert!(player.has_finished());
    }

    #[test]
    fn test_token_lookup() {
        let mut state = GameState::new(5);
        let token = TokenRef::new(Color::Yellow, 1);

        state.token_mut(token).unwrap().position = TrackPosition::OnMainTrack(26);

        assert_eq!(state.token(token).unwrap().position, TrackPosition::OnMainTrack(26));
        assert!(state.token(TokenRef::new(Color::Yellow, 2)).is_none());
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut state = GameState::new(5);
        state.push_log("RED rolled a 6");
        state.die_value = Some(6);

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, restored);
    }
}
