//! The game engine: turn sequencing over a [`GameState`].
//!
//! ## Phases
//!
//! ```text
//! Idle --roll--> Rolling --resolve_roll--> AwaitingMove --apply_move--> Idle
//!                   |
//!                   +--(no legal move)--auto_pass--> Idle (next player)
//! ```
//!
//! Once a winner is set, every operation is rejected.
//!
//! The engine is synchronous and does no I/O. Pacing delays between
//! `roll` and `resolve_roll` (or `auto_pass`) belong to the host. Each
//! transition queues [`GameEvent`]s, which the host drains and dispatches.

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{
    Color, DiceRng, GameConfig, GameState, RollPhase, TokenRef, TrackPosition,
    DIE_FACES, ENTRY_ROLL, TOKENS_PER_COLOR,
};
use crate::error::{ConfigError, Rejection};
use crate::events::GameEvent;

use super::movement::{destination, is_legal_move};

/// Tokens that may move for the current roll.
pub type LegalTokens = SmallVec<[TokenRef; TOKENS_PER_COLOR]>;

/// How a roll resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollResolution {
    /// The player must pick one of these tokens.
    AwaitingMove(LegalTokens),
    /// Nothing can move; the turn passes via `auto_pass`.
    NoLegalMove,
}

/// Everything a single `apply_move` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub token: TokenRef,
    pub from: TrackPosition,
    pub to: TrackPosition,
    pub roll: u8,
    /// Opposing tokens sent back to base.
    pub captured: SmallVec<[TokenRef; 4]>,
    /// Set if this move won the game.
    pub winner: Option<Color>,
    /// True if the mover rolls again.
    pub bonus_turn: bool,
    /// Whose turn it is now.
    pub next_player: Color,
}

impl MoveOutcome {
    /// One-line description of the move, its captures and any win.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!("{} moved {} steps to {}.", self.token.color, self.roll, self.to);
        for victim in &self.captured {
            summary.push_str(&format!(" Captured {}!", victim.color));
        }
        if let Some(winner) = self.winner {
            summary = format!("{winner} WINS!");
        }
        summary
    }
}

/// Owns the canonical game state and the only operations that change it.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: DiceRng,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create a new game. Uses `config.seed` if set, else OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => DiceRng::new(seed),
            None => DiceRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a new game with an explicit RNG.
    pub fn with_rng(config: GameConfig, rng: DiceRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config.turn_log_capacity);
        Ok(Self {
            config,
            state,
            rng,
            events: Vec::new(),
        })
    }

    /// Resume from an existing state (replays, scripted scenarios).
    pub fn from_state(config: GameConfig, state: GameState, rng: DiceRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            rng,
            events: Vec::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The winner, if the game is over.
    ///
    /// Unlike the queued `Won` event this can be read any number of times,
    /// so a caller can retry settlement after a failure.
    #[must_use]
    pub fn win_event(&self) -> Option<Color> {
        self.state.winner
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reject anything that needs a game in progress once there is a winner.
    pub fn ensure_in_play(&self) -> Result<(), Rejection> {
        if self.state.winner.is_some() {
            return Err(self.illegal_phase());
        }
        Ok(())
    }

    // === Legality ===

    /// Is `token` legal for `roll` under the movement rules?
    ///
    /// Pure: ignores phase and whose turn it is.
    #[must_use]
    pub fn is_legal_move(&self, token: TokenRef, roll: u8) -> bool {
        self.state
            .token(token)
            .is_some_and(|t| is_legal_move(t, roll, &self.config))
    }

    /// Current player's tokens that can move by `roll`.
    #[must_use]
    pub fn legal_tokens_for(&self, roll: u8) -> LegalTokens {
        self.state.players[self.state.current_player]
            .token_refs()
            .filter(|&t| self.is_legal_move(t, roll))
            .collect()
    }

    /// Current player's tokens that can move by the pending roll.
    #[must_use]
    pub fn legal_tokens(&self) -> LegalTokens {
        self.state
            .die_value
            .map(|roll| self.legal_tokens_for(roll))
            .unwrap_or_default()
    }

    // === Transitions ===

    /// Roll the die for the current player.
    ///
    /// Valid only in `Idle` with no winner. Moves to `Rolling`.
    pub fn roll(&mut self) -> Result<u8, Rejection> {
        self.ensure_phase(RollPhase::Idle)?;
        let value = self.rng.roll_die();
        Ok(self.record_roll(value))
    }

    /// Roll with a value from an outside die (replays, scripted play).
    ///
    /// Same phase rules as [`roll`](Self::roll). Values outside `1..=6`
    /// are rejected.
    pub fn roll_with(&mut self, value: u8) -> Result<u8, Rejection> {
        self.ensure_phase(RollPhase::Idle)?;
        if !(1..=DIE_FACES).contains(&value) {
            return Err(Rejection::RejectedInvalidRoll { value });
        }
        Ok(self.record_roll(value))
    }

    fn record_roll(&mut self, value: u8) -> u8 {
        let color = self.state.current_player;
        self.state.die_value = Some(value);
        self.state.phase = RollPhase::Rolling;
        self.push_event(GameEvent::Rolled { color, value });
        debug!(color = %color, roll = value, "die rolled");
        value
    }

    /// Resolve a pending roll once the host's roll delay has elapsed.
    ///
    /// With at least one legal token the phase becomes `AwaitingMove`.
    /// Otherwise the phase stays `Rolling` until [`auto_pass`](Self::auto_pass),
    /// so nothing else can act while the pass is pending.
    pub fn resolve_roll(&mut self) -> Result<RollResolution, Rejection> {
        self.ensure_phase(RollPhase::Rolling)?;
        let Some(roll) = self.state.die_value else {
            return Err(self.illegal_phase());
        };

        let legal = self.legal_tokens_for(roll);
        if legal.is_empty() {
            let color = self.state.current_player;
            self.push_event(GameEvent::NoLegalMove { color, value: roll });
            debug!(color = %color, roll, "no legal move");
            Ok(RollResolution::NoLegalMove)
        } else {
            self.state.phase = RollPhase::AwaitingMove;
            Ok(RollResolution::AwaitingMove(legal))
        }
    }

    /// Pass the turn after a roll with no legal move.
    ///
    /// Valid only while `Rolling` with no winner and no legal token for the
    /// pending roll. Returns the next player.
    pub fn auto_pass(&mut self) -> Result<Color, Rejection> {
        self.ensure_phase(RollPhase::Rolling)?;
        if self.state.die_value.is_none() || !self.legal_tokens().is_empty() {
            return Err(self.illegal_phase());
        }

        let from = self.state.current_player;
        let to = self.advance_player();
        self.push_quiet(GameEvent::TurnPassed { from, to });
        debug!(from = %from, to = %to, "turn auto-passed");
        Ok(to)
    }

    /// Move one of the current player's tokens by the pending roll.
    ///
    /// Checked in order: phase, ownership, legality. A rejected move leaves
    /// the state untouched.
    pub fn apply_move(&mut self, token: TokenRef) -> Result<MoveOutcome, Rejection> {
        self.ensure_phase(RollPhase::AwaitingMove)?;
        let Some(roll) = self.state.die_value else {
            return Err(self.illegal_phase());
        };

        let mover = self.state.current_player;
        if token.color != mover {
            return Err(Rejection::RejectedNotCurrentPlayer {
                token,
                current: mover,
            });
        }

        let Some(current) = self.state.token(token).copied() else {
            return Err(Rejection::RejectedIllegalMove { token, roll });
        };
        let Some(moved) = destination(mover, &current, roll, &self.config) else {
            return Err(Rejection::RejectedIllegalMove { token, roll });
        };

        // Nothing below can fail.
        if let Some(slot) = self.state.token_mut(token) {
            *slot = moved;
        }
        self.push_event(GameEvent::Moved {
            token,
            from: current.position,
            to: moved.position,
            roll,
        });
        debug!(token = %token, from = %current.position, to = %moved.position, roll, "token moved");

        let captured = match moved.position.cell() {
            Some(cell) => self.capture_at(token, cell),
            None => SmallVec::new(),
        };

        let winner = if self.state.players[mover].has_finished() {
            self.state.winner = Some(mover);
            self.push_event(GameEvent::Won { color: mover });
            info!(color = %mover, "game won");
            Some(mover)
        } else {
            None
        };

        let bonus_turn = winner.is_none() && roll == ENTRY_ROLL;
        let next_player = if winner.is_some() {
            self.state.die_value = None;
            self.state.phase = RollPhase::Idle;
            mover
        } else if bonus_turn {
            self.state.die_value = None;
            self.state.phase = RollPhase::Idle;
            self.state.turn_number += 1;
            self.push_quiet(GameEvent::BonusTurn { color: mover });
            mover
        } else {
            let to = self.advance_player();
            self.push_quiet(GameEvent::TurnPassed { from: mover, to });
            to
        };

        Ok(MoveOutcome {
            token,
            from: current.position,
            to: moved.position,
            roll,
            captured,
            winner,
            bonus_turn,
            next_player,
        })
    }

    /// Start the next game on the same table.
    ///
    /// Every token returns to base and Red plays first. The die keeps its
    /// sequence, so a seeded table stays reproducible across games.
    pub fn new_game(&mut self) {
        self.state = GameState::new(self.config.turn_log_capacity);
        self.events.clear();
        info!("new game started");
    }

    // === Internals ===

    /// Send every opposing token on `cell` back to base.
    fn capture_at(&mut self, by: TokenRef, cell: u8) -> SmallVec<[TokenRef; 4]> {
        let victims: SmallVec<[TokenRef; 4]> = self
            .state
            .tokens()
            .filter(|(r, t)| r.color != by.color && t.position.cell() == Some(cell))
            .map(|(r, _)| r)
            .collect();

        for &victim in &victims {
            if let Some(t) = self.state.token_mut(victim) {
                t.reset();
            }
            self.push_event(GameEvent::Captured { by, victim, cell });
            debug!(by = %by, victim = %victim, cell, "token captured");
        }
        victims
    }

    fn advance_player(&mut self) -> Color {
        let next = self.state.current_player.next();
        self.state.current_player = next;
        self.state.die_value = None;
        self.state.phase = RollPhase::Idle;
        self.state.turn_number += 1;
        next
    }

    fn ensure_phase(&self, expected: RollPhase) -> Result<(), Rejection> {
        if self.state.winner.is_some() || self.state.phase != expected {
            return Err(self.illegal_phase());
        }
        Ok(())
    }

    fn illegal_phase(&self) -> Rejection {
        Rejection::RejectedIllegalPhase {
            phase: self.state.phase,
            winner: self.state.winner,
        }
    }

    /// Queue an event and write it to the turn log.
    fn push_event(&mut self, event: GameEvent) {
        self.state.push_log(event.describe());
        self.events.push(event);
    }

    /// Queue an event without logging it.
    fn push_quiet(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
