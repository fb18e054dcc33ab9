//! Movement rules: legality and destination of a single token.
//!
//! These are pure functions of a token, its owner, a roll and the config.
//! The engine layers phase checks, captures and turn order on top.

use crate::core::{Color, GameConfig, Token, TrackPosition, ENTRY_ROLL};

/// Can `token` move by `roll`?
///
/// - A token at base needs exactly [`ENTRY_ROLL`].
/// - A finished token never moves.
/// - Anything else moves unless `steps_taken + roll` overshoots
///   `overshoot_limit`. An overshoot only blocks that token.
#[must_use]
pub fn is_legal_move(token: &Token, roll: u8, config: &GameConfig) -> bool {
    match token.position {
        TrackPosition::AtBase => roll == ENTRY_ROLL,
        TrackPosition::Finished => false,
        TrackPosition::OnMainTrack(_) | TrackPosition::InHomeStretch(_) => {
            u16::from(token.steps_taken) + u16::from(roll) <= u16::from(config.overshoot_limit)
        }
    }
}

/// Where `token` ends up after moving by `roll`.
///
/// Returns `None` if the move is illegal. Leaving base places the token on
/// its color's start cell with zero steps; every other move adds the roll to
/// `steps_taken` and maps the total back to a position.
#[must_use]
pub fn destination(color: Color, token: &Token, roll: u8, config: &GameConfig) -> Option<Token> {
    if !is_legal_move(token, roll, config) {
        return None;
    }

    let moved = if token.is_at_base() {
        Token {
            id: token.id,
            position: TrackPosition::OnMainTrack(color.start_offset()),
            steps_taken: 0,
        }
    } else {
        let total = token.steps_taken + roll;
        Token {
            id: token.id,
            position: TrackPosition::from_steps(color, total, config),
            steps_taken: total,
        }
    };
    Some(moved)
}
