//! Tokens and their positions on the board.
//!
//! A token's position is a tagged variant rather than an overloaded integer.
//! Once a token has left base, its position is fully determined by the
//! owner's start offset and `steps_taken` (see [`TrackPosition::from_steps`]).

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::config::{GameConfig, TRACK_LEN};

/// Token identifier, unique within its owner (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a new token ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fully qualified token reference: owner plus ID.
///
/// This is what an input collaborator sends when a token is clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub color: Color,
    pub id: TokenId,
}

impl TokenRef {
    #[must_use]
    pub const fn new(color: Color, id: u8) -> Self {
        Self {
            color,
            id: TokenId::new(id),
        }
    }
}

impl std::fmt::Display for TokenRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.color, self.id.0)
    }
}

/// Where a token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackPosition {
    /// Waiting in the owner's base.
    AtBase,
    /// On the shared main track, absolute cell `0..52`.
    OnMainTrack(u8),
    /// In the owner's private home stretch, step `0..6`.
    InHomeStretch(u8),
    /// Reached home.
    Finished,
}

impl TrackPosition {
    /// Position of a token that has left base and taken `steps` steps.
    ///
    /// Steps up to the home-entry boundary stay on the main track (wrapping
    /// at the track length). Past the boundary the token is in its home
    /// stretch, and once it reaches the finishing home step it is finished.
    #[must_use]
    pub fn from_steps(color: Color, steps: u8, config: &GameConfig) -> Self {
        if steps <= config.home_entry_boundary {
            let cell = (u16::from(color.start_offset()) + u16::from(steps)) % u16::from(TRACK_LEN);
            TrackPosition::OnMainTrack(cell as u8)
        } else {
            let home_step = steps - config.home_entry_boundary;
            if home_step >= config.finish_home_step {
                TrackPosition::Finished
            } else {
                TrackPosition::InHomeStretch(home_step - 1)
            }
        }
    }

    /// Main-track cell, if the position is on the shared track.
    #[must_use]
    pub fn cell(self) -> Option<u8> {
        match self {
            TrackPosition::OnMainTrack(cell) => Some(cell),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrackPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackPosition::AtBase => write!(f, "base"),
            TrackPosition::OnMainTrack(cell) => write!(f, "cell {cell}"),
            TrackPosition::InHomeStretch(step) => write!(f, "home step {step}"),
            TrackPosition::Finished => write!(f, "home"),
        }
    }
}

/// A single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub position: TrackPosition,
    /// Forward steps since leaving base. Reset to 0 on capture.
    pub steps_taken: u8,
}

impl Token {
    /// A token waiting in base.
    #[must_use]
    pub const fn at_base(id: TokenId) -> Self {
        Self {
            id,
            position: TrackPosition::AtBase,
            steps_taken: 0,
        }
    }

    #[must_use]
    pub fn is_at_base(&self) -> bool {
        self.position == TrackPosition::AtBase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position == TrackPosition::Finished
    }

    /// Send the token back to base.
    pub fn reset(&mut self) {
        *self = Self::at_base(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ref_display() {
        assert_eq!(format!("{}", TokenRef::new(Color::Blue, 1)), "BLUE#1");
    }

    #[test]
    fn test_from_steps_main_track() {
        let config = GameConfig::default();

        assert_eq!(
            TrackPosition::from_steps(Color::Red, 0, &config),
            TrackPosition::OnMainTrack(0)
        );
        assert_eq!(
            TrackPosition::from_steps(Color::Green, 14, &config),
            TrackPosition::OnMainTrack(27)
        );
        // Blue wraps past cell 51
        assert_eq!(
            TrackPosition::from_steps(Color::Blue, 20, &config),
            TrackPosition::OnMainTrack(7)
        );
        assert_eq!(
            TrackPosition::from_steps(Color::Red, 50, &config),
            TrackPosition::OnMainTrack(50)
        );
    }

    #[test]
    fn test_from_steps_home_and_finish() {
        let config = GameConfig::default();

        assert_eq!(
            TrackPosition::from_steps(Color::Yellow, 51, &config),
            TrackPosition::InHomeStretch(0)
        );
        assert_eq!(
            TrackPosition::from_steps(Color::Yellow, 53, &config),
            TrackPosition::InHomeStretch(2)
        );
        assert_eq!(
            TrackPosition::from_steps(Color::Yellow, 55, &config),
            TrackPosition::InHomeStretch(4)
        );
        assert_eq!(
            TrackPosition::from_steps(Color::Yellow, 56, &config),
            TrackPosition::Finished
        );
        assert_eq!(
            TrackPosition::from_steps(Color::Yellow, 57, &config),
            TrackPosition::Finished
        );
    }

    #[test]
    fn test_token_reset() {
        let mut token = Token {
            id: TokenId(1),
            position: TrackPosition::OnMainTrack(30),
            steps_taken: 17,
        };
        token.reset();
        assert!(token.is_at_base());
        assert_eq!(token.steps_taken, 0);
        assert_eq!(token.id, TokenId(1));
    }

    #[test]
    fn test_cell() {
        assert_eq!(TrackPosition::OnMainTrack(9).cell(), Some(9));
        assert_eq!(TrackPosition::InHomeStretch(2).cell(), None);
        assert_eq!(TrackPosition::AtBase.cell(), None);
    }
}
