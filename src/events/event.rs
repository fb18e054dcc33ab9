//! Game event types.
//!
//! Events describe what a transition did. The engine queues them as it
//! mutates state; hosts drain the queue and hand each event to observers.
//! `Won` is the only signal that crosses into the wager ledger, and it
//! carries the winning color by value.

use serde::{Deserialize, Serialize};

use crate::core::{Color, TokenRef, TrackPosition};

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The current player rolled the die.
    Rolled { color: Color, value: u8 },

    /// A roll had no legal move and the turn will pass.
    NoLegalMove { color: Color, value: u8 },

    /// A token moved.
    Moved {
        token: TokenRef,
        from: TrackPosition,
        to: TrackPosition,
        roll: u8,
    },

    /// A token was sent back to base by an opponent landing on its cell.
    Captured {
        by: TokenRef,
        victim: TokenRef,
        cell: u8,
    },

    /// The same player rolls again after a six.
    BonusTurn { color: Color },

    /// Play moved on to the next color.
    TurnPassed { from: Color, to: Color },

    /// A color finished both tokens. Emitted once per game.
    Won { color: Color },
}

impl GameEvent {
    /// The color that caused this event.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            GameEvent::Rolled { color, .. }
            | GameEvent::NoLegalMove { color, .. }
            | GameEvent::BonusTurn { color }
            | GameEvent::Won { color } => *color,
            GameEvent::Moved { token, .. } => token.color,
            GameEvent::Captured { by, .. } => by.color,
            GameEvent::TurnPassed { from, .. } => *from,
        }
    }

    /// Winning color, if this is the win event.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameEvent::Won { color } => Some(*color),
            _ => None,
        }
    }

    /// Short human-readable description, as written to the turn log.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            GameEvent::Rolled { color, value } => format!("{color} rolled a {value}"),
            GameEvent::NoLegalMove { color, value } => {
                format!("{color} has no move for a {value}")
            }
            GameEvent::Moved { token, to, roll, .. } => {
                format!("{} moved {roll} steps to {to}.", token.color)
            }
            GameEvent::Captured { by, victim, cell } => {
                format!("{} captured {} on cell {cell}!", by.color, victim.color)
            }
            GameEvent::BonusTurn { color } => format!("{color} rolls again"),
            GameEvent::TurnPassed { to, .. } => format!("{to} to play"),
            GameEvent::Won { color } => format!("{color} WINS!"),
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_color() {
        let moved = GameEvent::Moved {
            token: TokenRef::new(Color::Green, 0),
            from: TrackPosition::OnMainTrack(13),
            to: TrackPosition::OnMainTrack(17),
            roll: 4,
        };
        assert_eq!(moved.color(), Color::Green);

        let captured = GameEvent::Captured {
            by: TokenRef::new(Color::Blue, 1),
            victim: TokenRef::new(Color::Red, 0),
            cell: 5,
        };
        assert_eq!(captured.color(), Color::Blue);
    }

    #[test]
    fn test_winner() {
        assert_eq!(GameEvent::Won { color: Color::Yellow }.winner(), Some(Color::Yellow));
        assert_eq!(GameEvent::BonusTurn { color: Color::Yellow }.winner(), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            GameEvent::Rolled { color: Color::Red, value: 6 }.to_string(),
            "RED rolled a 6"
        );
        assert_eq!(
            GameEvent::Captured {
                by: TokenRef::new(Color::Red, 0),
                victim: TokenRef::new(Color::Green, 1),
                cell: 14,
            }
            .to_string(),
            "RED captured GREEN on cell 14!"
        );
        assert_eq!(GameEvent::Won { color: Color::Blue }.to_string(), "BLUE WINS!");
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::Won { color: Color::Green };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
