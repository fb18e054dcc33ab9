//! Front end to a running [`GameSession`](super::GameSession).
//!
//! Every call is a message to the session task; the task processes them one
//! at a time, so callers never race on game or wallet state.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::core::{Color, GameState, TokenRef};
use crate::error::{Rejection, SessionError};
use crate::events::GameEvent;
use crate::rules::MoveOutcome;
use crate::wager::{Settlement, Wager, WalletState};

/// Which suspension the host is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Pause between a roll and its resolution.
    ResolveRoll,
    /// Pause before passing a turn that has no legal move.
    AutoPass,
}

/// Read-only view for renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub game: GameState,
    pub wallet: WalletState,
    /// Tokens the current player may move, when awaiting a move.
    pub legal_tokens: Vec<TokenRef>,
    pub last_settlement: Option<Settlement>,
    pub commentary: Option<String>,
    pub pending_timer: Option<TimerKind>,
}

pub(super) type Reply<T> = oneshot::Sender<Result<T, Rejection>>;

pub(super) enum Command {
    Roll {
        value: Option<u8>,
        reply: Reply<u8>,
    },
    Move {
        token: TokenRef,
        reply: Reply<MoveOutcome>,
    },
    PlaceWager {
        color: Color,
        amount: u64,
        reply: Reply<Wager>,
    },
    NewGame {
        reply: Reply<()>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// Cloneable handle to a session task.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    updates: broadcast::Sender<GameEvent>,
}

impl SessionHandle {
    pub(super) fn new(commands: mpsc::Sender<Command>, updates: broadcast::Sender<GameEvent>) -> Self {
        Self { commands, updates }
    }

    /// Roll the die for the current player.
    pub async fn roll(&self) -> Result<u8, SessionError> {
        self.request(|reply| Command::Roll { value: None, reply }).await
    }

    /// Roll with a value from an outside die.
    pub async fn roll_with(&self, value: u8) -> Result<u8, SessionError> {
        self.request(|reply| Command::Roll {
            value: Some(value),
            reply,
        })
        .await
    }

    /// Ask to move a token. Filtered through the engine's legality rules.
    pub async fn move_token(&self, token: TokenRef) -> Result<MoveOutcome, SessionError> {
        self.request(|reply| Command::Move { token, reply }).await
    }

    /// Place the side wager. Rejected once the game has a winner.
    pub async fn place_wager(&self, color: Color, amount: u64) -> Result<Wager, SessionError> {
        self.request(|reply| Command::PlaceWager {
            color,
            amount,
            reply,
        })
        .await
    }

    /// Clear the board for the next game. The wallet carries over.
    pub async fn new_game(&self) -> Result<(), SessionError> {
        self.request(|reply| Command::NewGame { reply }).await
    }

    /// Current state of the table.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Receive every event the session dispatches from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.updates.subscribe()
    }

    /// Stop the session task.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        let result = response.await.map_err(|_| SessionError::Closed)?;
        Ok(result?)
    }
}
