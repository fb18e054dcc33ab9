//! The session task: one engine, one ledger, one timer.
//!
//! Commands are handled strictly in arrival order on a single task. The
//! two pacing suspensions are a single optional [`PendingTimer`] polled
//! alongside the command channel; replacing or dropping it cancels it, and
//! it is dropped as soon as the game has a winner.

use std::future::pending;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tracing::{debug, info, warn};

use crate::commentary::{CommentaryFeed, Commentator};
use crate::core::{GameConfig, RollPhase};
use crate::error::ConfigError;
use crate::events::{dispatch, GameEvent, GameObserver};
use crate::rules::{GameEngine, RollResolution};
use crate::wager::WagerLedger;

use super::handle::{Command, SessionHandle, SessionSnapshot, TimerKind};

/// Queued commands before senders wait.
const COMMAND_BUFFER: usize = 64;

/// Events retained for slow subscribers.
const UPDATE_BUFFER: usize = 256;

/// A suspension the host will act on when it elapses.
struct PendingTimer {
    kind: TimerKind,
    sleep: Pin<Box<Sleep>>,
}

impl GameObserver for broadcast::Sender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        // No subscribers is fine.
        let _ = self.send(event.clone());
    }
}

/// Host loop owning the engine, the ledger and the commentary feed.
pub struct GameSession {
    engine: GameEngine,
    ledger: WagerLedger,
    feed: CommentaryFeed,
    commentator: Arc<dyn Commentator>,
    timer: Option<PendingTimer>,
    commands: mpsc::Receiver<Command>,
    updates: broadcast::Sender<GameEvent>,
}

impl GameSession {
    /// Build a session and its handle without starting it.
    pub fn new(
        config: GameConfig,
        commentator: Arc<dyn Commentator>,
    ) -> Result<(Self, SessionHandle), ConfigError> {
        let ledger = WagerLedger::from_config(&config);
        let engine = GameEngine::new(config)?;
        Ok(Self::with_parts(engine, ledger, commentator))
    }

    /// Build a session around an existing engine and ledger.
    pub fn with_parts(
        engine: GameEngine,
        ledger: WagerLedger,
        commentator: Arc<dyn Commentator>,
    ) -> (Self, SessionHandle) {
        let (command_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        let handle = SessionHandle::new(command_tx, updates.clone());

        let session = Self {
            engine,
            ledger,
            feed: CommentaryFeed::new(),
            commentator,
            timer: None,
            commands,
            updates,
        };
        (session, handle)
    }

    /// Build a session and run it on the current tokio runtime.
    pub fn spawn(
        config: GameConfig,
        commentator: Arc<dyn Commentator>,
    ) -> Result<(SessionHandle, JoinHandle<()>), ConfigError> {
        let (session, handle) = Self::new(config, commentator)?;
        let task = tokio::spawn(session.run());
        Ok((handle, task))
    }

    /// Process commands and timers until shut down or every handle is gone.
    pub async fn run(mut self) {
        debug!("game session started");
        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(Command::Shutdown) | None => break,
                        Some(command) => self.handle_command(command),
                    }
                }
                kind = wait_for(&mut self.timer) => {
                    self.timer = None;
                    self.fire(kind);
                }
            }
        }
        debug!("game session stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Roll { value, reply } => {
                let result = match value {
                    Some(value) => self.engine.roll_with(value),
                    None => self.engine.roll(),
                };
                if let Ok(value) = result {
                    let summary = format!("{} rolled a {value}", self.engine.state().current_player);
                    self.flush_events();
                    self.comment(summary);
                    self.arm(TimerKind::ResolveRoll);
                }
                let _ = reply.send(result);
            }
            Command::Move { token, reply } => {
                let result = self.engine.apply_move(token);
                if let Ok(outcome) = &result {
                    self.flush_events();
                    self.comment(outcome.summary());
                    if outcome.winner.is_some() {
                        self.timer = None;
                    }
                }
                let _ = reply.send(result);
            }
            Command::PlaceWager {
                color,
                amount,
                reply,
            } => {
                // No wagers between a win and the next game.
                let result = self
                    .engine
                    .ensure_in_play()
                    .and_then(|()| self.ledger.place_wager(color, amount));
                let _ = reply.send(result);
            }
            Command::NewGame { reply } => {
                self.timer = None;
                self.engine.new_game();
                let _ = reply.send(Ok(()));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown => {}
        }
    }

    fn fire(&mut self, kind: TimerKind) {
        if self.engine.win_event().is_some() {
            debug!(?kind, "timer discarded, game is over");
            return;
        }

        match kind {
            TimerKind::ResolveRoll => match self.engine.resolve_roll() {
                Ok(RollResolution::NoLegalMove) => {
                    self.flush_events();
                    self.arm(TimerKind::AutoPass);
                }
                Ok(RollResolution::AwaitingMove(legal)) => {
                    debug!(legal = legal.len(), "awaiting move");
                    self.flush_events();
                }
                Err(rejection) => warn!(%rejection, "roll resolution rejected"),
            },
            TimerKind::AutoPass => match self.engine.auto_pass() {
                Ok(next) => {
                    debug!(next = %next, "turn passed");
                    self.flush_events();
                }
                Err(rejection) => warn!(%rejection, "auto-pass rejected"),
            },
        }
    }

    /// Start (or replace) the pending timer.
    fn arm(&mut self, kind: TimerKind) {
        let delay = match kind {
            TimerKind::ResolveRoll => self.engine.config().roll_delay(),
            TimerKind::AutoPass => self.engine.config().auto_pass_delay(),
        };
        self.timer = Some(PendingTimer {
            kind,
            sleep: Box::pin(sleep(delay)),
        });
    }

    /// Hand queued engine events to the ledger and to subscribers.
    fn flush_events(&mut self) {
        let events = self.engine.drain_events();
        dispatch(&events, &mut [&mut self.ledger, &mut self.updates]);

        if let Some(winner) = events.iter().find_map(GameEvent::winner) {
            info!(
                winner = %winner,
                balance = self.ledger.balance(),
                settlement = ?self.ledger.last_settlement(),
                "game over"
            );
        }
    }

    fn comment(&self, summary: String) {
        let snapshot = self.engine.state().clone();
        // Detached: the answer lands in the feed whenever it arrives.
        drop(self.feed.request(Arc::clone(&self.commentator), snapshot, summary));
    }

    fn snapshot(&self) -> SessionSnapshot {
        let game = self.engine.state().clone();
        let legal_tokens = if game.phase == RollPhase::AwaitingMove {
            self.engine.legal_tokens().into_vec()
        } else {
            Vec::new()
        };

        SessionSnapshot {
            game,
            wallet: self.ledger.wallet().clone(),
            legal_tokens,
            last_settlement: self.ledger.last_settlement(),
            commentary: self.feed.current(),
            pending_timer: self.timer.as_ref().map(|t| t.kind),
        }
    }
}

/// Resolve when the pending timer elapses; never resolve if there is none.
async fn wait_for(timer: &mut Option<PendingTimer>) -> TimerKind {
    match timer {
        Some(timer) => {
            timer.sleep.as_mut().await;
            timer.kind
        }
        None => pending().await,
    }
}
