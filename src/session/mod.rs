//! Async host for a single table.
//!
//! [`GameSession`] serializes every operation onto one tokio task and owns
//! the pacing timers between a roll and its resolution. [`SessionHandle`]
//! is the cloneable front end used by input and rendering code.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use ludo_bet::commentary::ScriptedCommentator;
//! use ludo_bet::core::{Color, GameConfig};
//! use ludo_bet::session::GameSession;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = GameConfig::new()
//!     .with_seed(7)
//!     .with_delays(Duration::ZERO, Duration::ZERO);
//! let (handle, task) = GameSession::spawn(config, Arc::new(ScriptedCommentator)).unwrap();
//!
//! handle.place_wager(Color::Red, 100).await.unwrap();
//! handle.roll().await.unwrap();
//!
//! let snapshot = handle.snapshot().await.unwrap();
//! assert_eq!(snapshot.wallet.balance, 900);
//!
//! handle.shutdown().await.unwrap();
//! task.await.unwrap();
//! # }
//! ```

mod handle;
mod host;

pub use handle::{SessionHandle, SessionSnapshot, TimerKind};
pub use host::GameSession;
