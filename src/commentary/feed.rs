//! The commentary line on display.
//!
//! Each request gets a ticket. Answers are published only if their ticket is
//! newer than the one already shown, so a slow answer about an old roll
//! cannot overwrite commentary on a later move.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::warn;

use crate::core::GameState;

use super::commentator::Commentator;

/// Shown when the collaborator fails.
pub const FALLBACK_COMMENTARY: &str = "Technical difficulties in the commentary booth!";

#[derive(Debug, Default)]
struct FeedState {
    issued: u64,
    shown: u64,
    text: Option<String>,
}

/// Shared handle to the current commentary line.
#[derive(Clone, Debug, Default)]
pub struct CommentaryFeed {
    inner: Arc<Mutex<FeedState>>,
}

impl CommentaryFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The line on display. `None` means no commentary yet.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .text
            .clone()
    }

    /// Ask `commentator` about a transition without waiting for the answer.
    ///
    /// Must be called from within a tokio runtime. Failures are logged and
    /// replaced with [`FALLBACK_COMMENTARY`].
    pub fn request(
        &self,
        commentator: Arc<dyn Commentator>,
        snapshot: GameState,
        summary: String,
    ) -> JoinHandle<()> {
        let ticket = self.issue_ticket();
        let feed = self.clone();
        let pending = commentator.commentate(snapshot, summary);

        tokio::spawn(async move {
            let text = match pending.await {
                Ok(text) => text,
                Err(err) => {
                    warn!(?err, ticket, "commentary request failed");
                    FALLBACK_COMMENTARY.to_string()
                }
            };
            feed.publish(ticket, text);
        })
    }

    fn issue_ticket(&self) -> u64 {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        state.issued += 1;
        state.issued
    }

    /// Show `text` if `ticket` is newer than what is on display.
    fn publish(&self, ticket: u64, text: String) -> bool {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket <= state.shown {
            return false;
        }
        state.shown = ticket;
        state.text = Some(text);
        true
    }
}
