//! The commentary collaborator contract and offline implementations.

use futures::future::{self, BoxFuture, FutureExt};

use crate::core::GameState;
use crate::error::CommentaryError;

/// Produces a short display line for a transition.
///
/// Implementations backed by a remote service should do their I/O inside
/// the returned future. The host never awaits it before continuing play.
pub trait Commentator: Send + Sync {
    fn commentate(
        &self,
        snapshot: GameState,
        summary: String,
    ) -> BoxFuture<'static, Result<String, CommentaryError>>;
}

/// Stand-in used when no commentary service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCommentator;

impl Commentator for SilentCommentator {
    fn commentate(
        &self,
        _snapshot: GameState,
        _summary: String,
    ) -> BoxFuture<'static, Result<String, CommentaryError>> {
        future::ready(Ok("Commentary unavailable".to_string())).boxed()
    }
}

/// Offline commentator with canned lines keyed on the summary.
///
/// Deterministic, so it is also what tests and the simulator use.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedCommentator;

impl ScriptedCommentator {
    /// Pick a line for `summary` given the state after the transition.
    #[must_use]
    pub fn line_for(snapshot: &GameState, summary: &str) -> String {
        if let Some(winner) = snapshot.winner {
            return format!("{winner} takes the crown! What a finish!");
        }
        if summary.contains("Captured") || summary.contains("captured") {
            return format!("{summary} Sent packing back to base!");
        }
        if summary.contains("rolled a 6") {
            return format!("{summary}! The crowd goes wild!");
        }
        if summary.contains("no move") {
            return format!("{summary}. Tough luck!");
        }
        format!("{summary} What a move!")
    }
}

impl Commentator for ScriptedCommentator {
    fn commentate(
        &self,
        snapshot: GameState,
        summary: String,
    ) -> BoxFuture<'static, Result<String, CommentaryError>> {
        future::ready(Ok(Self::line_for(&snapshot, &summary))).boxed()
    }
}
