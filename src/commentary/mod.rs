//! Narrative commentary on play.
//!
//! Commentary is an outside collaborator: it sees a snapshot of the state
//! and a one-line summary of what just happened, and eventually produces a
//! display string. It never touches game state, it may be slow, and it may
//! fail.
//!
//! - [`Commentator`]: the collaborator contract
//! - [`CommentaryFeed`]: holds the string currently on display and drops
//!   late answers to older requests
//! - [`ScriptedCommentator`] and [`SilentCommentator`]: offline stand-ins

mod commentator;
mod feed;

pub use commentator::{Commentator, ScriptedCommentator, SilentCommentator};
pub use feed::{CommentaryFeed, FALLBACK_COMMENTARY};
