//! Boundaries between the monitor and the outside world
//!
//! The poll cycle only talks to a [`MatchSource`] and a [`Notifier`], so the
//! Riot client and the Discord channel can be swapped for fakes in tests.

use async_trait::async_trait;

use crate::types::{MatchNotification, MatchSummary};
use crate::Result;

/// Read-only access to a match-history service
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Resolve a Riot ID (`game_name#tag_line`) to the stable player id
    async fn resolve_player_id(&self, game_name: &str, tag_line: &str) -> Result<String>;

    /// Most recent match id for the player, `None` when there is no history
    async fn latest_match_id(&self, player_id: &str) -> Result<Option<String>>;

    /// Fetch a match and extract the participant whose name matches `player_name`
    /// (case-insensitive)
    ///
    /// # Errors
    /// `Error::ParticipantNotFound` when nobody in the match carries that name.
    async fn match_detail(&self, match_id: &str, player_name: &str) -> Result<MatchSummary>;
}

/// Destination for session announcements and match notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a plain-text lifecycle announcement
    async fn announce(&self, text: &str) -> Result<()>;

    /// Send the rich notification for a detected match
    async fn notify_match(&self, notification: &MatchNotification) -> Result<()>;
}
