//! Poll cycle
//!
//! One check for a new finished match: resolve the player, look up the latest
//! match id, and report it through the notifier when it is new. Errors never
//! escape a cycle; they are returned as [`CycleOutcome::Failed`] so the monitor
//! can log them and carry on with the next tick.

use chrono::Utc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use mw_core::{Error, MatchNotification, MatchSource, Notifier, PlayerIdentity, Result};

use crate::session::SharedSession;

/// Why a cycle ended without sending a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No training session is running
    Inactive,
    /// Latest match is absent or already reported
    NoNewMatch,
    /// The cursor was unknown; the latest match became the baseline
    BaselineEstablished,
    /// The match does not include the monitored player
    ParticipantNotFound,
    /// The session was stopped or restarted while the cycle was in flight
    Cancelled,
}

/// Classified result of one poll cycle
#[derive(Debug)]
pub enum CycleOutcome {
    Notified { match_id: String },
    Skipped(SkipReason),
    Failed(Error),
}

impl CycleOutcome {
    pub fn is_notified(&self) -> bool {
        matches!(self, Self::Notified { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Emit the log line matching this outcome
    pub fn log(&self) {
        match self {
            Self::Notified { match_id } => info!(%match_id, "Match summary sent"),
            Self::Skipped(SkipReason::NoNewMatch) => info!("No new match detected yet"),
            Self::Skipped(SkipReason::BaselineEstablished) => {
                info!("Baseline match recorded, waiting for the next one")
            }
            Self::Skipped(reason) => debug!(?reason, "Poll cycle skipped"),
            Self::Failed(e) => error!("Match monitoring failed: {}", e),
        }
    }
}

/// A single unit of polling work
#[derive(Clone)]
pub struct PollCycle {
    source: Arc<dyn MatchSource>,
    notifier: Arc<dyn Notifier>,
    player: PlayerIdentity,
    session: SharedSession,
}

impl PollCycle {
    pub fn new(
        source: Arc<dyn MatchSource>,
        notifier: Arc<dyn Notifier>,
        player: PlayerIdentity,
        session: SharedSession,
    ) -> Self {
        Self {
            source,
            notifier,
            player,
            session,
        }
    }

    pub fn player(&self) -> &PlayerIdentity {
        &self.player
    }

    /// Latest match id of the monitored player, resolving the player id first
    async fn fetch_latest(&self) -> Result<Option<String>> {
        let player_id = self
            .source
            .resolve_player_id(&self.player.game_name, &self.player.tag_line)
            .await?;
        self.source.latest_match_id(&player_id).await
    }

    /// Record the player's current latest match as the session baseline
    pub async fn take_baseline(&self) -> Result<Option<String>> {
        let latest = self.fetch_latest().await?;
        self.session.lock().await.set_baseline(latest.clone());
        Ok(latest)
    }

    /// Run one cycle. The token is checked before anything is sent.
    pub async fn run(&self, cancel: &CancellationToken) -> CycleOutcome {
        match self.try_run(cancel).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_benign() => CycleOutcome::Skipped(SkipReason::ParticipantNotFound),
            Err(e) => CycleOutcome::Failed(e),
        }
    }

    async fn try_run(&self, cancel: &CancellationToken) -> Result<CycleOutcome> {
        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Skipped(SkipReason::Cancelled));
        }

        let baseline_taken = {
            let session = self.session.lock().await;
            if !session.is_active() {
                return Ok(CycleOutcome::Skipped(SkipReason::Inactive));
            }
            session.baseline_taken()
        };

        // Re-resolved every cycle
        let latest = self.fetch_latest().await?;

        if !baseline_taken {
            if cancel.is_cancelled() {
                return Ok(CycleOutcome::Skipped(SkipReason::Cancelled));
            }
            self.session.lock().await.set_baseline(latest);
            return Ok(CycleOutcome::Skipped(SkipReason::BaselineEstablished));
        }

        let is_new = self.session.lock().await.is_new(latest.as_deref());
        let match_id = match latest {
            Some(id) if is_new => id,
            _ => return Ok(CycleOutcome::Skipped(SkipReason::NoNewMatch)),
        };

        info!(%match_id, player = %self.player, "New match detected");

        let summary = self
            .source
            .match_detail(&match_id, &self.player.game_name)
            .await?;

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Skipped(SkipReason::Cancelled));
        }

        let notification = MatchNotification::from_summary(&summary, Utc::now());
        self.notifier.notify_match(&notification).await?;

        // Only reached after a successful send; a failed send leaves the cursor
        // behind and the match is reported again on the next cycle.
        let mut session = self.session.lock().await;
        if session.is_active() && !cancel.is_cancelled() {
            session.record(match_id.clone());
        }

        Ok(CycleOutcome::Notified { match_id })
    }
}
