//! In-memory fakes for monitor tests

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;

use mw_core::{Error, MatchNotification, MatchSource, MatchSummary, Notifier, PlayerIdentity, Result};

pub fn player() -> PlayerIdentity {
    PlayerIdentity::new("AhriMain", "BR1")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Resolve,
    Latest,
    Detail,
}

/// Scripted match source. Every match it returns is a 5/1/7 Ahri win of 1530s.
#[derive(Default)]
pub struct FakeSource {
    latest: Mutex<Option<String>>,
    fail_at: Mutex<Option<Step>>,
    participant_missing: AtomicBool,
    resolve_calls: AtomicUsize,
    latest_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    hold_detail: AtomicBool,
    detail_entered: Notify,
    detail_release: Notify,
}

impl FakeSource {
    pub fn with_latest(latest: Option<&str>) -> Self {
        let source = Self::default();
        source.set_latest(latest);
        source
    }

    pub fn set_latest(&self, latest: Option<&str>) {
        *self.latest.lock().unwrap() = latest.map(str::to_string);
    }

    pub fn fail_at(&self, step: Option<Step>) {
        *self.fail_at.lock().unwrap() = step;
    }

    pub fn set_participant_missing(&self, missing: bool) {
        self.participant_missing.store(missing, Ordering::SeqCst);
    }

    /// Block `match_detail` until `release_detail` is called
    pub fn hold_detail(&self, hold: bool) {
        self.hold_detail.store(hold, Ordering::SeqCst);
    }

    pub async fn detail_entered(&self) {
        self.detail_entered.notified().await;
    }

    pub fn release_detail(&self) {
        self.detail_release.notify_one();
    }

    pub fn calls(&self, step: Step) -> usize {
        match step {
            Step::Resolve => self.resolve_calls.load(Ordering::SeqCst),
            Step::Latest => self.latest_calls.load(Ordering::SeqCst),
            Step::Detail => self.detail_calls.load(Ordering::SeqCst),
        }
    }

    fn check(&self, step: Step) -> Result<()> {
        if *self.fail_at.lock().unwrap() == Some(step) {
            return Err(Error::Upstream(format!("simulated transport error at {:?}", step)));
        }
        Ok(())
    }
}

#[async_trait]
impl MatchSource for FakeSource {
    async fn resolve_player_id(&self, game_name: &str, _tag_line: &str) -> Result<String> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Step::Resolve)?;
        Ok(format!("puuid-{}", game_name))
    }

    async fn latest_match_id(&self, _player_id: &str) -> Result<Option<String>> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Step::Latest)?;
        Ok(self.latest.lock().unwrap().clone())
    }

    async fn match_detail(&self, match_id: &str, player_name: &str) -> Result<MatchSummary> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_detail.load(Ordering::SeqCst) {
            self.detail_entered.notify_one();
            self.detail_release.notified().await;
        }
        self.check(Step::Detail)?;

        if self.participant_missing.load(Ordering::SeqCst) || !player_name.eq_ignore_ascii_case(&player().game_name) {
            return Err(Error::ParticipantNotFound {
                match_id: match_id.to_string(),
            });
        }

        Ok(MatchSummary {
            match_id: match_id.to_string(),
            won: true,
            champion_name: "Ahri".to_string(),
            kills: 5,
            deaths: 1,
            assists: 7,
            duration_secs: 1530,
        })
    }
}

/// Notifier that keeps everything it was asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    announcements: Mutex<Vec<String>>,
    notifications: Mutex<Vec<MatchNotification>>,
    fail_matches: AtomicBool,
    fail_announcements: AtomicBool,
}

impl RecordingNotifier {
    pub fn announcements(&self) -> Vec<String> {
        self.announcements.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<MatchNotification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn set_fail_matches(&self, fail: bool) {
        self.fail_matches.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_announcements(&self, fail: bool) {
        self.fail_announcements.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn announce(&self, text: &str) -> Result<()> {
        if self.fail_announcements.load(Ordering::SeqCst) {
            return Err(Error::Delivery("Missing Access".to_string()));
        }
        self.announcements.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn notify_match(&self, notification: &MatchNotification) -> Result<()> {
        if self.fail_matches.load(Ordering::SeqCst) {
            return Err(Error::Delivery("Missing Access".to_string()));
        }
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
