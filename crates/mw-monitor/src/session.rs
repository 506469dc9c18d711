//! Training session state

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session shared between the coordinator and its poll cycles
pub type SharedSession = Arc<Mutex<Session>>;

/// On/off state of match monitoring plus the novelty cursor
///
/// `last_match_id` only means something while the session is active; it is
/// cleared every time a session begins.
#[derive(Debug, Clone, Default)]
pub struct Session {
    active: bool,
    last_match_id: Option<String>,
    baseline_taken: bool,
    started_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Enter monitoring with an unknown cursor
    pub fn begin(&mut self) {
        self.active = true;
        self.last_match_id = None;
        self.baseline_taken = false;
        self.started_at = Some(Utc::now());
    }

    /// Leave monitoring. Returns whether a session was active.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Adopt the latest match at start time as the point after which matches are new
    pub fn set_baseline(&mut self, latest: Option<String>) {
        self.last_match_id = latest;
        self.baseline_taken = true;
    }

    /// Advance the cursor after a match has been reported
    pub fn record(&mut self, match_id: impl Into<String>) {
        self.last_match_id = Some(match_id.into());
    }

    /// Whether `latest` is a match that has not been reported yet
    pub fn is_new(&self, latest: Option<&str>) -> bool {
        match latest {
            Some(id) => self.last_match_id.as_deref() != Some(id),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_match_id(&self) -> Option<&str> {
        self.last_match_id.as_deref()
    }

    pub fn baseline_taken(&self) -> bool {
        self.baseline_taken
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}
