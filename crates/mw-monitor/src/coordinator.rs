//! Session coordinator
//!
//! Owns the session and the single monitor task. Every start/stop goes
//! through here, and the monitor slot is cancelled and joined before it is
//! replaced, so two monitors never run side by side.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use mw_core::{MatchSource, Notifier, PlayerIdentity};

use crate::poll::PollCycle;
use crate::session::{Session, SharedSession};

/// Posted to the channel when a training session starts
pub const START_ANNOUNCEMENT: &str = "🚀 Treino iniciado! O bot vai monitorar novas partidas.";

/// Posted to the channel when a training session ends
pub const STOP_ANNOUNCEMENT: &str = "✅ Treino finalizado!";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// What the cursor was set to when the session started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// Matches after this one are new
    Latest(String),
    /// The player has no match history yet; the first match will be new
    NoHistory,
    /// The lookup failed; the first poll cycle will take the baseline instead
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    /// A session was already running and has been replaced
    pub restarted: bool,
    pub baseline: Baseline,
    /// The start announcement reached the channel
    pub announced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReport {
    /// A session was running before the stop
    pub was_active: bool,
    /// The closing announcement reached the channel
    pub announced: bool,
}

/// Counts itself in `live` for as long as the monitor future exists
struct LiveMonitor(Arc<AtomicUsize>);

impl LiveMonitor {
    fn new(live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self(live)
    }
}

impl Drop for LiveMonitor {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to the running monitor task
struct MonitorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Cancel the monitor and wait for it to exit
    async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("Monitor task ended abnormally: {}", e);
        }
    }
}

/// Coordinates training sessions for one output channel
pub struct SessionCoordinator {
    cycle: PollCycle,
    notifier: Arc<dyn Notifier>,
    session: SharedSession,
    poll_interval: Duration,
    monitor: Mutex<Option<MonitorHandle>>,
    live_monitors: Arc<AtomicUsize>,
}

impl SessionCoordinator {
    pub fn new(
        source: Arc<dyn MatchSource>,
        notifier: Arc<dyn Notifier>,
        player: PlayerIdentity,
        poll_interval: Duration,
    ) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            warn!("Poll interval is zero, falling back to {:?}", DEFAULT_POLL_INTERVAL);
            DEFAULT_POLL_INTERVAL
        } else {
            poll_interval
        };

        let session = Session::shared();
        let cycle = PollCycle::new(source, Arc::clone(&notifier), player, Arc::clone(&session));

        Self {
            cycle,
            notifier,
            session,
            poll_interval,
            monitor: Mutex::new(None),
            live_monitors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start (or restart) a training session
    ///
    /// The previous monitor, if any, is cancelled before the cursor is reset.
    /// Baseline and announcement failures are logged and reported, never
    /// returned as errors, so the caller can always acknowledge the command.
    pub async fn start(&self) -> StartReport {
        let mut monitor = self.monitor.lock().await;

        let restarted = match monitor.take() {
            Some(previous) => {
                info!("Training session restarted, replacing the running monitor");
                previous.stop().await;
                true
            }
            None => false,
        };

        self.session.lock().await.begin();

        let baseline = match self.cycle.take_baseline().await {
            Ok(Some(match_id)) => Baseline::Latest(match_id),
            Ok(None) => Baseline::NoHistory,
            Err(e) => {
                warn!("Could not record baseline match, deferring to first cycle: {}", e);
                Baseline::Deferred
            }
        };

        let announced = self.announce(START_ANNOUNCEMENT).await;

        *monitor = Some(self.spawn_monitor());

        info!(
            player = %self.cycle.player(),
            interval_secs = self.poll_interval.as_secs(),
            ?baseline,
            "Training session started"
        );

        StartReport {
            restarted,
            baseline,
            announced,
        }
    }

    /// Stop the training session
    ///
    /// Stopping while idle is accepted; nothing is cancelled or announced.
    pub async fn stop(&self) -> StopReport {
        let mut monitor = self.monitor.lock().await;

        if let Some(handle) = monitor.take() {
            handle.stop().await;
        }

        let (was_active, started_at) = {
            let mut session = self.session.lock().await;
            let started_at = session.started_at();
            (session.end(), started_at)
        };
        if !was_active {
            info!("Stop requested with no training session running");
            return StopReport {
                was_active,
                announced: false,
            };
        }

        let announced = self.announce(STOP_ANNOUNCEMENT).await;
        match started_at {
            Some(started) => info!(
                minutes = (Utc::now() - started).num_minutes(),
                "Training session finished"
            ),
            None => info!("Training session finished"),
        }

        StopReport {
            was_active,
            announced,
        }
    }

    /// Cancel monitoring on process exit, without announcing anything
    pub async fn shutdown(&self) {
        if let Some(handle) = self.monitor.lock().await.take() {
            handle.stop().await;
        }
        self.session.lock().await.end();
    }

    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_active()
    }

    pub async fn last_match_id(&self) -> Option<String> {
        self.session.lock().await.last_match_id().map(str::to_string)
    }

    /// Number of monitor tasks currently alive
    pub fn live_monitors(&self) -> usize {
        self.live_monitors.load(Ordering::SeqCst)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    async fn announce(&self, text: &str) -> bool {
        match self.notifier.announce(text).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send announcement: {}", e);
                false
            }
        }
    }

    fn spawn_monitor(&self) -> MonitorHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let cycle = self.cycle.clone();
        let period = self.poll_interval;
        let live = LiveMonitor::new(Arc::clone(&self.live_monitors));

        let task = tokio::spawn(async move {
            let _live = live;
            run_monitor(cycle, period, token).await;
        });

        MonitorHandle { cancel, task }
    }
}

/// Fire a poll cycle every `period` until cancelled
///
/// The first cycle runs one period after start. A slow cycle delays the next
/// tick instead of overlapping with it. Cancellation drops an in-flight cycle;
/// the cursor is only written after a send, so nothing is half-recorded.
async fn run_monitor(cycle: PollCycle, period: Duration, cancel: CancellationToken) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            outcome = cycle.run(&cancel) => outcome.log(),
        }
    }

    info!("Match monitor stopped");
}
