//! mw-monitor: training session monitor
//!
//! 「トレーニングセッション」の状態と、新しい試合を検出して通知する
//! ポーリングサイクルを管理します。

pub mod coordinator;
pub mod poll;
pub mod session;

#[cfg(test)]
mod testing;

pub use coordinator::{Baseline, SessionCoordinator, StartReport, StopReport};
pub use poll::{CycleOutcome, PollCycle, SkipReason};
pub use session::{Session, SharedSession};
