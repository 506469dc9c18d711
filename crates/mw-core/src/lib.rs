//! mw-core: match-watch core library
//!
//! 設定、エラー型、試合データの型、そして監視ループと外部サービスの
//! 境界となるトレイト (`MatchSource` / `Notifier`) を提供します。

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{Config, DiscordConfig, MonitorConfig, RiotConfig};
pub use error::{Error, Result};
pub use traits::{MatchSource, Notifier};
pub use types::{MatchNotification, MatchOutcome, MatchSummary, NotificationField, PlayerIdentity};
