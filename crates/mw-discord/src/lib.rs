//! mw-discord: Discord surface for match-watch
//!
//! `/treino` スラッシュコマンドでトレーニングセッションを開始・終了し、
//! 設定されたチャンネルに試合結果を通知します。
//! poise 0.6 / Serenity 0.12 を使用します。

pub mod bot;
pub mod commands;
pub mod error;
pub mod notifier;

pub use bot::DiscordBot;
pub use error::{DiscordError, Result};
pub use notifier::DiscordNotifier;
