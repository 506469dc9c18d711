//! エラー型定義 (mw-discord)

use thiserror::Error;

/// mw-discord のエラー型
#[derive(Error, Debug)]
pub enum DiscordError {
    #[error("Discord token not set")]
    TokenNotSet,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serenity error: {0}")]
    SerenityError(#[from] serenity::Error),
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, DiscordError>;
