//! エラー型定義 (mw-riot)

use thiserror::Error;

/// mw-riot のエラー型
#[derive(Error, Debug)]
pub enum RiotError {
    #[error("Riot API error: {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Player {player} not found in match {match_id}")]
    ParticipantNotFound { match_id: String, player: String },
}

impl From<RiotError> for mw_core::Error {
    fn from(e: RiotError) -> Self {
        match e {
            RiotError::ParticipantNotFound { match_id, .. } => {
                mw_core::Error::ParticipantNotFound { match_id }
            }
            RiotError::InvalidUrl(url) => mw_core::Error::Config(format!("invalid Riot base URL: {}", url)),
            other => mw_core::Error::Upstream(other.to_string()),
        }
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, RiotError>;
