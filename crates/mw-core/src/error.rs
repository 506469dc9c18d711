//! エラー型定義 (mw-core)

use thiserror::Error;

/// Error type shared across the match-watch crates
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx response, transport failure or malformed body from the match service
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The match exists but the configured player is not among its participants
    #[error("Player not found in match {match_id}")]
    ParticipantNotFound { match_id: String },

    /// A message could not be delivered to the chat platform
    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Benign errors are expected during normal polling and are not reported as failures
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::ParticipantNotFound { .. })
    }
}

/// Result type alias for mw-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_not_found_is_benign() {
        let err = Error::ParticipantNotFound {
            match_id: "BR1_1".to_string(),
        };
        assert!(err.is_benign());
        assert_eq!(err.to_string(), "Player not found in match BR1_1");
    }

    #[test]
    fn test_upstream_is_not_benign() {
        assert!(!Error::Upstream("503".to_string()).is_benign());
        assert!(!Error::Delivery("missing access".to_string()).is_benign());
    }
}
