//! Riot API response types
//!
//! Only the fields the bot reads are modelled; everything else in the
//! payloads is ignored by serde.

use serde::{Deserialize, Serialize};

/// account-v1 `AccountDto`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

/// match-v5 `MatchDto`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Seconds since patch 11.20
    pub game_duration: u64,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// match-v5 `ParticipantDto`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub puuid: String,
    #[serde(default)]
    pub riot_id_game_name: Option<String>,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
}

impl Match {
    /// Find the participant whose Riot ID game name equals `name`, ignoring case
    pub fn participant_named(&self, name: &str) -> Option<&Participant> {
        let wanted = name.to_lowercase();
        self.info.participants.iter().find(|p| {
            p.riot_id_game_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase() == wanted)
        })
    }
}
