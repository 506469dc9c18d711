//! Match data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Embed colour used for a victory
pub const WIN_COLOR: u32 = 0x57f287;

/// Embed colour used for a defeat
pub const LOSS_COLOR: u32 = 0xed4245;

/// Riot ID of the monitored player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub game_name: String,
    pub tag_line: String,
}

impl PlayerIdentity {
    pub fn new(game_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }
}

impl std::fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// The monitored player's result in a single finished match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub won: bool,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub duration_secs: u64,
}

impl MatchSummary {
    pub fn outcome(&self) -> MatchOutcome {
        if self.won {
            MatchOutcome::Victory
        } else {
            MatchOutcome::Defeat
        }
    }

    /// KDA formatted as `kills/deaths/assists`
    pub fn kda(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }

    /// Duration in whole minutes, rounded down
    pub fn duration_minutes(&self) -> u64 {
        self.duration_secs / 60
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Victory,
    Defeat,
}

impl MatchOutcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Victory => "✅ Vitória",
            Self::Defeat => "❌ Derrota",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Self::Victory => WIN_COLOR,
            Self::Defeat => LOSS_COLOR,
        }
    }
}

/// A labeled value shown inline in the notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl NotificationField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }
}

/// Platform-neutral rich notification for a detected match
///
/// Notifiers translate this into their own message format (a Discord embed,
/// for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub match_id: String,
    pub title: String,
    pub color: u32,
    pub fields: Vec<NotificationField>,
    pub timestamp: DateTime<Utc>,
}

impl MatchNotification {
    pub fn from_summary(summary: &MatchSummary, timestamp: DateTime<Utc>) -> Self {
        let outcome = summary.outcome();

        Self {
            match_id: summary.match_id.clone(),
            title: format!("🏋️ Treino finalizado: {}", outcome.label()),
            color: outcome.color(),
            fields: vec![
                NotificationField::inline("Campeão", summary.champion_name.clone()),
                NotificationField::inline("KDA", summary.kda()),
                NotificationField::inline(
                    "Tempo de partida",
                    format!("{} min", summary.duration_minutes()),
                ),
            ],
            timestamp,
        }
    }

    /// Look up a field value by its label
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
