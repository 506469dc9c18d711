//! Riot Games REST API client
//!
//! Talks to a single regional routing endpoint (`americas` by default) with a
//! static `X-Riot-Token` key. No retries; transport defaults apply.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use mw_core::{MatchSource, MatchSummary, RiotConfig};

use crate::error::{Result, RiotError};
use crate::types::{Account, Match};

const TOKEN_HEADER: &str = "X-Riot-Token";

/// Riot Games API client
#[derive(Clone)]
pub struct RiotApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RiotApiClient {
    /// Create a new Riot API client
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| RiotError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RiotError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("match-watch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RiotError::Http)?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from the `[riot]` configuration section
    pub fn from_config(config: &RiotConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.api_key)
    }

    /// Build an endpoint URL, percent-encoding every path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RiotError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url.path());

        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, &self.api_key)
            .send()
            .await
            .map_err(RiotError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Riot API request failed: {} - {}", status, body);
            return Err(RiotError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| RiotError::Parse(e.to_string()))
    }

    /// account-v1: look up an account by Riot ID
    pub async fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<Account> {
        let url = self.endpoint(&[
            "riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line,
        ])?;
        self.get_json(url).await
    }

    /// match-v5: most recent match ids for a player, newest first
    pub async fn match_ids(&self, puuid: &str, count: u32) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"])?;
        url.query_pairs_mut().append_pair("count", &count.to_string());
        self.get_json(url).await
    }

    /// match-v5: full match data
    pub async fn get_match(&self, match_id: &str) -> Result<Match> {
        let url = self.endpoint(&["lol", "match", "v5", "matches", match_id])?;
        self.get_json(url).await
    }
}

#[async_trait]
impl MatchSource for RiotApiClient {
    async fn resolve_player_id(&self, game_name: &str, tag_line: &str) -> mw_core::Result<String> {
        let account = self.account_by_riot_id(game_name, tag_line).await?;
        Ok(account.puuid)
    }

    async fn latest_match_id(&self, player_id: &str) -> mw_core::Result<Option<String>> {
        let ids = self.match_ids(player_id, 1).await?;
        Ok(ids.into_iter().next())
    }

    async fn match_detail(&self, match_id: &str, player_name: &str) -> mw_core::Result<MatchSummary> {
        let game = self.get_match(match_id).await?;

        let participant =
            game.participant_named(player_name)
                .ok_or_else(|| RiotError::ParticipantNotFound {
                    match_id: match_id.to_string(),
                    player: player_name.to_string(),
                })?;

        Ok(MatchSummary {
            match_id: match_id.to_string(),
            won: participant.win,
            champion_name: participant.champion_name.clone(),
            kills: participant.kills,
            deaths: participant.deaths,
            assists: participant.assists,
            duration_secs: game.info.game_duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "RGAPI-test";

    fn match_body() -> serde_json::Value {
        json!({
            "metadata": { "matchId": "BR1_3012345678" },
            "info": {
                "gameDuration": 1530,
                "participants": [
                    {
                        "puuid": "other-puuid",
                        "riotIdGameName": "Someone",
                        "championName": "Garen",
                        "kills": 2, "deaths": 6, "assists": 1,
                        "win": false
                    },
                    {
                        "puuid": "player-puuid",
                        "riotIdGameName": "AhriMain",
                        "championName": "Ahri",
                        "kills": 5, "deaths": 1, "assists": 7,
                        "win": true
                    }
                ]
            }
        })
    }

    async fn client_for(server: &MockServer) -> RiotApiClient {
        RiotApiClient::new(&server.uri(), KEY).unwrap()
    }

    #[test]
    fn test_api_client_creation() {
        assert!(RiotApiClient::new("https://americas.api.riotgames.com", KEY).is_ok());
        assert!(matches!(
            RiotApiClient::new("not a url", KEY),
            Err(RiotError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = RiotApiClient::new("https://americas.api.riotgames.com/", KEY).unwrap();
        let url = client
            .endpoint(&["riot", "account", "v1", "accounts", "by-riot-id", "Hide on bush", "KR#1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://americas.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR%231"
        );
    }

    #[tokio::test]
    async fn test_resolve_player_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/riot/account/v1/accounts/by-riot-id/AhriMain/BR1"))
            .and(header("X-Riot-Token", KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "puuid": "player-puuid",
                "gameName": "AhriMain",
                "tagLine": "BR1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let puuid = client.resolve_player_id("AhriMain", "BR1").await.unwrap();
        assert_eq!(puuid, "player-puuid");
    }

    #[tokio::test]
    async fn test_resolve_player_id_not_found_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": { "message": "Data not found", "status_code": 404 }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.resolve_player_id("Nobody", "BR1").await.unwrap_err();
        assert!(matches!(err, mw_core::Error::Upstream(ref msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.resolve_player_id("AhriMain", "BR1").await.unwrap_err();
        assert!(matches!(err, mw_core::Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_latest_match_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lol/match/v5/matches/by-puuid/player-puuid/ids"))
            .and(query_param("count", "1"))
            .and(header("X-Riot-Token", KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["BR1_3012345678"])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let latest = client.latest_match_id("player-puuid").await.unwrap();
        assert_eq!(latest.as_deref(), Some("BR1_3012345678"));
    }

    #[tokio::test]
    async fn test_latest_match_id_without_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lol/match/v5/matches/by-puuid/fresh-puuid/ids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.latest_match_id("fresh-puuid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_match_detail_extracts_player_case_insensitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lol/match/v5/matches/BR1_3012345678"))
            .and(header("X-Riot-Token", KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(match_body()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let summary = client
            .match_detail("BR1_3012345678", "ahrimain")
            .await
            .unwrap();

        assert_eq!(
            summary,
            MatchSummary {
                match_id: "BR1_3012345678".to_string(),
                won: true,
                champion_name: "Ahri".to_string(),
                kills: 5,
                deaths: 1,
                assists: 7,
                duration_secs: 1530,
            }
        );
    }

    #[tokio::test]
    async fn test_match_detail_participant_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lol/match/v5/matches/BR1_3012345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(match_body()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .match_detail("BR1_3012345678", "Faker")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            mw_core::Error::ParticipantNotFound { ref match_id } if match_id == "BR1_3012345678"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_error() {
        // Reserve a free port, then release it so the connection is refused
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = RiotApiClient::new(&format!("http://{}", addr), KEY).unwrap();

        let err = client.match_ids("player-puuid", 1).await.unwrap_err();
        assert!(matches!(err, RiotError::Http(_)), "unexpected error: {:?}", err);

        let err = client.latest_match_id("player-puuid").await.unwrap_err();
        match err {
            mw_core::Error::Upstream(message) => {
                assert!(message.contains("HTTP request failed"), "{}", message);
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
