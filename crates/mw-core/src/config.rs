//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. match-watch.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "match-watch.toml";

/// Discord configuration
#[derive(Clone, Default)]
pub struct DiscordConfig {
    /// Bot token
    pub token: String,

    /// Application (client) id, used when registering slash commands
    pub application_id: Option<u64>,

    /// Guild the `/treino` command is registered in
    pub guild_id: u64,

    /// Channel that receives announcements and match summaries
    pub channel_id: u64,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &redact(&self.token))
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// Riot Games API configuration
#[derive(Clone)]
pub struct RiotConfig {
    /// Static API key sent as `X-Riot-Token`
    pub api_key: String,

    /// Regional routing endpoint
    pub base_url: String,

    /// Riot ID game name of the monitored player
    pub game_name: String,

    /// Riot ID tag line of the monitored player
    pub tag_line: String,
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_riot_base_url(),
            game_name: String::new(),
            tag_line: String::new(),
        }
    }
}

impl fmt::Debug for RiotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("game_name", &self.game_name)
            .field("tag_line", &self.tag_line)
            .finish()
    }
}

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Seconds between two poll cycles
    pub poll_interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Main configuration for match-watch
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub discord: DiscordConfig,
    pub riot: RiotConfig,
    pub monitor: MonitorConfig,
}

fn default_riot_base_url() -> String {
    "https://americas.api.riotgames.com".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

/// 数値 ID をパースする (Discord の snowflake など)
fn parse_id(name: &str, value: &str) -> crate::Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a numeric id, got '{}'", name, value)))
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 設定ファイルから環境変数を展開する
    ///
    /// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
    /// 環境変数が存在しない場合は空文字列になります。
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // '{' を消費

                let mut var_name = String::new();
                while let Some(c) = chars.next_if(|&c| c != '}') {
                    var_name.push(c);
                }
                chars.next(); // '}' を消費

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// 設定ファイル内の `${VAR_NAME}` は環境変数の値に置換され、
    /// その後、環境変数による上書きが適用されます。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let expanded_content = Self::expand_env_vars(&toml_content);
        let mut cfg = Self::from_toml_str(&expanded_content)?;

        // 既存の環境変数で上書き（環境変数が優先）
        cfg.apply_env_overrides()?;

        Ok(cfg)
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// `./match-watch.toml` があればそれを使い、なければ環境変数のみを使います。
    pub fn load() -> crate::Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// TOML 文字列から Config を構築 (環境変数の上書きなし)
    fn from_toml_str(content: &str) -> crate::Result<Self> {
        let toml: TomlConfig = toml::from_str(content)?;

        let discord = toml.discord.unwrap_or_default();
        let riot = toml.riot.unwrap_or_default();
        let monitor = toml.monitor.unwrap_or_default();

        Ok(Config {
            discord: DiscordConfig {
                token: discord.token.unwrap_or_default(),
                application_id: discord.application_id,
                guild_id: discord.guild_id.unwrap_or_default(),
                channel_id: discord.channel_id.unwrap_or_default(),
            },
            riot: RiotConfig {
                api_key: riot.api_key.unwrap_or_default(),
                base_url: riot.base_url.unwrap_or_else(default_riot_base_url),
                game_name: riot.game_name.unwrap_or_default(),
                tag_line: riot.tag_line.unwrap_or_default(),
            },
            monitor: MonitorConfig {
                poll_interval_secs: monitor
                    .poll_interval_secs
                    .unwrap_or_else(default_poll_interval_secs),
            },
        })
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides(&mut self) -> crate::Result<()> {
        // Discord 設定の上書き
        if let Some(token) = env_non_empty("DISCORD_TOKEN") {
            self.discord.token = token;
        }
        if let Some(id) = env_non_empty("CLIENT_ID") {
            self.discord.application_id = Some(parse_id("CLIENT_ID", &id)?);
        }
        if let Some(id) = env_non_empty("GUILD_ID") {
            self.discord.guild_id = parse_id("GUILD_ID", &id)?;
        }
        if let Some(id) = env_non_empty("CHANNEL_ID") {
            self.discord.channel_id = parse_id("CHANNEL_ID", &id)?;
        }

        // Riot 設定の上書き
        if let Some(key) = env_non_empty("RIOT_API_KEY") {
            self.riot.api_key = key;
        }
        if let Some(url) = env_non_empty("RIOT_BASE_URL") {
            self.riot.base_url = url;
        }
        if let Some(name) = env_non_empty("SUMMONER_NAME") {
            self.riot.game_name = name;
        }
        if let Some(tag) = env_non_empty("TAG_LINE") {
            self.riot.tag_line = tag;
        }

        // Monitor 設定の上書き
        if let Some(secs) = env_non_empty("POLL_INTERVAL_SECS") {
            self.monitor.poll_interval_secs = secs.trim().parse().map_err(|_| {
                Error::Config(format!("POLL_INTERVAL_SECS must be a number, got '{}'", secs))
            })?;
        }

        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Config::default();
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    /// Check that everything required to run the bot is present
    pub fn validate(&self) -> crate::Result<()> {
        let mut missing = Vec::new();

        if self.discord.token.trim().is_empty() {
            missing.push("DISCORD_TOKEN");
        }
        if self.discord.guild_id == 0 {
            missing.push("GUILD_ID");
        }
        if self.discord.channel_id == 0 {
            missing.push("CHANNEL_ID");
        }
        if self.riot.api_key.trim().is_empty() {
            missing.push("RIOT_API_KEY");
        }
        if self.riot.game_name.trim().is_empty() {
            missing.push("SUMMONER_NAME");
        }
        if self.riot.tag_line.trim().is_empty() {
            missing.push("TAG_LINE");
        }

        if !missing.is_empty() {
            return Err(Error::Config(format!("missing settings: {}", missing.join(", "))));
        }

        if self.monitor.poll_interval_secs == 0 {
            return Err(Error::Config(
                "poll interval must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

/// TOML ファイル用のトップレベル構造
#[derive(Debug, Deserialize)]
struct TomlConfig {
    /// Discord 設定
    discord: Option<TomlDiscordConfig>,
    /// Riot API 設定
    riot: Option<TomlRiotConfig>,
    /// 監視設定
    monitor: Option<TomlMonitorConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDiscordConfig {
    /// Discord Bot トークン
    token: Option<String>,
    /// アプリケーション ID
    application_id: Option<u64>,
    /// ギルド ID
    guild_id: Option<u64>,
    /// 通知先チャンネル ID
    channel_id: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlRiotConfig {
    /// API キー
    api_key: Option<String>,
    /// ベース URL (リージョン)
    base_url: Option<String>,
    /// Riot ID のゲーム名
    game_name: Option<String>,
    /// Riot ID のタグ
    tag_line: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlMonitorConfig {
    /// ポーリング間隔 (秒)
    poll_interval_secs: Option<u64>,
}
