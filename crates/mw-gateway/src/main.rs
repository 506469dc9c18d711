//! match-watch: training session match notifier
//!
//! Main entry point. Connects to Discord, registers `/treino` in the
//! configured guild and reports new League of Legends matches of the
//! configured player while a training session is running.
//!
//! Usage:
//!   match-watch                   - Run the bot
//!   match-watch --config <path>   - Run with an explicit TOML config file
//!   match-watch --check           - Validate configuration and exit
//!   match-watch --help            - Show help

use std::sync::Arc;

use mw_core::Config;
use mw_discord::DiscordBot;
use mw_riot::RiotApiClient;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Connect and serve commands
    Run,
    /// Validate configuration only
    Check,
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    mode: RunMode,
    config_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    match args.mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("match-watch {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn")),
        )
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = match &args.config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            Config::from_toml_file(path)
        }
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!(
        "Monitoring {}#{} every {}s",
        config.riot.game_name,
        config.riot.tag_line,
        config.monitor.poll_interval_secs
    );

    if args.mode == RunMode::Check {
        println!("Configuration OK: {:?}", config);
        return Ok(());
    }

    run(config).await
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> anyhow::Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut mode = RunMode::Run;
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliArgs { mode: RunMode::Help, config_path }),
            "--version" | "-v" => return Ok(CliArgs { mode: RunMode::Version, config_path }),
            "--check" => mode = RunMode::Check,
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(path);
            }
            other => anyhow::bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(CliArgs { mode, config_path })
}

/// Print help message
fn print_help() {
    println!("match-watch - League of Legends training session notifier for Discord");
    println!();
    println!("Usage:");
    println!("  match-watch                  Run the bot");
    println!("  match-watch --config <path>  Use an explicit TOML config file");
    println!("  match-watch --check          Validate configuration and exit");
    println!("  match-watch --help           Show this help message");
    println!("  match-watch --version        Show version");
    println!();
    println!("Environment Variables:");
    println!("  DISCORD_TOKEN        Discord bot token (required)");
    println!("  CLIENT_ID            Discord application id");
    println!("  GUILD_ID             Guild where /treino is registered (required)");
    println!("  CHANNEL_ID           Channel for announcements and results (required)");
    println!("  RIOT_API_KEY         Riot Games API key (required)");
    println!("  RIOT_BASE_URL        Regional endpoint (default: https://americas.api.riotgames.com)");
    println!("  SUMMONER_NAME        Riot ID game name of the player (required)");
    println!("  TAG_LINE             Riot ID tag line of the player (required)");
    println!("  POLL_INTERVAL_SECS   Seconds between checks (default: 60)");
}

/// Run the bot until Ctrl+C or a fatal client error
async fn run(config: Config) -> anyhow::Result<()> {
    let riot_client = RiotApiClient::from_config(&config.riot)
        .map_err(|e| anyhow::anyhow!("Failed to create Riot API client: {}", e))?;

    let bot = DiscordBot::new(config, Arc::new(riot_client))
        .map_err(|e| anyhow::anyhow!("Failed to create Discord bot: {}", e))?;
    let coordinator = bot.coordinator();

    let mut bot_task = tokio::spawn(async move { bot.start().await });

    tracing::info!("match-watch initialized, press Ctrl+C to exit");

    tokio::select! {
        result = &mut bot_task => {
            coordinator.shutdown().await;
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(anyhow::anyhow!("Discord bot error: {}", e)),
                Err(e) => Err(anyhow::anyhow!("Discord bot task failed: {}", e)),
            };
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutting down...");
        }
    }

    // In-flight cycles are not awaited beyond cancellation
    coordinator.shutdown().await;
    bot_task.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<CliArgs> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args_default() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.mode, RunMode::Run);
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn test_parse_args_config_and_check() {
        let parsed = args(&["--config", "prod.toml", "--check"]).unwrap();
        assert_eq!(parsed.mode, RunMode::Check);
        assert_eq!(parsed.config_path.as_deref(), Some("prod.toml"));
    }

    #[test]
    fn test_parse_args_help_wins() {
        assert_eq!(args(&["--check", "-h"]).unwrap().mode, RunMode::Help);
        assert_eq!(args(&["--version"]).unwrap().mode, RunMode::Version);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }
}
