//! Discord Bot implementation using poise

use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};

use mw_core::{Config, MatchSource, PlayerIdentity};
use mw_monitor::SessionCoordinator;

use crate::commands::{self, Data};
use crate::error::{DiscordError, Result};
use crate::notifier::DiscordNotifier;

/// Discord Bot for match-watch
pub struct DiscordBot {
    config: Config,
    coordinator: Arc<SessionCoordinator>,
}

impl DiscordBot {
    /// Create a new Discord Bot instance
    ///
    /// The notifier gets its own REST client so the coordinator exists before
    /// the gateway connects and can be shut down from outside the client.
    pub fn new(config: Config, source: Arc<dyn MatchSource>) -> Result<Self> {
        if config.discord.token.trim().is_empty() {
            return Err(DiscordError::TokenNotSet);
        }
        if config.discord.channel_id == 0 {
            return Err(DiscordError::Config("CHANNEL_ID not set".to_string()));
        }

        let http = Arc::new(serenity::Http::new(&config.discord.token));
        if let Some(id) = config.discord.application_id.filter(|id| *id != 0) {
            http.set_application_id(serenity::ApplicationId::new(id));
        }

        let notifier = Arc::new(DiscordNotifier::new(
            http,
            serenity::ChannelId::new(config.discord.channel_id),
        ));

        let coordinator = Arc::new(SessionCoordinator::new(
            source,
            notifier,
            PlayerIdentity::new(&config.riot.game_name, &config.riot.tag_line),
            config.monitor.poll_interval(),
        ));

        Ok(Self {
            config,
            coordinator,
        })
    }

    /// Get the session coordinator
    pub fn coordinator(&self) -> Arc<SessionCoordinator> {
        self.coordinator.clone()
    }

    /// Start the Discord bot
    pub async fn start(&self) -> Result<()> {
        if self.config.discord.guild_id == 0 {
            return Err(DiscordError::Config("GUILD_ID not set".to_string()));
        }
        let guild_id = serenity::GuildId::new(self.config.discord.guild_id);

        // Slash commands only need guild metadata; messages are sent, never read
        let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

        let coordinator = self.coordinator.clone();

        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: commands::get_commands(),
                on_error: |error| Box::pin(on_error(error)),
                ..Default::default()
            })
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Bot online as {}", ready.user.name);

                    match poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id).await {
                        Ok(()) => info!("Commands registered in guild {}", guild_id),
                        Err(e) => error!("Failed to register commands: {}", e),
                    }

                    Ok(Data { coordinator })
                })
            })
            .build();

        info!("Starting Discord bot...");

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, intents)
            .framework(framework)
            .await?;

        client.start().await?;

        Ok(())
    }
}

/// Log every framework error; command errors include failed replies
async fn on_error(error: poise::FrameworkError<'_, Data, DiscordError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to set up bot: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `/{}`: {}", ctx.command().name, error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
