//! Discord channel notifier

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::debug;

use mw_core::{MatchNotification, Notifier};

/// Posts announcements and match summaries to a fixed channel
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
    channel_id: serenity::ChannelId,
}

impl DiscordNotifier {
    pub fn new(http: Arc<serenity::Http>, channel_id: serenity::ChannelId) -> Self {
        Self { http, channel_id }
    }
}

/// Build the embed for a match notification
pub fn build_embed(notification: &MatchNotification) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&notification.title)
        .colour(notification.color);

    for field in &notification.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }

    match serenity::Timestamp::from_unix_timestamp(notification.timestamp.timestamp()) {
        Ok(ts) => embed.timestamp(ts),
        Err(_) => embed.timestamp(serenity::Timestamp::now()),
    }
}

fn delivery_error(e: ::serenity::Error) -> mw_core::Error {
    mw_core::Error::Delivery(e.to_string())
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn announce(&self, text: &str) -> mw_core::Result<()> {
        debug!("Announcing in channel {}: {}", self.channel_id, text);
        self.channel_id
            .say(&self.http, text)
            .await
            .map_err(delivery_error)?;
        Ok(())
    }

    async fn notify_match(&self, notification: &MatchNotification) -> mw_core::Result<()> {
        let message = serenity::CreateMessage::new().embed(build_embed(notification));
        self.channel_id
            .send_message(&self.http, message)
            .await
            .map_err(delivery_error)?;
        Ok(())
    }
}
