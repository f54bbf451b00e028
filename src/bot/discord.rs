//! Serenity implementation of the chat platform.

use async_trait::async_trait;
use serenity::{
    all::{
        Channel, ChannelId, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage,
        GuildId, MessageId, ReactionType, Timestamp, UserId,
    },
    http::{Http, StatusCode},
};
use std::sync::Arc;

use crate::{
    error::{internal::InternalError, AppError},
    model::message::{EmbedPayload, MessagePayload},
    service::chat::ChatPlatform,
};

/// Chat platform talking to Discord through Serenity's HTTP client.
pub struct SerenityChat {
    http: Arc<Http>,
}

impl SerenityChat {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Fetches a channel, treating missing and inaccessible channels as absent.
    async fn fetch_channel(&self, channel_id: u64) -> Result<Option<Channel>, AppError> {
        match self.http.get_channel(ChannelId::new(channel_id)).await {
            Ok(channel) => Ok(Some(channel)),
            Err(e) if is_status(&e, &[StatusCode::NOT_FOUND, StatusCode::FORBIDDEN]) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ChatPlatform for SerenityChat {
    async fn send(&self, channel_id: u64, message: MessagePayload) -> Result<u64, AppError> {
        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, build_message(message)?)
            .await?;

        Ok(sent.id.get())
    }

    async fn react(&self, channel_id: u64, message_id: u64, emoji: &str) -> Result<(), AppError> {
        self.http
            .create_reaction(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &ReactionType::Unicode(emoji.to_string()),
            )
            .await?;

        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        self.http
            .delete_message(ChannelId::new(channel_id), MessageId::new(message_id), None)
            .await?;

        Ok(())
    }

    async fn channel_guild(&self, channel_id: u64) -> Result<Option<u64>, AppError> {
        Ok(match self.fetch_channel(channel_id).await? {
            Some(Channel::Guild(channel)) => Some(channel.guild_id.get()),
            _ => None,
        })
    }

    async fn is_member(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        match self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_status(&e, &[StatusCode::NOT_FOUND, StatusCode::FORBIDDEN]) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn is_nsfw_channel(&self, channel_id: u64) -> Result<bool, AppError> {
        Ok(match self.fetch_channel(channel_id).await? {
            Some(Channel::Guild(channel)) => channel.nsfw,
            _ => false,
        })
    }

    async fn direct_message(&self, user_id: u64, message: MessagePayload) -> Result<(), AppError> {
        UserId::new(user_id)
            .direct_message(&self.http, build_message(message)?)
            .await?;

        Ok(())
    }
}

fn is_status(error: &serenity::Error, statuses: &[StatusCode]) -> bool {
    match error {
        serenity::Error::Http(e) => e
            .status_code()
            .is_some_and(|status| statuses.contains(&status)),
        _ => false,
    }
}

/// Converts a rendered payload into a Serenity message builder.
///
/// # Returns
/// - `Ok(CreateMessage)` - Message builder
/// - `Err(AppError::InternalErr)` - Embed timestamp out of Discord's range
fn build_message(payload: MessagePayload) -> Result<CreateMessage, AppError> {
    let mut message = CreateMessage::new();

    if let Some(content) = payload.content {
        message = message.content(content);
    }
    if let Some(embed) = payload.embed {
        message = message.embed(build_embed(embed)?);
    }

    Ok(message)
}

fn build_embed(payload: EmbedPayload) -> Result<CreateEmbed, AppError> {
    let mut embed = CreateEmbed::new();

    if let Some(title) = payload.title {
        embed = embed.title(title);
    }
    if let Some(url) = payload.url {
        embed = embed.url(url);
    }
    if let Some(description) = payload.description {
        embed = embed.description(description);
    }
    if let Some(author) = payload.author {
        let mut builder = CreateEmbedAuthor::new(author.name);
        if let Some(url) = author.url {
            builder = builder.url(url);
        }
        if let Some(icon_url) = author.icon_url {
            builder = builder.icon_url(icon_url);
        }
        embed = embed.author(builder);
    }
    for field in payload.fields {
        embed = embed.field(field.name, field.value, field.inline);
    }
    if let Some(image_url) = payload.image_url {
        embed = embed.image(image_url);
    }
    if let Some(footer) = payload.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(color) = payload.color {
        embed = embed.color(color);
    }
    if let Some(time) = payload.timestamp {
        let timestamp = Timestamp::from_unix_timestamp(time.timestamp()).map_err(|e| {
            InternalError::InvalidDiscordTimestamp {
                timestamp: time.timestamp(),
                reason: e.to_string(),
            }
        })?;
        embed = embed.timestamp(timestamp);
    }

    Ok(embed)
}
