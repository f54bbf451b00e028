//! Artwork posting.
//!
//! `PostService` drives one chat message through the whole pipeline: resolve the linked
//! artworks, render them for the channel, send them, then deal with reposts and the
//! author's crosspost group.

pub mod crosspost;
pub mod notice;
pub mod render;
pub mod resolve;
pub mod send;

#[cfg(test)]
pub(crate) mod test_support;

use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};

use crate::{
    error::AppError,
    model::{message::MessagePayload, settings::RepostMode},
    scheduler::cleanup::MessageCleanupScheduler,
    service::{chat::ChatPlatform, settings::SettingsSource},
};

use self::{
    crosspost::{CrosspostReport, CrosspostRequest, CrosspostService},
    render::{CrosspostAuthor, RenderOptions},
    resolve::{FailurePolicy, ResolveMode, ResolveRequest, Resolver},
    send::{mark_posted, send_rendered},
};

/// Default time a repost notice stays in the channel.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(15);

/// A guild message as seen by the posting pipeline.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub content: String,
}

/// What the pipeline did with a message.
#[derive(Debug, Default)]
pub struct PostOutcome {
    /// Number of artwork messages sent to the channel.
    pub sent: usize,
    pub reposts: usize,
    /// Whether the original message was deleted for containing only reposts.
    pub deleted_original: bool,
    pub crosspost: Option<CrosspostReport>,
}

/// Posts artworks linked in guild messages.
pub struct PostService {
    resolver: Resolver,
    crosspost: CrosspostService,
    settings: Arc<dyn SettingsSource>,
    chat: Arc<dyn ChatPlatform>,
    cleanup: MessageCleanupScheduler,
    db: DatabaseConnection,
    notice_ttl: Duration,
}

impl PostService {
    /// Creates a new PostService.
    ///
    /// # Arguments
    /// - `resolver` - Artwork resolver
    /// - `crosspost` - Fan-out service for crosspost groups
    /// - `settings` - Guild and user settings
    /// - `chat` - Chat platform
    /// - `cleanup` - Scheduler deleting repost notices
    /// - `db` - Database connection for posted artwork tracking
    /// - `notice_ttl` - How long repost notices stay up
    pub fn new(
        resolver: Resolver,
        crosspost: CrosspostService,
        settings: Arc<dyn SettingsSource>,
        chat: Arc<dyn ChatPlatform>,
        cleanup: MessageCleanupScheduler,
        db: DatabaseConnection,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            resolver,
            crosspost,
            settings,
            chat,
            cleanup,
            db,
            notice_ttl,
        }
    }

    /// Runs a guild message through the posting pipeline.
    ///
    /// Messages outside the guild's art channels, or without artwork links, are ignored.
    /// When resolution fails the user-facing error text is sent to the channel before the
    /// error is returned.
    ///
    /// # Arguments
    /// - `message` - Message to process
    ///
    /// # Returns
    /// - `Ok(PostOutcome)` - Summary of what was sent, deleted and crossposted
    /// - `Err(AppError)` - Resolution, settings lookup or sending failed
    pub async fn handle(&self, message: &IncomingMessage) -> Result<PostOutcome, AppError> {
        let guild = self.settings.find_guild(message.guild_id).await?;
        if !guild.allows_channel(message.channel_id) {
            return Ok(PostOutcome::default());
        }

        if self.resolver.match_text(&message.content).is_empty() {
            return Ok(PostOutcome::default());
        }

        let resolution = match self
            .resolver
            .resolve(ResolveRequest {
                text: &message.content,
                guild: &guild,
                channel_id: message.channel_id,
                message_id: message.message_id,
                mode: ResolveMode::Original,
                policy: FailurePolicy::FailFast,
            })
            .await
        {
            Ok(resolution) => resolution,
            Err(e) => {
                self.chat
                    .send(message.channel_id, MessagePayload::text(e.user_message()))
                    .await?;
                return Err(e);
            }
        };

        let mut outcome = PostOutcome {
            reposts: resolution.reposts.len(),
            ..Default::default()
        };

        let nsfw_channel = self.chat.is_nsfw_channel(message.channel_id).await?;
        let rendered = render::build(
            &resolution.artworks,
            &RenderOptions {
                limit: guild.limit,
                nsfw_channel,
                tags: guild.tags,
                footer: guild.footer,
                crosspost: None,
            },
        );

        let sent = send_rendered(self.chat.as_ref(), message.channel_id, rendered).await?;
        outcome.sent = sent.iter().map(|artwork| artwork.message_ids.len()).sum();

        if guild.reactions {
            mark_posted(
                self.chat.as_ref(),
                &self.db,
                guild.guild_id,
                message.channel_id,
                &sent,
            )
            .await;
        }

        let strict = guild.repost == RepostMode::Strict;
        if !resolution.reposts.is_empty() {
            let notice = notice::repost_notice(&resolution.reposts, strict);
            let notice_id = self.chat.send(message.channel_id, notice).await?;

            if let Err(e) = self
                .cleanup
                .schedule_delete(message.channel_id, notice_id, self.notice_ttl)
                .await
            {
                tracing::warn!("Failed to schedule repost notice deletion: {}", e);
            }
        }

        if strict && resolution.all_reposts() {
            tracing::debug!(
                "Deleting message {} in channel {} made only of reposts",
                message.message_id,
                message.channel_id
            );
            self.chat
                .delete_message(message.channel_id, message.message_id)
                .await?;
            outcome.deleted_original = true;
            return Ok(outcome);
        }

        outcome.crosspost = self.crosspost_for(message).await?;

        Ok(outcome)
    }

    /// Fans the message out to the author's group parented by its channel, if any.
    async fn crosspost_for(
        &self,
        message: &IncomingMessage,
    ) -> Result<Option<CrosspostReport>, AppError> {
        let user = self.settings.find_user(message.author_id).await?;
        if !user.crosspost {
            return Ok(None);
        }

        let Some(group) = user.group_for_parent(message.channel_id) else {
            return Ok(None);
        };

        let request = CrosspostRequest {
            text: message.content.clone(),
            user_id: message.author_id,
            author: CrosspostAuthor {
                name: message.author_name.clone(),
                avatar_url: message.author_avatar_url.clone(),
            },
            group: group.clone(),
        };

        Ok(Some(self.crosspost.fan_out(&request).await))
    }
}
