//! Crosspost fan-out.
//!
//! Replays resolution and rendering for every channel of a user's crosspost group. Each
//! destination applies its own guild's policy, so the same text can produce different
//! batches per channel. Destinations run concurrently and fail independently: a failure is
//! logged and reported, never surfaced to the user who posted.

use futures::future::join_all;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    error::AppError,
    model::{
        artwork::ArtworkKey,
        repost::CreateRepostParam,
        settings::{CrosspostGroup, RepostMode},
    },
    service::{
        chat::ChatPlatform,
        post::{
            render::{self, CrosspostAuthor, RenderOptions},
            resolve::{FailurePolicy, ResolveMode, ResolveRequest, Resolver},
            send::{mark_posted, send_rendered},
        },
        repost::RepostDetector,
        settings::SettingsSource,
    },
};

/// A message to replay into a crosspost group.
#[derive(Debug, Clone)]
pub struct CrosspostRequest {
    /// Text of the original message.
    pub text: String,
    /// User who posted the original message.
    pub user_id: u64,
    pub author: CrosspostAuthor,
    pub group: CrosspostGroup,
}

/// What happened in one destination channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Artworks sent, with the number of messages.
    Sent(usize),
    /// Nothing left to send after the destination's policy was applied.
    Empty,
    /// The destination guild does not accept crossposts.
    Declined,
    /// The channel is gone or the user left its guild; it was removed from the group.
    Removed,
    Failed,
}

/// Per-destination outcome of a fan-out, in group order.
#[derive(Debug, Default)]
pub struct CrosspostReport {
    pub deliveries: Vec<(u64, Delivery)>,
}

impl CrosspostReport {
    pub fn delivery(&self, channel_id: u64) -> Option<&Delivery> {
        self.deliveries
            .iter()
            .find(|(channel, _)| *channel == channel_id)
            .map(|(_, delivery)| delivery)
    }
}

/// Fans a message out to crosspost destinations.
#[derive(Clone)]
pub struct CrosspostService {
    resolver: Resolver,
    reposts: Arc<dyn RepostDetector>,
    settings: Arc<dyn SettingsSource>,
    chat: Arc<dyn ChatPlatform>,
    db: DatabaseConnection,
    policy: FailurePolicy,
}

impl CrosspostService {
    /// Creates a new CrosspostService.
    ///
    /// # Arguments
    /// - `resolver` - Resolver shared with the original post path
    /// - `reposts` - Repost detector the resolver checks against
    /// - `settings` - Destination guild settings and group maintenance
    /// - `chat` - Chat platform to send through
    /// - `db` - Database connection for posted artwork tracking
    /// - `policy` - Failure policy applied within each destination
    pub fn new(
        resolver: Resolver,
        reposts: Arc<dyn RepostDetector>,
        settings: Arc<dyn SettingsSource>,
        chat: Arc<dyn ChatPlatform>,
        db: DatabaseConnection,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            resolver,
            reposts,
            settings,
            chat,
            db,
            policy,
        }
    }

    /// Crossposts the request's text to every child channel of its group.
    ///
    /// Never fails as a whole; each destination's result is in the report.
    pub async fn fan_out(&self, request: &CrosspostRequest) -> CrosspostReport {
        let deliveries = join_all(request.group.children.iter().map(|&channel_id| async move {
            let delivery = match self.deliver(request, channel_id).await {
                Ok(delivery) => delivery,
                Err(e) => {
                    tracing::warn!(
                        "Crosspost to channel {} of group {} failed: {}",
                        channel_id,
                        request.group.name,
                        e
                    );
                    Delivery::Failed
                }
            };
            (channel_id, delivery)
        }))
        .await;

        CrosspostReport { deliveries }
    }

    async fn deliver(
        &self,
        request: &CrosspostRequest,
        channel_id: u64,
    ) -> Result<Delivery, AppError> {
        let Some(guild_id) = self.chat.channel_guild(channel_id).await? else {
            return self.remove_channel(request, channel_id).await;
        };

        if !self.chat.is_member(guild_id, request.user_id).await? {
            return self.remove_channel(request, channel_id).await;
        }

        let guild = self.settings.find_guild(guild_id).await?;
        if !guild.crosspost {
            tracing::debug!(
                "Guild {} does not accept crossposts to channel {}",
                guild_id,
                channel_id
            );
            return Ok(Delivery::Declined);
        }

        let nsfw_channel = self.chat.is_nsfw_channel(channel_id).await?;

        let resolution = self
            .resolver
            .resolve(ResolveRequest {
                text: &request.text,
                guild: &guild,
                channel_id,
                message_id: 0,
                mode: ResolveMode::Crosspost,
                policy: self.policy,
            })
            .await?;

        let rendered = render::build(
            &resolution.artworks,
            &RenderOptions {
                limit: guild.limit,
                nsfw_channel,
                tags: guild.tags,
                footer: guild.footer,
                crosspost: Some(request.author.clone()),
            },
        );
        if rendered.is_empty() {
            return Ok(Delivery::Empty);
        }

        let sent = send_rendered(self.chat.as_ref(), channel_id, rendered).await?;
        let messages = sent.iter().map(|artwork| artwork.message_ids.len()).sum();

        if guild.repost != RepostMode::Disabled {
            for artwork in &sent {
                let key = ArtworkKey::new(artwork.record.kind, artwork.record.artwork_id.clone());
                self.reposts
                    .create(
                        CreateRepostParam {
                            artwork_id: key.to_string(),
                            url: artwork.record.url.clone(),
                            guild_id,
                            channel_id,
                            message_id: artwork.first_message_id(),
                        },
                        guild.repost_expiration,
                    )
                    .await?;
            }
        }

        if guild.reactions {
            mark_posted(self.chat.as_ref(), &self.db, guild_id, channel_id, &sent).await;
        }

        Ok(Delivery::Sent(messages))
    }

    async fn remove_channel(
        &self,
        request: &CrosspostRequest,
        channel_id: u64,
    ) -> Result<Delivery, AppError> {
        tracing::debug!(
            "Removing unreachable channel {} from group {} of user {}",
            channel_id,
            request.group.name,
            request.user_id
        );
        self.settings
            .remove_crosspost_channel(request.group.id, channel_id)
            .await?;

        Ok(Delivery::Removed)
    }
}
