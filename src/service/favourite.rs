//! Favourites added through reactions on posted artworks.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    data::{favourite::FavouriteRepository, posted_artwork::PostedArtworkRepository},
    error::AppError,
    model::{
        artwork::ArtworkRecord,
        favourite::Favourite,
        message::{EmbedAuthor, EmbedPayload, MessagePayload},
    },
    service::{chat::ChatPlatform, settings::SettingsSource},
};

pub struct FavouriteService {
    db: DatabaseConnection,
    settings: Arc<dyn SettingsSource>,
    chat: Arc<dyn ChatPlatform>,
}

impl FavouriteService {
    pub fn new(
        db: DatabaseConnection,
        settings: Arc<dyn SettingsSource>,
        chat: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self { db, settings, chat }
    }

    /// Favourites the artwork shown by a bot message.
    ///
    /// A newly created favourite is also sent to the user by direct message when their
    /// `dm` setting is on. Closed DMs are logged, not returned.
    ///
    /// # Arguments
    /// - `user_id` - User who reacted
    /// - `message_id` - Message that was reacted to
    ///
    /// # Returns
    /// - `Ok(Some(Favourite))` - The user's favourite for the artwork
    /// - `Ok(None)` - Message is not a tracked artwork post
    /// - `Err(AppError)` - Database or settings error
    pub async fn add(&self, user_id: u64, message_id: u64) -> Result<Option<Favourite>, AppError> {
        let Some(posted) = PostedArtworkRepository::new(&self.db)
            .find_by_message_id(message_id)
            .await?
        else {
            return Ok(None);
        };

        let (favourite, created) = FavouriteRepository::new(&self.db)
            .create(user_id, &posted.record)
            .await?;

        if !created {
            return Ok(Some(favourite));
        }
        tracing::debug!(
            "User {} favourited artwork {}",
            user_id,
            posted.record.artwork_id
        );

        let user = self.settings.find_user(user_id).await?;
        if user.dm {
            if let Err(e) = self
                .chat
                .direct_message(user_id, favourite_message(&posted.record))
                .await
            {
                tracing::warn!("Failed to send favourite to user {} by DM: {}", user_id, e);
            }
        }

        Ok(Some(favourite))
    }

    /// Removes the favourite for the artwork shown by a bot message.
    ///
    /// # Returns
    /// - `Ok(true)` - A favourite was removed
    /// - `Ok(false)` - Message is untracked or the artwork was not favourited
    /// - `Err(AppError)` - Database error
    pub async fn remove(&self, user_id: u64, message_id: u64) -> Result<bool, AppError> {
        let Some(posted) = PostedArtworkRepository::new(&self.db)
            .find_by_message_id(message_id)
            .await?
        else {
            return Ok(false);
        };

        FavouriteRepository::new(&self.db)
            .delete(user_id, posted.record.kind, &posted.record.artwork_id)
            .await
    }
}

fn favourite_message(record: &ArtworkRecord) -> MessagePayload {
    MessagePayload {
        content: Some(record.url.clone()),
        embed: Some(EmbedPayload {
            title: Some(
                record
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("{} post", record.kind)),
            ),
            url: Some(record.url.clone()),
            author: Some(EmbedAuthor {
                name: record.author.clone(),
                url: None,
                icon_url: None,
            }),
            image_url: Some(record.image_url.clone()),
            footer: Some(format!("{} • Favourite", record.kind)),
            color: Some(record.kind.color()),
            ..Default::default()
        }),
    }
}
