//! Posted artwork data repository.
//!
//! Tracks artwork messages the bot sent so reactions on them can be resolved back to
//! the artwork they show.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{error::AppError, model::favourite::PostedArtwork};

pub struct PostedArtworkRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostedArtworkRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an artwork message sent by the bot.
    ///
    /// # Arguments
    /// - `posted` - Message location and the artwork it shows
    ///
    /// # Returns
    /// - `Ok(())` - Record stored
    /// - `Err(AppError)` - Database error, including a duplicate message ID
    pub async fn create(&self, posted: &PostedArtwork) -> Result<(), AppError> {
        entity::posted_artwork::ActiveModel {
            id: ActiveValue::NotSet,
            message_id: ActiveValue::Set(posted.message_id.to_string()),
            channel_id: ActiveValue::Set(posted.channel_id.to_string()),
            guild_id: ActiveValue::Set(posted.guild_id.to_string()),
            provider: ActiveValue::Set(posted.record.kind.as_str().to_string()),
            artwork_id: ActiveValue::Set(posted.record.artwork_id.clone()),
            url: ActiveValue::Set(posted.record.url.clone()),
            title: ActiveValue::Set(posted.record.title.clone()),
            author: ActiveValue::Set(posted.record.author.clone()),
            image_url: ActiveValue::Set(posted.record.image_url.clone()),
            nsfw: ActiveValue::Set(posted.record.nsfw),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Finds the artwork shown by a bot message.
    ///
    /// # Returns
    /// - `Ok(Some(PostedArtwork))` - Message is a tracked artwork post
    /// - `Ok(None)` - Message is unknown
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn find_by_message_id(
        &self,
        message_id: u64,
    ) -> Result<Option<PostedArtwork>, AppError> {
        let entity = entity::prelude::PostedArtwork::find()
            .filter(entity::posted_artwork::Column::MessageId.eq(message_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(PostedArtwork::from_entity).transpose()
    }
}
