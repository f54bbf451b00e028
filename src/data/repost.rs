//! Repost record data repository.
//!
//! Backs the persistent repost detector. Rows are keyed by `(channel_id, artwork_id)` and
//! expire lazily: lookups ignore expired rows and a scheduled purge removes them.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{error::AppError, model::repost::Repost};

/// Repository providing database operations for repost records.
pub struct RepostRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RepostRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the live repost record for an artwork in a channel.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    /// - `artwork_id` - Provider-qualified artwork key
    /// - `now` - Current time; records expiring at or before it are ignored
    ///
    /// # Returns
    /// - `Ok(Some(Repost))` - Artwork was posted in the channel within its window
    /// - `Ok(None)` - No live record
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn find(
        &self,
        channel_id: u64,
        artwork_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Repost>, AppError> {
        let entity = entity::prelude::Repost::find()
            .filter(entity::repost::Column::ChannelId.eq(channel_id.to_string()))
            .filter(entity::repost::Column::ArtworkId.eq(artwork_id))
            .filter(entity::repost::Column::ExpiresAt.gt(now))
            .one(self.db)
            .await?;

        entity.map(Repost::from_entity).transpose()
    }

    /// Creates or replaces the repost record for `(channel_id, artwork_id)`.
    ///
    /// Last write wins, including between concurrent writers; an expired record for the
    /// same key is overwritten in place.
    ///
    /// # Arguments
    /// - `repost` - Record to store
    ///
    /// # Returns
    /// - `Ok(())` - Record stored
    /// - `Err(AppError)` - Database error
    pub async fn upsert(&self, repost: &Repost) -> Result<(), AppError> {
        entity::prelude::Repost::insert(entity::repost::ActiveModel {
            channel_id: ActiveValue::Set(repost.channel_id.to_string()),
            artwork_id: ActiveValue::Set(repost.artwork_id.clone()),
            url: ActiveValue::Set(repost.url.clone()),
            guild_id: ActiveValue::Set(repost.guild_id.to_string()),
            message_id: ActiveValue::Set(repost.message_id.to_string()),
            expires_at: ActiveValue::Set(repost.expires_at),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::repost::Column::ChannelId,
                entity::repost::Column::ArtworkId,
            ])
            .update_columns([
                entity::repost::Column::Url,
                entity::repost::Column::GuildId,
                entity::repost::Column::MessageId,
                entity::repost::Column::ExpiresAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Deletes every record that expired at or before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of purged records
    /// - `Err(AppError)` - Database error
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::Repost::delete_many()
            .filter(entity::repost::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
