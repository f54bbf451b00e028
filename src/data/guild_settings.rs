//! Guild settings data repository.
//!
//! Guild settings are stored as one `guild_settings` row plus any number of `art_channel`
//! rows. The repository always loads both together so callers receive a complete
//! `GuildSettings`.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{error::AppError, model::settings::GuildSettings};

/// Repository providing database operations for guild settings.
pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    /// Creates a new GuildSettingsRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `GuildSettingsRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the settings of a guild together with its art channels.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - Settings found
    /// - `Ok(None)` - Guild has no stored settings
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildSettings>, AppError> {
        let Some(entity) = entity::prelude::GuildSettings::find()
            .filter(entity::guild_settings::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let art_channels = entity::prelude::ArtChannel::find()
            .filter(entity::art_channel::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        Ok(Some(GuildSettings::from_entity(entity, art_channels)?))
    }

    /// Inserts default settings for a guild unless it already has settings.
    ///
    /// Called when the bot joins or reconnects to a guild so later lookups find a row.
    /// Duplicate or concurrent calls keep the first row.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Existing settings, or the freshly inserted defaults
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn create_default(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        let defaults = GuildSettings::default_for(guild_id);
        let now = Utc::now();

        entity::prelude::GuildSettings::insert(entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            prefix: ActiveValue::Set(defaults.prefix),
            pixiv: ActiveValue::Set(defaults.providers.pixiv),
            twitter: ActiveValue::Set(defaults.providers.twitter),
            deviant: ActiveValue::Set(defaults.providers.deviant),
            bluesky: ActiveValue::Set(defaults.providers.bluesky),
            nhentai: ActiveValue::Set(defaults.providers.nhentai),
            repost: ActiveValue::Set(defaults.repost.as_str().to_string()),
            repost_expiration: ActiveValue::Set(defaults.repost_expiration.num_seconds()),
            page_limit: ActiveValue::Set(defaults.limit as i32),
            nsfw: ActiveValue::Set(defaults.nsfw),
            tags: ActiveValue::Set(defaults.tags),
            footer: ActiveValue::Set(defaults.footer),
            crosspost: ActiveValue::Set(defaults.crosspost),
            reactions: ActiveValue::Set(defaults.reactions),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::guild_settings::Column::GuildId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        self.find_by_guild_id(guild_id).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "Settings for guild {} disappeared after insert",
                guild_id
            ))
        })
    }
}
