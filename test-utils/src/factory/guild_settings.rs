//! Guild settings factory for creating test guild settings rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guild settings with customizable fields.
///
/// Defaults mirror a freshly joined guild: every provider enabled, reposts flagged,
/// a 24 hour repost window, a 50 page limit and NSFW allowed.
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    repost: String,
    repost_expiration: i64,
    page_limit: i32,
    nsfw: bool,
    twitter: bool,
    art_channels: Vec<String>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new GuildSettingsFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `GuildSettingsFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            repost: "enabled".to_string(),
            repost_expiration: 86_400,
            page_limit: 50,
            nsfw: true,
            twitter: true,
            art_channels: Vec::new(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the repost mode (`disabled`, `enabled` or `strict`).
    pub fn repost(mut self, repost: impl Into<String>) -> Self {
        self.repost = repost.into();
        self
    }

    pub fn page_limit(mut self, page_limit: i32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }

    pub fn twitter(mut self, twitter: bool) -> Self {
        self.twitter = twitter;
        self
    }

    /// Adds an art channel row for the guild.
    pub fn art_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.art_channels.push(channel_id.into());
        self
    }

    /// Builds and inserts the guild settings and its art channels.
    ///
    /// # Returns
    /// - `Ok(entity::guild_settings::Model)` - Created guild settings entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        let now = Utc::now();
        let settings = entity::guild_settings::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id.clone()),
            prefix: ActiveValue::Set("bt!".to_string()),
            pixiv: ActiveValue::Set(true),
            twitter: ActiveValue::Set(self.twitter),
            deviant: ActiveValue::Set(true),
            bluesky: ActiveValue::Set(true),
            nhentai: ActiveValue::Set(true),
            repost: ActiveValue::Set(self.repost),
            repost_expiration: ActiveValue::Set(self.repost_expiration),
            page_limit: ActiveValue::Set(self.page_limit),
            nsfw: ActiveValue::Set(self.nsfw),
            tags: ActiveValue::Set(true),
            footer: ActiveValue::Set(true),
            crosspost: ActiveValue::Set(true),
            reactions: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        for channel_id in self.art_channels {
            entity::art_channel::ActiveModel {
                id: ActiveValue::NotSet,
                guild_id: ActiveValue::Set(self.guild_id.clone()),
                channel_id: ActiveValue::Set(channel_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(settings)
    }
}

/// Creates guild settings with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::guild_settings::Model)` - Created guild settings entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_guild_settings(
    db: &DatabaseConnection,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db).build().await
}
