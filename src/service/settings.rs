//! Guild and user settings lookup for the artwork pipeline.
//!
//! The pipeline only reads settings, apart from dropping crosspost channels the owner can
//! no longer reach. Guild settings are read on every message, so they go through a
//! `GuildSettingsCache` that is invalidated whenever this service writes them.

use async_trait::async_trait;
use moka::future::Cache;
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        crosspost_group::CrosspostGroupRepository, guild_settings::GuildSettingsRepository,
        user_settings::UserSettingsRepository,
    },
    error::AppError,
    model::settings::{GuildSettings, UserSettings},
};

/// Read access to guild and user settings.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// Settings of a guild, or the defaults when the guild has none stored.
    async fn find_guild(&self, guild_id: u64) -> Result<GuildSettings, AppError>;

    /// Settings of a user, or the defaults when the user has none stored.
    async fn find_user(&self, user_id: u64) -> Result<UserSettings, AppError>;

    /// Removes a channel from a crosspost group.
    async fn remove_crosspost_channel(&self, group_id: i32, channel_id: u64)
        -> Result<(), AppError>;
}

/// Capacity-bounded cache of guild settings keyed by guild ID.
///
/// Entries never expire on their own; writers call `invalidate`.
#[derive(Clone)]
pub struct GuildSettingsCache {
    inner: Cache<u64, GuildSettings>,
}

impl GuildSettingsCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub async fn get(&self, guild_id: u64) -> Option<GuildSettings> {
        self.inner.get(&guild_id).await
    }

    pub async fn insert(&self, settings: GuildSettings) {
        self.inner.insert(settings.guild_id, settings).await;
    }

    pub async fn invalidate(&self, guild_id: u64) {
        self.inner.invalidate(&guild_id).await;
    }
}

/// Settings source backed by the database.
pub struct SettingsService {
    db: DatabaseConnection,
    cache: GuildSettingsCache,
}

impl SettingsService {
    /// Creates a new SettingsService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `cache` - Guild settings cache shared with anything else that writes settings
    pub fn new(db: DatabaseConnection, cache: GuildSettingsCache) -> Self {
        Self { db, cache }
    }

    /// Stores default settings for a guild the bot just joined.
    ///
    /// Existing settings are kept. The cached entry is dropped either way so the next
    /// lookup reads the stored row.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Stored settings for the guild
    /// - `Err(AppError)` - Database error
    pub async fn bootstrap_guild(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        let settings = GuildSettingsRepository::new(&self.db)
            .create_default(guild_id)
            .await?;
        self.cache.invalidate(guild_id).await;

        Ok(settings)
    }
}

#[async_trait]
impl SettingsSource for SettingsService {
    async fn find_guild(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        if let Some(settings) = self.cache.get(guild_id).await {
            return Ok(settings);
        }

        let settings = GuildSettingsRepository::new(&self.db)
            .find_by_guild_id(guild_id)
            .await?
            .unwrap_or_else(|| GuildSettings::default_for(guild_id));
        self.cache.insert(settings.clone()).await;

        Ok(settings)
    }

    async fn find_user(&self, user_id: u64) -> Result<UserSettings, AppError> {
        let settings = UserSettingsRepository::new(&self.db)
            .find_by_user_id(user_id)
            .await?;

        Ok(settings.unwrap_or_else(|| UserSettings::default_for(user_id)))
    }

    async fn remove_crosspost_channel(
        &self,
        group_id: i32,
        channel_id: u64,
    ) -> Result<(), AppError> {
        CrosspostGroupRepository::new(&self.db)
            .remove_channel(group_id, channel_id)
            .await?;

        Ok(())
    }
}
