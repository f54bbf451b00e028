//! User settings data repository.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    data::crosspost_group::CrosspostGroupRepository,
    error::AppError,
    model::settings::UserSettings,
    util::parse::parse_u64_from_string,
};

/// Repository providing database operations for per-user settings.
pub struct UserSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user's settings including their crosspost groups.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Some(UserSettings))` - User has stored settings
    /// - `Ok(None)` - User never configured the bot
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn find_by_user_id(&self, user_id: u64) -> Result<Option<UserSettings>, AppError> {
        let Some(entity) = entity::prelude::UserSettings::find()
            .filter(entity::user_settings::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let groups = CrosspostGroupRepository::new(self.db)
            .get_by_user_id(user_id)
            .await?;

        Ok(Some(UserSettings {
            user_id: parse_u64_from_string(entity.user_id)?,
            crosspost: entity.crosspost,
            dm: entity.dm,
            groups,
        }))
    }
}
