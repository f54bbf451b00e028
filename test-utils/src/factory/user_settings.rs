//! User settings factory for creating test user settings rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test user settings with customizable fields.
pub struct UserSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    crosspost: bool,
    dm: bool,
}

impl<'a> UserSettingsFactory<'a> {
    /// Creates a new UserSettingsFactory with crossposting and DMs enabled.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: next_id().to_string(),
            crosspost: true,
            dm: true,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn crosspost(mut self, crosspost: bool) -> Self {
        self.crosspost = crosspost;
        self
    }

    pub fn dm(mut self, dm: bool) -> Self {
        self.dm = dm;
        self
    }

    /// Builds and inserts the user settings entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user_settings::Model)` - Created user settings entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_settings::Model, DbErr> {
        let now = Utc::now();
        entity::user_settings::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            crosspost: ActiveValue::Set(self.crosspost),
            dm: ActiveValue::Set(self.dm),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates user settings with default values.
pub async fn create_user_settings(
    db: &DatabaseConnection,
) -> Result<entity::user_settings::Model, DbErr> {
    UserSettingsFactory::new(db).build().await
}
