//! Crosspost group factory for creating test groups and their child channels.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test crosspost groups with customizable fields.
///
/// Child channels are inserted with positions matching their order in `children`.
pub struct CrosspostGroupFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    name: String,
    parent_channel_id: String,
    children: Vec<String>,
}

impl<'a> CrosspostGroupFactory<'a> {
    /// Creates a new CrosspostGroupFactory for the given user.
    ///
    /// Defaults:
    /// - name: `"group_{id}"`
    /// - parent_channel_id: auto-incremented id
    /// - children: none
    pub fn new(db: &'a DatabaseConnection, user_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            user_id: user_id.into(),
            name: format!("group_{}", id),
            parent_channel_id: id.to_string(),
            children: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn parent_channel_id(mut self, parent_channel_id: impl Into<String>) -> Self {
        self.parent_channel_id = parent_channel_id.into();
        self
    }

    pub fn children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }

    /// Builds and inserts the group entity and its child channels.
    ///
    /// # Returns
    /// - `Ok(entity::crosspost_group::Model)` - Created group entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::crosspost_group::Model, DbErr> {
        let group = entity::crosspost_group::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            name: ActiveValue::Set(self.name),
            parent_channel_id: ActiveValue::Set(self.parent_channel_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        for (position, channel_id) in self.children.into_iter().enumerate() {
            entity::crosspost_group_channel::ActiveModel {
                id: ActiveValue::NotSet,
                group_id: ActiveValue::Set(group.id),
                channel_id: ActiveValue::Set(channel_id),
                position: ActiveValue::Set(position as i32),
            }
            .insert(self.db)
            .await?;
        }

        Ok(group)
    }
}

/// Creates a crosspost group with default values for the given user.
pub async fn create_group(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
) -> Result<entity::crosspost_group::Model, DbErr> {
    CrosspostGroupFactory::new(db, user_id).build().await
}
