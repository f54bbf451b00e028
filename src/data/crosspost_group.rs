//! Crosspost group data repository.
//!
//! Groups are stored as a `crosspost_group` row with ordered `crosspost_group_channel`
//! children. Child order is kept through the `position` column.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};

use crate::{
    error::AppError,
    model::settings::CrosspostGroup,
    util::parse::parse_u64_from_string,
};

/// Repository providing database operations for users' crosspost groups.
pub struct CrosspostGroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CrosspostGroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every crosspost group owned by a user with their children in order.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID owning the groups
    ///
    /// # Returns
    /// - `Ok(Vec<CrosspostGroup>)` - Groups ordered by creation
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn get_by_user_id(&self, user_id: u64) -> Result<Vec<CrosspostGroup>, AppError> {
        let groups = entity::prelude::CrosspostGroup::find()
            .filter(entity::crosspost_group::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(entity::crosspost_group::Column::Id)
            .all(self.db)
            .await?;

        let mut result = Vec::with_capacity(groups.len());
        for group in groups {
            let children = group
                .find_related(entity::prelude::CrosspostGroupChannel)
                .order_by_asc(entity::crosspost_group_channel::Column::Position)
                .all(self.db)
                .await?;

            result.push(CrosspostGroup {
                id: group.id,
                name: group.name,
                parent: parse_u64_from_string(group.parent_channel_id)?,
                children: children
                    .into_iter()
                    .map(|child| parse_u64_from_string(child.channel_id))
                    .collect::<Result<Vec<_>, _>>()?,
            });
        }

        Ok(result)
    }

    /// Removes a child channel from a group.
    ///
    /// Used by crosspost fan-out to drop channels the group owner can no longer reach.
    /// Removing a channel that is not in the group is not an error.
    ///
    /// # Arguments
    /// - `group_id` - ID of the crosspost group
    /// - `channel_id` - Discord channel ID to remove
    ///
    /// # Returns
    /// - `Ok(true)` - Channel was removed
    /// - `Ok(false)` - Channel was not a child of the group
    /// - `Err(AppError)` - Database error
    pub async fn remove_channel(&self, group_id: i32, channel_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::CrosspostGroupChannel::delete_many()
            .filter(entity::crosspost_group_channel::Column::GroupId.eq(group_id))
            .filter(entity::crosspost_group_channel::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
