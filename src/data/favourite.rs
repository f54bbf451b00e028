//! Favourite data repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    error::AppError,
    model::{
        artwork::{ArtworkRecord, ProviderKind},
        favourite::Favourite,
    },
};

/// Repository providing database operations for user favourites.
///
/// A user can favourite each `(provider, artwork_id)` once.
pub struct FavouriteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FavouriteRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        user_id: u64,
        kind: ProviderKind,
        artwork_id: &str,
    ) -> Result<Option<Favourite>, AppError> {
        let entity = entity::prelude::Favourite::find()
            .filter(entity::favourite::Column::UserId.eq(user_id.to_string()))
            .filter(entity::favourite::Column::Provider.eq(kind.as_str()))
            .filter(entity::favourite::Column::ArtworkId.eq(artwork_id))
            .one(self.db)
            .await?;

        entity.map(Favourite::from_entity).transpose()
    }

    /// Stores a favourite unless the user already has the artwork favourited.
    ///
    /// A concurrent insert of the same favourite keeps the first row.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `record` - Storable artwork summary
    ///
    /// # Returns
    /// - `Ok((Favourite, true))` - Favourite created
    /// - `Ok((Favourite, false))` - Favourite already existed and was left unchanged
    /// - `Err(AppError)` - Database error or corrupted row
    pub async fn create(
        &self,
        user_id: u64,
        record: &ArtworkRecord,
    ) -> Result<(Favourite, bool), AppError> {
        let inserted = entity::prelude::Favourite::insert(entity::favourite::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            provider: ActiveValue::Set(record.kind.as_str().to_string()),
            artwork_id: ActiveValue::Set(record.artwork_id.clone()),
            url: ActiveValue::Set(record.url.clone()),
            title: ActiveValue::Set(record.title.clone()),
            author: ActiveValue::Set(record.author.clone()),
            image_url: ActiveValue::Set(record.image_url.clone()),
            nsfw: ActiveValue::Set(record.nsfw),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::favourite::Column::UserId,
                entity::favourite::Column::Provider,
                entity::favourite::Column::ArtworkId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        let favourite = self
            .find(user_id, record.kind, &record.artwork_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Favourite {}:{} for user {} disappeared after insert",
                    record.kind, record.artwork_id, user_id
                ))
            })?;

        Ok((favourite, inserted > 0))
    }

    /// Deletes a favourite.
    ///
    /// # Returns
    /// - `Ok(true)` - Favourite existed and was deleted
    /// - `Ok(false)` - User had not favourited the artwork
    /// - `Err(AppError)` - Database error
    pub async fn delete(
        &self,
        user_id: u64,
        kind: ProviderKind,
        artwork_id: &str,
    ) -> Result<bool, AppError> {
        let result = entity::prelude::Favourite::delete_many()
            .filter(entity::favourite::Column::UserId.eq(user_id.to_string()))
            .filter(entity::favourite::Column::Provider.eq(kind.as_str()))
            .filter(entity::favourite::Column::ArtworkId.eq(artwork_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
