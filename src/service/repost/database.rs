//! Database-backed repost detector.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::repost::RepostRepository,
    error::AppError,
    model::repost::{CreateRepostParam, Repost},
    service::repost::RepostDetector,
};

/// Repost detector storing records in the `repost` table.
///
/// Lookups skip expired rows; the purge job deletes them.
pub struct DatabaseRepostDetector {
    db: DatabaseConnection,
}

impl DatabaseRepostDetector {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RepostDetector for DatabaseRepostDetector {
    async fn find(&self, channel_id: u64, artwork_id: &str) -> Result<Option<Repost>, AppError> {
        RepostRepository::new(&self.db)
            .find(channel_id, artwork_id, Utc::now())
            .await
    }

    async fn create(&self, param: CreateRepostParam, ttl: TimeDelta) -> Result<(), AppError> {
        let repost = param.into_repost(Utc::now(), ttl);

        RepostRepository::new(&self.db).upsert(&repost).await
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        RepostRepository::new(&self.db)
            .delete_expired(Utc::now())
            .await
    }
}
