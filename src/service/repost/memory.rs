//! In-process repost detector.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use dashmap::DashMap;

use crate::{
    error::AppError,
    model::repost::{CreateRepostParam, Repost},
    service::repost::RepostDetector,
};

/// Repost detector keeping records in a concurrent map.
///
/// Expired records are removed when looked up and by `purge_expired`.
#[derive(Default)]
pub struct MemoryRepostDetector {
    records: DashMap<(u64, String), Repost>,
}

impl MemoryRepostDetector {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl RepostDetector for MemoryRepostDetector {
    async fn find(&self, channel_id: u64, artwork_id: &str) -> Result<Option<Repost>, AppError> {
        let key = (channel_id, artwork_id.to_string());
        let now = Utc::now();

        // remove_if takes the shard lock, so a concurrent create for the key is not lost
        if self
            .records
            .remove_if(&key, |_, repost| repost.is_expired(now))
            .is_some()
        {
            return Ok(None);
        }

        Ok(self.records.get(&key).map(|entry| entry.value().clone()))
    }

    async fn create(&self, param: CreateRepostParam, ttl: TimeDelta) -> Result<(), AppError> {
        let key = (param.channel_id, param.artwork_id.clone());
        self.records.insert(key, param.into_repost(Utc::now(), ttl));

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        let now = Utc::now();
        let before = self.records.len();
        self.records.retain(|_, repost| !repost.is_expired(now));

        Ok(before.saturating_sub(self.records.len()) as u64)
    }
}
