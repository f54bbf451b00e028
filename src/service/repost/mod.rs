//! Repost detection.
//!
//! A repost detector remembers which artworks were posted in which channel for a
//! guild-configured window. Two backends share the `RepostDetector` contract: an
//! in-process map that is lost on restart and a database-backed store that survives it.

pub mod database;
pub mod memory;

use async_trait::async_trait;
use chrono::TimeDelta;
use std::str::FromStr;

use crate::{
    error::{config::ConfigError, AppError},
    model::repost::{CreateRepostParam, Repost},
};

/// Store of recently posted artworks per channel.
///
/// Implementations must be safe to call concurrently and must never return an expired
/// record.
#[async_trait]
pub trait RepostDetector: Send + Sync {
    /// Finds the live record for an artwork in a channel.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    /// - `artwork_id` - Provider-qualified artwork key
    async fn find(&self, channel_id: u64, artwork_id: &str) -> Result<Option<Repost>, AppError>;

    /// Records an artwork as posted for `ttl`, replacing any existing record for the key.
    async fn create(&self, param: CreateRepostParam, ttl: TimeDelta) -> Result<(), AppError>;

    /// Drops every expired record.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records removed
    async fn purge_expired(&self) -> Result<u64, AppError>;
}

/// Which repost detector backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepostBackend {
    Memory,
    Database,
}

impl FromStr for RepostBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "database" => Ok(Self::Database),
            other => Err(ConfigError::InvalidEnvVar {
                name: "REPOST_BACKEND".to_string(),
                value: other.to_string(),
            }),
        }
    }
}
