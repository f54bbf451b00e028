//! Repost record model.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Record that an artwork was already posted in a channel.
///
/// Advisory only: it powers the "already posted" notice and strict-mode suppression, so
/// concurrent writers simply overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repost {
    /// Provider-qualified artwork key (`pixiv:123`).
    pub artwork_id: String,
    /// URL the artwork was first posted with.
    pub url: String,
    pub guild_id: u64,
    pub channel_id: u64,
    /// Message the artwork was first posted in.
    pub message_id: u64,
    pub expires_at: DateTime<Utc>,
}

impl Repost {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Jump link to the message the artwork was first posted in.
    pub fn message_link(&self) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id, self.channel_id, self.message_id
        )
    }

    /// Converts an entity model to a repost domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Repost)` - The converted repost
    /// - `Err(AppError::InternalErr)` - A stored snowflake failed to parse
    pub fn from_entity(entity: entity::repost::Model) -> Result<Self, AppError> {
        Ok(Self {
            artwork_id: entity.artwork_id,
            url: entity.url,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            message_id: parse_u64_from_string(entity.message_id)?,
            expires_at: entity.expires_at,
        })
    }
}

/// Parameters for recording that an artwork was posted in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepostParam {
    /// Provider-qualified artwork key.
    pub artwork_id: String,
    pub url: String,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
}

impl CreateRepostParam {
    /// Builds the record living for `ttl` from `now`.
    pub fn into_repost(self, now: DateTime<Utc>, ttl: TimeDelta) -> Repost {
        Repost {
            artwork_id: self.artwork_id,
            url: self.url,
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            expires_at: now + ttl,
        }
    }
}
