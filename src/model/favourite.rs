//! Models for posted-message tracking and user favourites.

use chrono::{DateTime, Utc};

use crate::{error::AppError, model::artwork::ArtworkRecord, util::parse::parse_u64_from_string};

/// An artwork message sent by the bot, tracked so reactions can be traced back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedArtwork {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: u64,
    pub record: ArtworkRecord,
}

impl PostedArtwork {
    /// Converts an entity model to a posted artwork at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(PostedArtwork)` - The converted model
    /// - `Err(AppError::InternalErr)` - Corrupted snowflake or provider name
    pub fn from_entity(entity: entity::posted_artwork::Model) -> Result<Self, AppError> {
        Ok(Self {
            message_id: parse_u64_from_string(entity.message_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            record: ArtworkRecord {
                kind: entity.provider.parse()?,
                artwork_id: entity.artwork_id,
                url: entity.url,
                title: entity.title,
                author: entity.author,
                image_url: entity.image_url,
                nsfw: entity.nsfw,
            },
        })
    }
}

/// An artwork a user marked as favourite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favourite {
    pub id: i32,
    pub user_id: u64,
    pub record: ArtworkRecord,
    pub created_at: DateTime<Utc>,
}

impl Favourite {
    pub fn from_entity(entity: entity::favourite::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: parse_u64_from_string(entity.user_id)?,
            record: ArtworkRecord {
                kind: entity.provider.parse()?,
                artwork_id: entity.artwork_id,
                url: entity.url,
                title: entity.title,
                author: entity.author,
                image_url: entity.image_url,
                nsfw: entity.nsfw,
            },
            created_at: entity.created_at,
        })
    }
}
