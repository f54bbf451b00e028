//! Delivery of rendered artworks to a channel.

use sea_orm::DatabaseConnection;

use crate::{
    data::posted_artwork::PostedArtworkRepository,
    error::AppError,
    model::{artwork::ArtworkRecord, favourite::PostedArtwork},
    service::{chat::ChatPlatform, post::render::RenderedArtwork},
};

/// Reaction added to artwork messages; users add it too to favourite an artwork.
pub const FAVOURITE_EMOJI: &str = "❤";

/// An artwork and the IDs of the messages it was sent as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentArtwork {
    pub record: ArtworkRecord,
    /// Message IDs in page order, never empty.
    pub message_ids: Vec<u64>,
}

impl SentArtwork {
    /// Message carrying the artwork's first page.
    pub fn first_message_id(&self) -> u64 {
        self.message_ids[0]
    }
}

/// Sends rendered artworks one message at a time, preserving order.
///
/// Stops at the first failed send.
///
/// # Returns
/// - `Ok(Vec<SentArtwork>)` - Artworks that were sent with their message IDs
/// - `Err(AppError)` - A send failed
pub async fn send_rendered(
    chat: &dyn ChatPlatform,
    channel_id: u64,
    rendered: Vec<RenderedArtwork>,
) -> Result<Vec<SentArtwork>, AppError> {
    let mut sent = Vec::with_capacity(rendered.len());

    for artwork in rendered {
        let mut message_ids = Vec::with_capacity(artwork.messages.len());
        for message in artwork.messages {
            message_ids.push(chat.send(channel_id, message).await?);
        }

        if !message_ids.is_empty() {
            sent.push(SentArtwork {
                record: artwork.record,
                message_ids,
            });
        }
    }

    Ok(sent)
}

/// Adds the favourite reaction to each artwork's first message and records it as posted.
///
/// Failures are logged per artwork and do not stop the others.
pub async fn mark_posted(
    chat: &dyn ChatPlatform,
    db: &DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
    sent: &[SentArtwork],
) {
    let repo = PostedArtworkRepository::new(db);

    for artwork in sent {
        let message_id = artwork.first_message_id();

        if let Err(e) = chat.react(channel_id, message_id, FAVOURITE_EMOJI).await {
            tracing::warn!(
                "Failed to react to message {} in channel {}: {}",
                message_id,
                channel_id,
                e
            );
        }

        let posted = PostedArtwork {
            message_id,
            channel_id,
            guild_id,
            record: artwork.record.clone(),
        };
        if let Err(e) = repo.create(&posted).await {
            tracing::warn!("Failed to record posted artwork {}: {}", message_id, e);
        }
    }
}
