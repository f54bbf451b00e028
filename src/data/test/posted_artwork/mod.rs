use crate::{
    data::posted_artwork::PostedArtworkRepository,
    error::AppError,
    model::{
        artwork::{ArtworkRecord, ProviderKind},
        favourite::PostedArtwork,
    },
};
use test_utils::builder::TestBuilder;

mod create;
mod find_by_message_id;

fn posted(message_id: u64) -> PostedArtwork {
    PostedArtwork {
        message_id,
        channel_id: 10,
        guild_id: 1,
        record: ArtworkRecord {
            kind: ProviderKind::Twitter,
            artwork_id: "123".to_string(),
            url: "https://twitter.com/user/status/123".to_string(),
            title: None,
            author: "user".to_string(),
            image_url: "https://pbs.twimg.com/media/a.jpg".to_string(),
            nsfw: false,
        },
    }
}
