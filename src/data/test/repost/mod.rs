use crate::{data::repost::RepostRepository, error::AppError, model::repost::Repost};
use chrono::{Duration, Utc};
use futures::future::join_all;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::builder::TestBuilder;

mod delete_expired;
mod find;
mod upsert;

fn repost(channel_id: u64, artwork_id: &str, expires_in: Duration) -> Repost {
    Repost {
        artwork_id: artwork_id.to_string(),
        url: format!("https://www.pixiv.net/artworks/{}", artwork_id),
        guild_id: 1,
        channel_id,
        message_id: 500,
        expires_at: Utc::now() + expires_in,
    }
}
