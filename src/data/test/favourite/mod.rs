use crate::{
    data::favourite::FavouriteRepository,
    error::AppError,
    model::artwork::{ArtworkRecord, ProviderKind},
};
use futures::future::join_all;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::builder::TestBuilder;

mod create;
mod delete;

fn record(kind: ProviderKind, artwork_id: &str) -> ArtworkRecord {
    ArtworkRecord {
        kind,
        artwork_id: artwork_id.to_string(),
        url: format!("https://example.com/{}", artwork_id),
        title: Some("Title".to_string()),
        author: "author".to_string(),
        image_url: format!("https://example.com/{}.png", artwork_id),
        nsfw: false,
    }
}
