//! nhentai provider. Every gallery is NSFW.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::{
    error::provider::ProviderError,
    model::artwork::{dedup_tags, Artwork, ArtworkDetails, ProviderKind},
    provider::{http::get_json, parse_with_host, Provider},
};

const HOSTS: &[&str] = &["nhentai.net", "www.nhentai.net"];
const API_BASE: &str = "https://nhentai.net/api/gallery";
const IMAGE_BASE: &str = "https://i.nhentai.net/galleries";

static GALLERY_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/g/(\d+)").unwrap());

pub struct NhentaiProvider {
    client: reqwest::Client,
}

impl NhentaiProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Provider for NhentaiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Nhentai
    }

    fn matches(&self, url: &str) -> Option<String> {
        let parsed = parse_with_host(url, HOSTS)?;

        GALLERY_PATH
            .captures(parsed.path())
            .map(|captures| captures[1].to_string())
    }

    async fn find(&self, id: &str) -> Result<Artwork, ProviderError> {
        let gallery: Gallery = get_json(
            ProviderKind::Nhentai,
            id,
            self.client.get(format!("{}/{}", API_BASE, id)),
        )
        .await?;

        gallery.into_artwork(id)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Gallery {
    error: Option<String>,
    media_id: String,
    title: GalleryTitle,
    images: GalleryImages,
    tags: Vec<GalleryTag>,
    upload_date: i64,
    num_favorites: u64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GalleryTitle {
    english: Option<String>,
    japanese: Option<String>,
    pretty: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GalleryImages {
    pages: Vec<GalleryPage>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GalleryPage {
    t: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GalleryTag {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

fn extension(t: &str) -> &'static str {
    match t {
        "p" => "png",
        "g" => "gif",
        "w" => "webp",
        _ => "jpg",
    }
}

impl Gallery {
    fn into_artwork(self, id: &str) -> Result<Artwork, ProviderError> {
        if self.error.is_some() || self.media_id.is_empty() || self.images.pages.is_empty() {
            return Err(ProviderError::NotFound {
                kind: ProviderKind::Nhentai,
                id: id.to_string(),
            });
        }

        let images = self
            .images
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                format!("{}/{}/{}.{}", IMAGE_BASE, self.media_id, i + 1, extension(&page.t))
            })
            .collect();

        let artists: Vec<&str> = self
            .tags
            .iter()
            .filter(|tag| tag.kind == "artist")
            .map(|tag| tag.name.as_str())
            .collect();
        let author = if artists.is_empty() {
            "Unknown".to_string()
        } else {
            artists.join(", ")
        };
        let tags = dedup_tags(
            self.tags
                .iter()
                .filter(|tag| tag.kind == "tag")
                .map(|tag| tag.name.clone()),
        );

        Ok(Artwork {
            id: id.to_string(),
            url: format!("https://nhentai.net/g/{}/", id),
            author,
            title: self.title.pretty.or(self.title.english),
            images,
            tags,
            created_at: DateTime::from_timestamp(self.upload_date, 0).unwrap_or_else(Utc::now),
            likes: self.num_favorites,
            reposts: 0,
            replies: 0,
            nsfw: true,
            ai_generated: false,
            details: ArtworkDetails::Nhentai {
                media_id: self.media_id,
                japanese_title: self.title.japanese,
            },
        })
    }
}
