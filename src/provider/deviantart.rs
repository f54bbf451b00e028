//! DeviantArt provider using the public oEmbed endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::{
    error::provider::ProviderError,
    model::artwork::{dedup_tags, is_ai_tag, Artwork, ArtworkDetails, ProviderKind},
    provider::{http::get_json, Provider},
};

const OEMBED_URL: &str = "https://backend.deviantart.com/oembed";

/// The numeric deviation id is the trailing number of the slug.
static ART_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(?:[^/]+/)?(?:art/(?:[^/]*-)?|deviation/)(\d+)/?$").unwrap());

pub struct DeviantArtProvider {
    client: reqwest::Client,
}

impl DeviantArtProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Provider for DeviantArtProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DeviantArt
    }

    fn matches(&self, url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        let host = parsed.host_str()?;

        if host != "deviantart.com" && !host.ends_with(".deviantart.com") {
            return None;
        }

        ART_PATH
            .captures(parsed.path())
            .map(|captures| captures[1].to_string())
    }

    async fn find(&self, id: &str) -> Result<Artwork, ProviderError> {
        let canonical = format!("https://www.deviantart.com/deviation/{}", id);

        let response: OEmbed = get_json(
            ProviderKind::DeviantArt,
            id,
            self.client
                .get(OEMBED_URL)
                .query(&[("url", canonical.as_str()), ("format", "json")]),
        )
        .await?;

        response.into_artwork(id, canonical)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OEmbed {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    url: String,
    author_name: String,
    author_url: Option<String>,
    safety: String,
    pubdate: String,
    tags: String,
    community: Option<Community>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Community {
    statistics: Statistics,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Statistics {
    #[serde(rename = "_attributes")]
    attributes: StatisticAttributes,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct StatisticAttributes {
    views: u64,
    favorites: u64,
    comments: u64,
}

impl OEmbed {
    fn into_artwork(self, id: &str, canonical: String) -> Result<Artwork, ProviderError> {
        // Literature and status deviations come back as `rich`/`link` without an image.
        if self.url.is_empty() || self.kind == "rich" || self.kind == "link" {
            return Err(ProviderError::NotFound {
                kind: ProviderKind::DeviantArt,
                id: id.to_string(),
            });
        }

        let tags = dedup_tags(self.tags.split(',').map(str::to_string));
        let ai_generated = tags.iter().any(|tag| is_ai_tag(tag));
        let stats = self
            .community
            .map(|community| community.statistics.attributes)
            .unwrap_or_default();

        Ok(Artwork {
            id: id.to_string(),
            url: canonical,
            author: self.author_name,
            title: Some(self.title).filter(|title| !title.is_empty()),
            images: vec![self.url],
            tags,
            created_at: DateTime::parse_from_rfc3339(&self.pubdate)
                .map(|date| date.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            likes: stats.favorites,
            reposts: 0,
            replies: stats.comments,
            nsfw: self.safety == "adult",
            ai_generated,
            details: ArtworkDetails::DeviantArt {
                author_url: self.author_url,
                views: stats.views,
            },
        })
    }
}
