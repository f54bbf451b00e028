//! Pixiv provider backed by the public `ajax` endpoints of the website.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize};
use std::{sync::LazyLock, time::Duration};

use crate::{
    error::provider::ProviderError,
    model::artwork::{dedup_tags, is_ai_tag, Artwork, ArtworkDetails, ProviderKind},
    provider::{cache::ArtworkCache, http::get_json, parse_with_host, Provider},
};

const HOSTS: &[&str] = &[
    "pixiv.net",
    "www.pixiv.net",
    "touch.pixiv.net",
    "phixiv.net",
    "www.phixiv.net",
    "ppxiv.net",
    "www.ppxiv.net",
];
const API_BASE: &str = "https://www.pixiv.net/ajax/illust";
const IMAGE_HOST: &str = "i.pximg.net";

static ARTWORK_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(?:[a-z]{2}/)?(?:artworks|i)/(\d+)").unwrap());

pub struct PixivProvider {
    client: reqwest::Client,
    proxy_host: String,
    cache: ArtworkCache,
}

impl PixivProvider {
    pub fn new(client: reqwest::Client, proxy_host: String, cache_ttl: Duration) -> Self {
        Self {
            client,
            proxy_host,
            cache: ArtworkCache::new(cache_ttl),
        }
    }

    async fn fetch(&self, id: &str) -> Result<Artwork, ProviderError> {
        let illust: PixivResponse = get_json(
            ProviderKind::Pixiv,
            id,
            self.client
                .get(format!("{}/{}", API_BASE, id))
                .header(reqwest::header::REFERER, "https://www.pixiv.net/"),
        )
        .await?;
        let illust: Illust = illust.into_body(id)?;

        let pages = if illust.page_count > 1 {
            let pages: PixivResponse = get_json(
                ProviderKind::Pixiv,
                id,
                self.client
                    .get(format!("{}/{}/pages", API_BASE, id))
                    .header(reqwest::header::REFERER, "https://www.pixiv.net/"),
            )
            .await?;
            pages.into_body(id)?
        } else {
            Vec::new()
        };

        illust.into_artwork(id, pages, &self.proxy_host)
    }
}

#[async_trait]
impl Provider for PixivProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Pixiv
    }

    fn matches(&self, url: &str) -> Option<String> {
        let parsed = parse_with_host(url, HOSTS)?;

        if let Some(captures) = ARTWORK_PATH.captures(parsed.path()) {
            return Some(captures[1].to_string());
        }

        if parsed.path().ends_with("member_illust.php") {
            return parsed
                .query_pairs()
                .find(|(key, _)| key == "illust_id")
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()));
        }

        None
    }

    async fn find(&self, id: &str) -> Result<Artwork, ProviderError> {
        self.cache.get_or_fetch(id, self.fetch(id)).await
    }
}

/// Envelope of every ajax response. `body` is `[]` when `error` is set, so it is decoded
/// only after the error flag has been checked.
#[derive(Deserialize)]
struct PixivResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    body: serde_json::Value,
}

impl PixivResponse {
    fn into_body<T: DeserializeOwned>(self, id: &str) -> Result<T, ProviderError> {
        if self.error || self.body.is_null() {
            tracing::debug!("Pixiv reported an error for {}: {}", id, self.message);
            return Err(ProviderError::NotFound {
                kind: ProviderKind::Pixiv,
                id: id.to_string(),
            });
        }

        serde_json::from_value(self.body).map_err(|e| ProviderError::Transient {
            kind: ProviderKind::Pixiv,
            reason: format!("failed to parse response: {}", e),
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Illust {
    illust_title: String,
    user_id: String,
    user_name: String,
    create_date: String,
    page_count: usize,
    like_count: u64,
    bookmark_count: u64,
    view_count: u64,
    comment_count: u64,
    x_restrict: u8,
    ai_type: u8,
    tags: TagList,
    urls: Urls,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TagList {
    tags: Vec<Tag>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Tag {
    tag: String,
    translation: Option<Translation>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Translation {
    en: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Urls {
    original: Option<String>,
    regular: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Page {
    urls: Urls,
}

impl Urls {
    fn best(self) -> Option<String> {
        self.original.or(self.regular)
    }
}

impl Illust {
    fn into_artwork(
        self,
        id: &str,
        pages: Vec<Page>,
        proxy_host: &str,
    ) -> Result<Artwork, ProviderError> {
        let images: Vec<String> = if pages.is_empty() {
            self.urls.best().into_iter().collect()
        } else {
            pages.into_iter().filter_map(|page| page.urls.best()).collect()
        };
        let images: Vec<String> = images
            .into_iter()
            .map(|image| image.replacen(IMAGE_HOST, proxy_host, 1))
            .collect();

        if images.is_empty() {
            return Err(ProviderError::NotFound {
                kind: ProviderKind::Pixiv,
                id: id.to_string(),
            });
        }

        let tags = dedup_tags(self.tags.tags.into_iter().map(|tag| {
            tag.translation
                .and_then(|t| t.en)
                .filter(|en| !en.is_empty())
                .unwrap_or(tag.tag)
        }));
        let ai_generated = self.ai_type == 2 || tags.iter().any(|tag| is_ai_tag(tag));

        Ok(Artwork {
            id: id.to_string(),
            url: format!("https://www.pixiv.net/artworks/{}", id),
            author: self.user_name,
            title: Some(self.illust_title).filter(|title| !title.is_empty()),
            images,
            tags,
            created_at: DateTime::parse_from_rfc3339(&self.create_date)
                .map(|date| date.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            likes: self.like_count,
            reposts: 0,
            replies: self.comment_count,
            nsfw: self.x_restrict > 0,
            ai_generated,
            details: ArtworkDetails::Pixiv {
                author_id: self.user_id,
                views: self.view_count,
                bookmarks: self.bookmark_count,
            },
        })
    }
}
