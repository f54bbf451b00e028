//! Twitter / X provider.
//!
//! Tweets are resolved through the FxTwitter API, which needs no credentials. Links from
//! the common embed-fixing mirrors resolve to the same tweet id as the original.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::{sync::LazyLock, time::Duration};

use crate::{
    error::provider::ProviderError,
    model::artwork::{dedup_tags, is_ai_tag, Artwork, ArtworkDetails, ProviderKind},
    provider::{cache::ArtworkCache, http::get_json, parse_with_host, Provider},
};

const HOSTS: &[&str] = &[
    "twitter.com",
    "www.twitter.com",
    "mobile.twitter.com",
    "x.com",
    "www.x.com",
    "mobile.x.com",
    "fxtwitter.com",
    "www.fxtwitter.com",
    "vxtwitter.com",
    "www.vxtwitter.com",
    "fixupx.com",
    "www.fixupx.com",
    "fixvx.com",
    "www.fixvx.com",
    "twittpr.com",
    "nitter.net",
];
const API_BASE: &str = "https://api.fxtwitter.com/status";

static STATUS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(?:[^/]+/)?(?:web/)?status(?:es)?/(\d+)").unwrap());
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

pub struct TwitterProvider {
    client: reqwest::Client,
    cache: ArtworkCache,
}

impl TwitterProvider {
    pub fn new(client: reqwest::Client, cache_ttl: Duration) -> Self {
        Self {
            client,
            cache: ArtworkCache::new(cache_ttl),
        }
    }

    async fn fetch(&self, id: &str) -> Result<Artwork, ProviderError> {
        let response: FxResponse = get_json(
            ProviderKind::Twitter,
            id,
            self.client.get(format!("{}/{}", API_BASE, id)),
        )
        .await?;

        response.into_artwork(id)
    }
}

#[async_trait]
impl Provider for TwitterProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Twitter
    }

    fn matches(&self, url: &str) -> Option<String> {
        let parsed = parse_with_host(url, HOSTS)?;

        STATUS_PATH
            .captures(parsed.path())
            .map(|captures| captures[1].to_string())
    }

    async fn find(&self, id: &str) -> Result<Artwork, ProviderError> {
        self.cache.get_or_fetch(id, self.fetch(id)).await
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FxResponse {
    code: u16,
    message: String,
    tweet: Option<Tweet>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Tweet {
    url: String,
    text: String,
    author: TweetAuthor,
    replies: u64,
    retweets: u64,
    likes: u64,
    created_timestamp: i64,
    possibly_sensitive: bool,
    media: Option<Media>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TweetAuthor {
    name: String,
    screen_name: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Media {
    photos: Vec<Photo>,
    videos: Vec<Video>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Photo {
    url: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Video {
    url: String,
    thumbnail_url: String,
}

impl FxResponse {
    fn into_artwork(self, id: &str) -> Result<Artwork, ProviderError> {
        let not_found = || ProviderError::NotFound {
            kind: ProviderKind::Twitter,
            id: id.to_string(),
        };

        let tweet = match self.tweet {
            Some(tweet) if self.code == 200 || self.code == 0 => tweet,
            _ => {
                tracing::debug!(
                    "FxTwitter reported no tweet {} ({}): {}",
                    id,
                    self.code,
                    self.message
                );
                return Err(not_found());
            }
        };

        let media = tweet.media.unwrap_or_default();
        let video_url = media.videos.first().map(|video| video.url.clone());
        let images: Vec<String> = if media.photos.is_empty() {
            media
                .videos
                .into_iter()
                .map(|video| video.thumbnail_url)
                .filter(|url| !url.is_empty())
                .collect()
        } else {
            media
                .photos
                .into_iter()
                .map(|photo| photo.url)
                .filter(|url| !url.is_empty())
                .collect()
        };

        if images.is_empty() {
            return Err(not_found());
        }

        let tags = dedup_tags(
            HASHTAG
                .captures_iter(&tweet.text)
                .map(|captures| captures[1].to_string()),
        );
        let ai_generated = tags.iter().any(|tag| is_ai_tag(tag));
        let url = if tweet.url.is_empty() {
            format!("https://twitter.com/{}/status/{}", tweet.author.screen_name, id)
        } else {
            tweet.url
        };

        Ok(Artwork {
            id: id.to_string(),
            url,
            author: tweet.author.name,
            title: None,
            images,
            tags,
            created_at: DateTime::from_timestamp(tweet.created_timestamp, 0)
                .unwrap_or_else(Utc::now),
            likes: tweet.likes,
            reposts: tweet.retweets,
            replies: tweet.replies,
            nsfw: tweet.possibly_sensitive,
            ai_generated,
            details: ArtworkDetails::Twitter {
                username: tweet.author.screen_name,
                content: tweet.text,
                video_url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TwitterProvider {
        TwitterProvider::new(reqwest::Client::new(), Duration::from_secs(60))
    }

    #[test]
    fn mirrors_resolve_to_same_id() {
        let provider = provider();

        for url in [
            "https://twitter.com/u/status/123",
            "https://mobile.x.com/u/status/123",
            "https://fxtwitter.com/i/status/123",
            "https://vxtwitter.com/u/status/123/photo/1",
            "https://fixupx.com/u/status/123?s=20",
            "https://fixvx.com/u/statuses/123",
            "https://x.com/i/web/status/123",
            "https://www.twitter.com/u/status/123",
            "https://twittpr.com/u/status/123",
            "https://nitter.net/u/status/123#m",
        ] {
            assert_eq!(provider.matches(url).as_deref(), Some("123"), "{}", url);
        }
    }

    #[test]
    fn rejects_non_status_urls() {
        let provider = provider();

        for url in [
            "https://twitter.com/u",
            "https://x.com/u/likes",
            "https://example.com/u/status/123",
            "https://pbs.twimg.com/media/abc.jpg",
            "https://notx.com/u/status/123",
        ] {
            assert!(provider.matches(url).is_none(), "{}", url);
        }
    }

    #[test]
    fn builds_artwork_from_photos() {
        let response: FxResponse = serde_json::from_str(
            r##"{"code":200,"message":"OK","tweet":{
                "url":"https://twitter.com/artist/status/123","text":"new piece #art #Art #aiart",
                "author":{"name":"Artist","screen_name":"artist"},
                "replies":1,"retweets":2,"likes":3,"created_timestamp":1700000000,
                "possibly_sensitive":true,
                "media":{"photos":[{"url":"https://pbs.twimg.com/media/a.jpg"},{"url":"https://pbs.twimg.com/media/b.jpg"}]}}}"##,
        )
        .unwrap();

        let artwork = response.into_artwork("123").unwrap();

        assert_eq!(artwork.page_count(), 2);
        assert_eq!(artwork.author, "Artist");
        assert_eq!(artwork.tags, vec!["art".to_string(), "aiart".to_string()]);
        assert!(artwork.ai_generated);
        assert!(artwork.nsfw);
        assert_eq!(artwork.reposts, 2);
    }

    #[test]
    fn video_tweet_uses_thumbnail() {
        let response: FxResponse = serde_json::from_str(
            r#"{"code":200,"tweet":{"author":{"name":"A","screen_name":"a"},
                "media":{"videos":[{"url":"https://video.twimg.com/v.mp4","thumbnail_url":"https://pbs.twimg.com/t.jpg"}]}}}"#,
        )
        .unwrap();

        let artwork = response.into_artwork("5").unwrap();

        assert_eq!(artwork.images, vec!["https://pbs.twimg.com/t.jpg".to_string()]);
        assert_eq!(artwork.url, "https://twitter.com/a/status/5");
        assert!(matches!(
            artwork.details,
            ArtworkDetails::Twitter { video_url: Some(_), .. }
        ));
    }

    #[test]
    fn text_only_tweet_is_not_found() {
        let response: FxResponse =
            serde_json::from_str(r#"{"code":200,"tweet":{"text":"hello"}}"#).unwrap();

        assert!(matches!(
            response.into_artwork("1"),
            Err(ProviderError::NotFound { .. })
        ));
    }

    #[test]
    fn missing_tweet_is_not_found() {
        let response: FxResponse =
            serde_json::from_str(r#"{"code":404,"message":"NOT_FOUND"}"#).unwrap();

        assert!(matches!(
            response.into_artwork("1"),
            Err(ProviderError::NotFound { .. })
        ));
    }
}
