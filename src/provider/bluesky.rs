//! Bluesky provider using the public AppView API.
//!
//! A Bluesky post is addressed by its author and record key, so the canonical id is
//! `{handle}/{rkey}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::provider::ProviderError,
    model::artwork::{dedup_tags, is_ai_tag, Artwork, ArtworkDetails, ProviderKind},
    provider::{http::get_json, parse_with_host, Provider},
};

const HOSTS: &[&str] = &["bsky.app", "www.bsky.app", "staging.bsky.app", "fxbsky.app", "bskx.app"];
const API_URL: &str = "https://public.api.bsky.app/xrpc/app.bsky.feed.getPostThread";
const NSFW_LABELS: &[&str] = &["porn", "sexual", "nudity", "graphic-media"];

pub struct BlueskyProvider {
    client: reqwest::Client,
}

impl BlueskyProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Provider for BlueskyProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bluesky
    }

    fn matches(&self, url: &str) -> Option<String> {
        let parsed = parse_with_host(url, HOSTS)?;
        let segments: Vec<&str> = parsed.path_segments()?.collect();

        match segments.as_slice() {
            ["profile", handle, "post", rkey, ..] if !handle.is_empty() && !rkey.is_empty() => {
                Some(format!("{}/{}", handle, rkey))
            }
            _ => None,
        }
    }

    async fn find(&self, id: &str) -> Result<Artwork, ProviderError> {
        let (handle, rkey) = id.split_once('/').ok_or_else(|| ProviderError::NotFound {
            kind: ProviderKind::Bluesky,
            id: id.to_string(),
        })?;
        let uri = format!("at://{}/app.bsky.feed.post/{}", handle, rkey);

        let response: ThreadResponse = get_json(
            ProviderKind::Bluesky,
            id,
            self.client
                .get(API_URL)
                .query(&[("uri", uri.as_str()), ("depth", "0")]),
        )
        .await?;

        response.into_artwork(id, handle, rkey)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ThreadResponse {
    thread: Option<Thread>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Thread {
    post: Option<Post>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Post {
    author: PostAuthor,
    record: PostRecord,
    embed: Option<Embed>,
    like_count: u64,
    repost_count: u64,
    reply_count: u64,
    labels: Vec<Label>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PostAuthor {
    handle: String,
    display_name: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PostRecord {
    text: String,
    created_at: String,
    tags: Vec<String>,
}

/// Images are either embedded directly or, for quote posts with media, under `media`.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Embed {
    images: Vec<EmbedImage>,
    media: Option<Box<Embed>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EmbedImage {
    fullsize: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Label {
    val: String,
}

impl ThreadResponse {
    fn into_artwork(self, id: &str, handle: &str, rkey: &str) -> Result<Artwork, ProviderError> {
        let not_found = || ProviderError::NotFound {
            kind: ProviderKind::Bluesky,
            id: id.to_string(),
        };

        let post = self.thread.and_then(|thread| thread.post).ok_or_else(not_found)?;

        let images: Vec<String> = post
            .embed
            .map(|embed| {
                if embed.images.is_empty() {
                    embed.media.map(|media| media.images).unwrap_or_default()
                } else {
                    embed.images
                }
            })
            .unwrap_or_default()
            .into_iter()
            .map(|image| image.fullsize)
            .filter(|url| !url.is_empty())
            .collect();

        if images.is_empty() {
            return Err(not_found());
        }

        let tags = dedup_tags(post.record.tags);
        let nsfw = post
            .labels
            .iter()
            .any(|label| NSFW_LABELS.contains(&label.val.as_str()));
        let ai_generated = tags.iter().any(|tag| is_ai_tag(tag));
        let author_handle = if post.author.handle.is_empty() {
            handle.to_string()
        } else {
            post.author.handle
        };

        Ok(Artwork {
            id: id.to_string(),
            url: format!("https://bsky.app/profile/{}/post/{}", author_handle, rkey),
            author: post
                .author
                .display_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| author_handle.clone()),
            title: None,
            images,
            tags,
            created_at: DateTime::parse_from_rfc3339(&post.record.created_at)
                .map(|date| date.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            likes: post.like_count,
            reposts: post.repost_count,
            replies: post.reply_count,
            nsfw,
            ai_generated,
            details: ArtworkDetails::Bluesky {
                handle: author_handle,
                content: post.record.text,
            },
        })
    }
}
