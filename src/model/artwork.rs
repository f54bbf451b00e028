//! Artwork model produced by providers.
//!
//! An `Artwork` hoists the fields every site shares into one struct and keeps the
//! provider-specific remainder in `ArtworkDetails`. Artworks are built fresh by each
//! provider lookup and never mutated afterwards.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::error::internal::InternalError;

/// Art-sharing sites the bot understands.
///
/// The declaration order is the matching priority order used by the provider registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    Pixiv,
    Twitter,
    DeviantArt,
    Bluesky,
    Nhentai,
}

impl ProviderKind {
    /// Every provider in matching priority order.
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::Pixiv,
        ProviderKind::Twitter,
        ProviderKind::DeviantArt,
        ProviderKind::Bluesky,
        ProviderKind::Nhentai,
    ];

    /// Stable lowercase identifier used in storage and repost keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pixiv => "pixiv",
            Self::Twitter => "twitter",
            Self::DeviantArt => "deviantart",
            Self::Bluesky => "bluesky",
            Self::Nhentai => "nhentai",
        }
    }

    /// Human readable site name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pixiv => "Pixiv",
            Self::Twitter => "Twitter",
            Self::DeviantArt => "DeviantArt",
            Self::Bluesky => "Bluesky",
            Self::Nhentai => "nhentai",
        }
    }

    /// Sites whose every artwork is NSFW.
    ///
    /// Guilds that disallow NSFW content skip these providers before any fetch happens.
    pub fn always_nsfw(&self) -> bool {
        matches!(self, Self::Nhentai)
    }

    /// Embed accent color for the site.
    pub fn color(&self) -> u32 {
        match self {
            Self::Pixiv => 0x0096fa,
            Self::Twitter => 0x1da1f2,
            Self::DeviantArt => 0x05cc47,
            Self::Bluesky => 0x1185fe,
            Self::Nhentai => 0xed2553,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InternalError::UnknownProvider(s.to_string()))
    }
}

/// Provider-qualified artwork identifier.
///
/// Different sites can hand out identical numeric ids, so anything keyed by artwork
/// (repost records, in-flight fetch deduplication) uses this instead of the bare id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtworkKey {
    pub kind: ProviderKind,
    pub id: String,
}

impl ArtworkKey {
    pub fn new(kind: ProviderKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ArtworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// A resolved artwork ready to be rendered.
///
/// `images` holds one URL per page and is never empty; providers report an artwork
/// without images as not found.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    /// Site-native identifier.
    pub id: String,
    /// Canonical permalink.
    pub url: String,
    /// Author display name.
    pub author: String,
    pub title: Option<String>,
    /// Image URLs, one per page, in page order.
    pub images: Vec<String>,
    /// Tags in site order without duplicates.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
    pub nsfw: bool,
    pub ai_generated: bool,
    /// Provider-specific payload.
    pub details: ArtworkDetails,
}

/// Fields only one provider knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtworkDetails {
    Pixiv {
        author_id: String,
        views: u64,
        bookmarks: u64,
    },
    Twitter {
        username: String,
        content: String,
        video_url: Option<String>,
    },
    Bluesky {
        handle: String,
        content: String,
    },
    DeviantArt {
        author_url: Option<String>,
        views: u64,
    },
    Nhentai {
        media_id: String,
        japanese_title: Option<String>,
    },
}

impl Artwork {
    /// Provider that produced this artwork.
    pub fn kind(&self) -> ProviderKind {
        match self.details {
            ArtworkDetails::Pixiv { .. } => ProviderKind::Pixiv,
            ArtworkDetails::Twitter { .. } => ProviderKind::Twitter,
            ArtworkDetails::Bluesky { .. } => ProviderKind::Bluesky,
            ArtworkDetails::DeviantArt { .. } => ProviderKind::DeviantArt,
            ArtworkDetails::Nhentai { .. } => ProviderKind::Nhentai,
        }
    }

    pub fn key(&self) -> ArtworkKey {
        ArtworkKey::new(self.kind(), self.id.clone())
    }

    pub fn page_count(&self) -> usize {
        self.images.len()
    }

    /// Title to show in embeds, falling back to a description of the post.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("{} post by {}", self.kind(), self.author),
        }
    }

    /// Reduces the artwork to the fields worth persisting.
    ///
    /// # Returns
    /// - `ArtworkRecord` - Storable summary pointing at the first page
    pub fn to_record(&self) -> ArtworkRecord {
        ArtworkRecord {
            kind: self.kind(),
            artwork_id: self.id.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            image_url: self.images.first().cloned().unwrap_or_default(),
            nsfw: self.nsfw,
        }
    }
}

/// Storable summary of an artwork, used for posted-message tracking and favourites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRecord {
    pub kind: ProviderKind,
    pub artwork_id: String,
    pub url: String,
    pub title: Option<String>,
    pub author: String,
    pub image_url: String,
    pub nsfw: bool,
}

/// Removes empty and duplicate tags while keeping first-seen order.
///
/// # Arguments
/// - `tags` - Raw tags as returned by a site
///
/// # Returns
/// - `Vec<String>` - Trimmed, deduplicated tags
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect()
}

/// Heuristic for tags that mark AI-generated content across sites.
pub fn is_ai_tag(tag: &str) -> bool {
    let tag = tag.to_lowercase();
    matches!(
        tag.as_str(),
        "ai" | "aiart"
            | "ai art"
            | "aiartwork"
            | "ai-generated"
            | "ai generated"
            | "aigenerated"
            | "aiイラスト"
            | "ai生成"
            | "stablediffusion"
            | "stable diffusion"
            | "novelai"
            | "midjourney"
    )
}
