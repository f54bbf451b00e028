//! Rendering of resolved artworks into chat messages.
//!
//! Each artwork becomes one message per page. The first page carries the full metadata;
//! later pages only repeat the title, image and footer. When a batch exceeds the guild's
//! page limit it is truncated in one of two ways, see `build`.

use crate::model::{
    artwork::{Artwork, ArtworkDetails, ArtworkRecord},
    message::{EmbedAuthor, EmbedField, EmbedPayload, MessagePayload},
};

const MAX_DESCRIPTION_LEN: usize = 4096;
const MAX_FIELD_LEN: usize = 1024;
const AI_DISCLAIMER: &str = "⚠️ This artwork is marked as AI-generated.";

/// Identity shown on crossposted messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosspostAuthor {
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Destination-specific rendering policy.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum pages sent for one batch. Zero is treated as one.
    pub limit: usize,
    /// Whether the destination channel allows NSFW artworks.
    pub nsfw_channel: bool,
    pub tags: bool,
    pub footer: bool,
    /// Set when rendering for a crosspost destination.
    pub crosspost: Option<CrosspostAuthor>,
}

/// Messages for one artwork, plus its storable record.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtwork {
    pub record: ArtworkRecord,
    /// One message per sent page, never empty.
    pub messages: Vec<MessagePayload>,
}

pub fn single_artwork_notice(total: usize, limit: usize) -> String {
    format!(
        "Album size ({}) is higher than the server's limit ({}), only the first {} images were sent.",
        total, limit, limit
    )
}

pub fn multiple_artworks_notice(total: usize, limit: usize) -> String {
    format!(
        "Album size ({}) is higher than the server's limit ({}), only the first image of every artwork has been sent.",
        total, limit
    )
}

/// Renders a batch of artworks for one destination channel.
///
/// NSFW artworks are dropped when the channel is not NSFW. If the remaining artworks have
/// more pages than `options.limit`, a single artwork is cut to its first `limit` pages,
/// while several artworks are each cut to their first page; either way a notice naming the
/// truncation is put on the first message. Crosspost attribution is applied last and
/// replaces every embed author.
///
/// # Arguments
/// - `artworks` - Artworks in source order
/// - `options` - Destination policy
///
/// # Returns
/// - `Vec<RenderedArtwork>` - Rendered artworks in source order
pub fn build(artworks: &[Artwork], options: &RenderOptions) -> Vec<RenderedArtwork> {
    let visible: Vec<&Artwork> = artworks
        .iter()
        .filter(|artwork| {
            let allowed = options.nsfw_channel || !artwork.nsfw;
            if !allowed {
                tracing::debug!("Dropping NSFW artwork {} for SFW channel", artwork.key());
            }
            allowed
        })
        .collect();

    let limit = options.limit.max(1);
    let total: usize = visible.iter().map(|artwork| artwork.page_count()).sum();

    let (pages_per_artwork, notice) = if total <= limit {
        (usize::MAX, None)
    } else if visible.len() == 1 {
        (limit, Some(single_artwork_notice(total, limit)))
    } else {
        (1, Some(multiple_artworks_notice(total, limit)))
    };

    let mut rendered: Vec<RenderedArtwork> = visible
        .into_iter()
        .map(|artwork| RenderedArtwork {
            record: artwork.to_record(),
            messages: render_artwork(artwork, pages_per_artwork, options),
        })
        .collect();

    if let Some(notice) = notice {
        if let Some(first) = rendered
            .first_mut()
            .and_then(|artwork| artwork.messages.first_mut())
        {
            first.content = Some(notice);
        }
    }

    if let Some(author) = &options.crosspost {
        for message in rendered.iter_mut().flat_map(|artwork| artwork.messages.iter_mut()) {
            if let Some(embed) = message.embed.as_mut() {
                embed.author = Some(EmbedAuthor {
                    name: format!("Crosspost requested by {}", author.name),
                    url: None,
                    icon_url: author.avatar_url.clone(),
                });
            }
        }
    }

    rendered
}

/// Flattens rendered artworks into the message batch, one inner `Vec` per artwork.
pub fn into_batches(rendered: Vec<RenderedArtwork>) -> Vec<Vec<MessagePayload>> {
    rendered.into_iter().map(|artwork| artwork.messages).collect()
}

fn render_artwork(artwork: &Artwork, max_pages: usize, options: &RenderOptions) -> Vec<MessagePayload> {
    let page_count = artwork.page_count();
    let title = artwork.display_title();
    let footer = options.footer.then(|| footer_text(artwork));

    artwork
        .images
        .iter()
        .take(max_pages)
        .enumerate()
        .map(|(index, image)| {
            let title = if page_count > 1 {
                format!("{} | Page {}/{}", title, index + 1, page_count)
            } else {
                title.clone()
            };

            let mut embed = EmbedPayload {
                title: Some(title),
                url: Some(artwork.url.clone()),
                image_url: Some(image.clone()),
                footer: footer.clone(),
                color: Some(artwork.kind().color()),
                ..Default::default()
            };

            if index == 0 {
                add_metadata(&mut embed, artwork, options);
            }

            MessagePayload::embed(embed)
        })
        .collect()
}

fn add_metadata(embed: &mut EmbedPayload, artwork: &Artwork, options: &RenderOptions) {
    let mut description = match &artwork.details {
        ArtworkDetails::Twitter {
            content,
            video_url,
            ..
        } => {
            let mut text = content.clone();
            if let Some(video) = video_url {
                text.push_str(&format!("\n\n[Video]({})", video));
            }
            text
        }
        ArtworkDetails::Bluesky { content, .. } => content.clone(),
        _ => String::new(),
    };

    if artwork.ai_generated {
        if !description.is_empty() {
            description.push_str("\n\n");
        }
        description.push_str(AI_DISCLAIMER);
    }

    if !description.is_empty() {
        embed.description = Some(truncate(&description, MAX_DESCRIPTION_LEN));
    }

    embed.author = Some(EmbedAuthor {
        name: artwork.author.clone(),
        url: author_url(artwork),
        icon_url: None,
    });

    let mut fields = vec![EmbedField::inline("Likes", artwork.likes.to_string())];
    match &artwork.details {
        ArtworkDetails::Pixiv {
            views, bookmarks, ..
        } => {
            fields.push(EmbedField::inline("Bookmarks", bookmarks.to_string()));
            fields.push(EmbedField::inline("Views", views.to_string()));
        }
        ArtworkDetails::DeviantArt { views, .. } => {
            fields.push(EmbedField::inline("Views", views.to_string()));
        }
        ArtworkDetails::Twitter { .. } | ArtworkDetails::Bluesky { .. } => {
            fields.push(EmbedField::inline("Reposts", artwork.reposts.to_string()));
            fields.push(EmbedField::inline("Replies", artwork.replies.to_string()));
        }
        ArtworkDetails::Nhentai { .. } => {
            fields.push(EmbedField::inline("Pages", artwork.page_count().to_string()));
        }
    }

    if options.tags && !artwork.tags.is_empty() {
        fields.push(EmbedField::block(
            "Tags",
            truncate(&artwork.tags.join(" • "), MAX_FIELD_LEN),
        ));
    }

    embed.fields = fields;
    embed.timestamp = Some(artwork.created_at);
}

fn author_url(artwork: &Artwork) -> Option<String> {
    match &artwork.details {
        ArtworkDetails::Pixiv { author_id, .. } => {
            Some(format!("https://www.pixiv.net/users/{}", author_id))
        }
        ArtworkDetails::Twitter { username, .. } => Some(format!("https://twitter.com/{}", username)),
        ArtworkDetails::Bluesky { handle, .. } => Some(format!("https://bsky.app/profile/{}", handle)),
        ArtworkDetails::DeviantArt { author_url, .. } => author_url.clone(),
        ArtworkDetails::Nhentai { .. } => None,
    }
}

fn footer_text(artwork: &Artwork) -> String {
    match &artwork.details {
        ArtworkDetails::Nhentai {
            japanese_title: Some(japanese),
            ..
        } => format!("{} • {}", artwork.kind(), japanese),
        _ => artwork.kind().to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
