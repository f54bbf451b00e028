//! Repost notice sent alongside (or instead of) reposted artworks.

use crate::model::{
    message::{EmbedPayload, MessagePayload},
    repost::Repost,
};

const NOTICE_COLOR: u32 = 0xffa500;

/// Builds the notice listing artworks already posted in the channel.
///
/// Each line links the message the artwork was first posted in and shows, as a Discord
/// relative timestamp, when the artwork stops counting as a repost.
///
/// # Arguments
/// - `reposts` - Repost hits in source order, never empty
/// - `removed` - Whether the reposted artworks were suppressed rather than sent
///
/// # Returns
/// - `MessagePayload` - Embed-only notice
pub fn repost_notice(reposts: &[Repost], removed: bool) -> MessagePayload {
    let title = match (reposts.len(), removed) {
        (1, false) => "Repost detected",
        (1, true) => "Repost removed",
        (_, false) => "Reposts detected",
        (_, true) => "Reposts removed",
    };

    let description = reposts
        .iter()
        .map(|repost| {
            format!(
                "{} was [already posted]({}), expires <t:{}:R>",
                repost.url,
                repost.message_link(),
                repost.expires_at.timestamp()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    MessagePayload::embed(EmbedPayload {
        title: Some(title.to_string()),
        description: Some(description),
        color: Some(NOTICE_COLOR),
        ..Default::default()
    })
}
