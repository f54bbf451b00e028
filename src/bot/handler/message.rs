use serenity::all::{Context, Message};

use crate::{service::post::IncomingMessage, state::BotState};

/// Handle message creation in a channel
///
/// Runs guild messages from users through the posting pipeline. Errors the user can act
/// on were already reported in the channel and are only logged at debug level.
pub async fn handle_message(state: &BotState, _ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    // Only guild channels have settings to post under
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let incoming = IncomingMessage {
        guild_id: guild_id.get(),
        channel_id: message.channel_id.get(),
        message_id: message.id.get(),
        author_id: message.author.id.get(),
        author_name: message
            .author
            .global_name
            .clone()
            .unwrap_or_else(|| message.author.name.clone()),
        author_avatar_url: message.author.avatar_url(),
        content: message.content,
    };

    match state.post.handle(&incoming).await {
        Ok(outcome) if outcome.sent > 0 || outcome.reposts > 0 => {
            tracing::debug!(
                "Posted {} messages for message {} in channel {} ({} reposts)",
                outcome.sent,
                incoming.message_id,
                incoming.channel_id,
                outcome.reposts
            );
        }
        Ok(_) => {}
        Err(e) if e.is_expected() => {
            tracing::debug!(
                "Message {} in channel {} not posted: {}",
                incoming.message_id,
                incoming.channel_id,
                e
            );
        }
        Err(e) => {
            tracing::error!(
                "Failed to post artworks for message {} in channel {}: {:?}",
                incoming.message_id,
                incoming.channel_id,
                e
            );
        }
    }
}
