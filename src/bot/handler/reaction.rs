//! Reaction handlers driving favourites.

use serenity::all::{Context, Reaction, ReactionType};

use crate::{service::post::send::FAVOURITE_EMOJI, state::BotState};

/// Whether the reaction is the favourite heart, with or without the emoji variation selector.
fn is_favourite(emoji: &ReactionType) -> bool {
    match emoji {
        ReactionType::Unicode(value) => value.trim_end_matches('\u{fe0f}') == FAVOURITE_EMOJI,
        _ => false,
    }
}

/// Returns the reacting user unless the reaction is the bot's own.
fn reacting_user(ctx: &Context, reaction: &Reaction) -> Option<u64> {
    let user_id = reaction.user_id?;
    if user_id == ctx.cache.current_user().id {
        return None;
    }
    Some(user_id.get())
}

/// Handles a reaction being added to a message.
pub async fn handle_reaction_add(state: &BotState, ctx: Context, reaction: Reaction) {
    if !is_favourite(&reaction.emoji) {
        return;
    }
    let Some(user_id) = reacting_user(&ctx, &reaction) else {
        return;
    };
    let message_id = reaction.message_id.get();

    match state.favourites.add(user_id, message_id).await {
        Ok(Some(favourite)) => tracing::debug!(
            "User {} favourited {} artwork {}",
            user_id,
            favourite.record.kind,
            favourite.record.artwork_id
        ),
        Ok(None) => {}
        Err(e) => tracing::error!(
            "Failed to add favourite for user {} on message {}: {:?}",
            user_id,
            message_id,
            e
        ),
    }
}

/// Handles a reaction being removed from a message.
pub async fn handle_reaction_remove(state: &BotState, ctx: Context, reaction: Reaction) {
    if !is_favourite(&reaction.emoji) {
        return;
    }
    let Some(user_id) = reacting_user(&ctx, &reaction) else {
        return;
    };
    let message_id = reaction.message_id.get();

    if let Err(e) = state.favourites.remove(user_id, message_id).await {
        tracing::error!(
            "Failed to remove favourite for user {} on message {}: {:?}",
            user_id,
            message_id,
            e
        );
    }
}
