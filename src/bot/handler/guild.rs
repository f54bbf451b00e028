//! Guild event handlers.

use serenity::all::{Context, Guild};

use crate::state::BotState;

/// Handles the guild_create event when a guild becomes available or the bot joins one.
///
/// Stores default settings for guilds seen for the first time. Guilds that already have
/// settings keep them.
///
/// # Arguments
/// - `state` - Shared bot services
/// - `_ctx` - Discord context (unused)
/// - `guild` - Guild that became available
/// - `is_new` - Whether the bot just joined the guild
pub async fn handle_guild_create(
    state: &BotState,
    _ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    tracing::debug!(
        "Guild create event: {} ({}) - new: {:?}",
        guild.name,
        guild_id,
        is_new
    );

    if let Err(e) = state.settings.bootstrap_guild(guild_id).await {
        tracing::error!(
            "Failed to bootstrap settings for guild {} ({}): {:?}",
            guild_id,
            guild.name,
            e
        );
    }
}
