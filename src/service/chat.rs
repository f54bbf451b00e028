//! Chat platform seam used by the artwork services.

use async_trait::async_trait;

use crate::{error::AppError, model::message::MessagePayload};

/// Operations the artwork services need from the chat platform.
///
/// The Discord implementation lives in the bot module; services only depend on this trait.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Sends a message and returns its ID.
    async fn send(&self, channel_id: u64, message: MessagePayload) -> Result<u64, AppError>;

    async fn react(&self, channel_id: u64, message_id: u64, emoji: &str) -> Result<(), AppError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Guild the channel belongs to, `None` for direct message channels.
    async fn channel_guild(&self, channel_id: u64) -> Result<Option<u64>, AppError>;

    /// Whether the user is a member of the guild.
    async fn is_member(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError>;

    /// Whether the channel is age-restricted.
    async fn is_nsfw_channel(&self, channel_id: u64) -> Result<bool, AppError>;

    async fn direct_message(&self, user_id: u64, message: MessagePayload) -> Result<(), AppError>;
}
