//! SeaORM entity models for the bot's persistent storage.

pub mod prelude;

pub mod art_channel;
pub mod crosspost_group;
pub mod crosspost_group_channel;
pub mod favourite;
pub mod guild_settings;
pub mod posted_artwork;
pub mod repost;
pub mod user_settings;
