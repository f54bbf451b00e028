//! Domain models shared across the bot.
//!
//! Domain models are converted from entity models at the repository boundary and from
//! upstream API payloads inside providers. Services work exclusively with these types.

pub mod artwork;
pub mod favourite;
pub mod message;
pub mod repost;
pub mod settings;
