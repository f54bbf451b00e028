//! Database repository layer for bot settings and artwork bookkeeping.
//!
//! Repositories use SeaORM entity models internally and return domain models from
//! `crate::model`, converting Discord snowflakes between their stored string form and
//! `u64` at this boundary.

pub mod crosspost_group;
pub mod favourite;
pub mod guild_settings;
pub mod posted_artwork;
pub mod repost;
pub mod user_settings;

#[cfg(test)]
mod test;
