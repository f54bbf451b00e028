//! Factory methods for creating test data.
//!
//! Factories create settings rows with sensible defaults so repository and service tests
//! only spell out the values they care about. Each entity has a `Factory` struct for
//! customization and a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::guild_settings::GuildSettingsFactory::new(&db)
//!     .guild_id("123")
//!     .nsfw(false)
//!     .build()
//!     .await?;
//!
//! let (user, group) = factory::helpers::create_user_with_group(&db, "100", &["201", "202"]).await?;
//! ```

pub mod crosspost_group;
pub mod guild_settings;
pub mod helpers;
pub mod user_settings;

pub use crosspost_group::create_group;
pub use guild_settings::create_guild_settings;
pub use user_settings::create_user_settings;
