pub use super::art_channel::Entity as ArtChannel;
pub use super::crosspost_group::Entity as CrosspostGroup;
pub use super::crosspost_group_channel::Entity as CrosspostGroupChannel;
pub use super::favourite::Entity as Favourite;
pub use super::guild_settings::Entity as GuildSettings;
pub use super::posted_artwork::Entity as PostedArtwork;
pub use super::repost::Entity as Repost;
pub use super::user_settings::Entity as UserSettings;
