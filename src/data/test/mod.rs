mod crosspost_group;
mod favourite;
mod guild_settings;
mod posted_artwork;
mod repost;
mod user_settings;
