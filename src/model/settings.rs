//! Guild and user settings consumed by the artwork pipeline.

use chrono::TimeDelta;
use std::{fmt, str::FromStr};

use crate::{
    error::{internal::InternalError, AppError},
    model::artwork::ProviderKind,
    util::parse::parse_u64_from_string,
};

/// Default repost window for guilds without stored settings.
pub const DEFAULT_REPOST_EXPIRATION_SECS: i64 = 86_400;
/// Default number of pages sent per original message.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const DEFAULT_PREFIX: &str = "bt!";

/// How a guild treats artworks already posted in a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepostMode {
    /// No repost checking at all.
    Disabled,
    /// Reposts are flagged with a notice but still sent.
    #[default]
    Enabled,
    /// Reposts are suppressed, and a message made only of reposts is deleted.
    Strict,
}

impl RepostMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for RepostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepostMode {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "enabled" => Ok(Self::Enabled),
            "strict" => Ok(Self::Strict),
            other => Err(InternalError::UnknownRepostMode(other.to_string())),
        }
    }
}

/// Per-provider enable flags for a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderToggles {
    pub pixiv: bool,
    pub twitter: bool,
    pub deviant: bool,
    pub bluesky: bool,
    pub nhentai: bool,
}

impl ProviderToggles {
    pub fn all_enabled() -> Self {
        Self {
            pixiv: true,
            twitter: true,
            deviant: true,
            bluesky: true,
            nhentai: true,
        }
    }

    pub fn enabled(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Pixiv => self.pixiv,
            ProviderKind::Twitter => self.twitter,
            ProviderKind::DeviantArt => self.deviant,
            ProviderKind::Bluesky => self.bluesky,
            ProviderKind::Nhentai => self.nhentai,
        }
    }
}

/// Per-guild policy read by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    pub guild_id: u64,
    pub prefix: String,
    pub providers: ProviderToggles,
    pub repost: RepostMode,
    /// How long a posted artwork counts as a repost in the same channel.
    pub repost_expiration: TimeDelta,
    /// Maximum number of rendered pages per original message.
    pub limit: usize,
    /// Whether NSFW artworks may be posted in this guild at all.
    pub nsfw: bool,
    /// Channels the bot reacts in. Empty means every channel.
    pub art_channels: Vec<u64>,
    pub tags: bool,
    pub footer: bool,
    pub crosspost: bool,
    pub reactions: bool,
}

impl GuildSettings {
    /// Settings applied to a guild that has never been configured.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `GuildSettings` - Every provider enabled, reposts flagged for 24 hours
    pub fn default_for(guild_id: u64) -> Self {
        Self {
            guild_id,
            prefix: DEFAULT_PREFIX.to_string(),
            providers: ProviderToggles::all_enabled(),
            repost: RepostMode::Enabled,
            repost_expiration: TimeDelta::seconds(DEFAULT_REPOST_EXPIRATION_SECS),
            limit: DEFAULT_PAGE_LIMIT,
            nsfw: true,
            art_channels: Vec::new(),
            tags: true,
            footer: true,
            crosspost: true,
            reactions: true,
        }
    }

    /// Converts stored rows into guild settings at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - Guild settings row
    /// - `art_channels` - Art channel rows belonging to the guild
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Converted settings
    /// - `Err(AppError::InternalErr)` - Corrupted id or unknown repost mode
    pub fn from_entity(
        entity: entity::guild_settings::Model,
        art_channels: Vec<entity::art_channel::Model>,
    ) -> Result<Self, AppError> {
        let art_channels = art_channels
            .into_iter()
            .map(|channel| parse_u64_from_string(channel.channel_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            prefix: entity.prefix,
            providers: ProviderToggles {
                pixiv: entity.pixiv,
                twitter: entity.twitter,
                deviant: entity.deviant,
                bluesky: entity.bluesky,
                nhentai: entity.nhentai,
            },
            repost: entity.repost.parse()?,
            repost_expiration: TimeDelta::try_seconds(entity.repost_expiration)
                .unwrap_or_else(|| TimeDelta::seconds(DEFAULT_REPOST_EXPIRATION_SECS)),
            limit: usize::try_from(entity.page_limit).unwrap_or(DEFAULT_PAGE_LIMIT),
            nsfw: entity.nsfw,
            art_channels,
            tags: entity.tags,
            footer: entity.footer,
            crosspost: entity.crosspost,
            reactions: entity.reactions,
        })
    }

    /// Whether the bot should react to artworks posted in the channel.
    pub fn allows_channel(&self, channel_id: u64) -> bool {
        self.art_channels.is_empty() || self.art_channels.contains(&channel_id)
    }
}

/// A named set of channels a user's artworks are crossposted to.
///
/// Posting in `parent` fans out to every channel in `children`. The parent is never one of
/// the children and children are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosspostGroup {
    pub id: i32,
    pub name: String,
    pub parent: u64,
    pub children: Vec<u64>,
}

impl CrosspostGroup {
    pub fn new(id: i32, name: impl Into<String>, parent: u64) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            children: Vec::new(),
        }
    }

    /// Checks whether `channel_id` could be added as a child.
    ///
    /// # Returns
    /// - `Ok(())` - Channel can be added
    /// - `Err(AppError::BadRequest)` - Channel is the parent or already a child
    pub fn validate_child(&self, channel_id: u64) -> Result<(), AppError> {
        if channel_id == self.parent {
            return Err(AppError::BadRequest(format!(
                "Channel {} is the parent of group {} and can't be one of its children.",
                channel_id, self.name
            )));
        }

        if self.children.contains(&channel_id) {
            return Err(AppError::BadRequest(format!(
                "Channel {} is already in group {}.",
                channel_id, self.name
            )));
        }

        Ok(())
    }

    /// Appends a child channel after validating the group invariants.
    pub fn add_child(&mut self, channel_id: u64) -> Result<(), AppError> {
        self.validate_child(channel_id)?;
        self.children.push(channel_id);
        Ok(())
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub user_id: u64,
    /// Whether the user's posts are crossposted to their groups.
    pub crosspost: bool,
    /// Whether favourited artworks are also sent by direct message.
    pub dm: bool,
    pub groups: Vec<CrosspostGroup>,
}

impl UserSettings {
    pub fn default_for(user_id: u64) -> Self {
        Self {
            user_id,
            crosspost: true,
            dm: true,
            groups: Vec::new(),
        }
    }

    /// Finds the group whose parent is `channel_id`.
    pub fn group_for_parent(&self, channel_id: u64) -> Option<&CrosspostGroup> {
        self.groups.iter().find(|group| group.parent == channel_id)
    }
}
