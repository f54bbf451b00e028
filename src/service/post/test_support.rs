//! In-test fakes for the provider and chat seams.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    error::{provider::ProviderError, AppError},
    model::{
        artwork::{Artwork, ProviderKind},
        message::MessagePayload,
        settings::{GuildSettings, UserSettings},
    },
    provider::{
        bluesky::BlueskyProvider, deviantart::DeviantArtProvider, nhentai::NhentaiProvider,
        pixiv::PixivProvider, twitter::TwitterProvider, Provider,
    },
    service::{chat::ChatPlatform, settings::SettingsSource},
};

/// Provider matching real URLs but answering lookups from canned results.
pub(crate) struct FakeProvider {
    matcher: Arc<dyn Provider>,
    artworks: HashMap<String, Artwork>,
    errors: HashMap<String, ProviderError>,
    delays: HashMap<String, Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeProvider {
    pub(crate) fn new(kind: ProviderKind) -> Self {
        let client = reqwest::Client::new();
        let ttl = Duration::from_secs(1);
        let matcher: Arc<dyn Provider> = match kind {
            ProviderKind::Pixiv => Arc::new(PixivProvider::new(client, "i.pixiv.re".into(), ttl)),
            ProviderKind::Twitter => Arc::new(TwitterProvider::new(client, ttl)),
            ProviderKind::DeviantArt => Arc::new(DeviantArtProvider::new(client)),
            ProviderKind::Bluesky => Arc::new(BlueskyProvider::new(client)),
            ProviderKind::Nhentai => Arc::new(NhentaiProvider::new(client)),
        };

        Self {
            matcher,
            artworks: HashMap::new(),
            errors: HashMap::new(),
            delays: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn pixiv() -> Self {
        Self::new(ProviderKind::Pixiv)
    }

    pub(crate) fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artworks.insert(artwork.id.clone(), artwork);
        self
    }

    pub(crate) fn with_error(mut self, id: &str, error: ProviderError) -> Self {
        self.errors.insert(id.to_string(), error);
        self
    }

    pub(crate) fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub(crate) fn calls(&self, id: &str) -> usize {
        self.calls.lock().unwrap().get(id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        self.matcher.kind()
    }

    fn matches(&self, url: &str) -> Option<String> {
        self.matcher.matches(url)
    }

    async fn find(&self, id: &str) -> Result<Artwork, ProviderError> {
        *self.calls.lock().unwrap().entry(id.to_string()).or_default() += 1;

        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = self.errors.get(id) {
            return Err(error.clone());
        }

        self.artworks
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                kind: self.kind(),
                id: id.to_string(),
            })
    }
}

/// Everything the fake chat platform was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ChatCall {
    Send {
        channel_id: u64,
        message_id: u64,
        message: MessagePayload,
    },
    React {
        channel_id: u64,
        message_id: u64,
        emoji: String,
    },
    Delete {
        channel_id: u64,
        message_id: u64,
    },
    DirectMessage {
        user_id: u64,
        message: MessagePayload,
    },
}

/// Chat platform recording calls in memory.
#[derive(Default)]
pub(crate) struct FakeChat {
    pub(crate) calls: Mutex<Vec<ChatCall>>,
    /// Guild of each known channel.
    pub(crate) channel_guilds: HashMap<u64, u64>,
    /// `(guild_id, user_id)` pairs of guild members.
    pub(crate) members: Vec<(u64, u64)>,
    pub(crate) nsfw_channels: Vec<u64>,
    /// Channels where sending fails.
    pub(crate) failing_channels: Vec<u64>,
    next_message_id: Mutex<u64>,
}

impl FakeChat {
    pub(crate) fn new() -> Self {
        Self {
            next_message_id: Mutex::new(1000),
            ..Default::default()
        }
    }

    pub(crate) fn with_channel(mut self, channel_id: u64, guild_id: u64) -> Self {
        self.channel_guilds.insert(channel_id, guild_id);
        self
    }

    pub(crate) fn with_member(mut self, guild_id: u64, user_id: u64) -> Self {
        self.members.push((guild_id, user_id));
        self
    }

    pub(crate) fn with_nsfw_channel(mut self, channel_id: u64) -> Self {
        self.nsfw_channels.push(channel_id);
        self
    }

    pub(crate) fn with_failing_channel(mut self, channel_id: u64) -> Self {
        self.failing_channels.push(channel_id);
        self
    }

    pub(crate) fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Messages sent to a channel, in send order.
    pub(crate) fn sent_to(&self, channel_id: u64) -> Vec<MessagePayload> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChatCall::Send {
                    channel_id: c,
                    message,
                    ..
                } if c == channel_id => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatPlatform for FakeChat {
    async fn send(&self, channel_id: u64, message: MessagePayload) -> Result<u64, AppError> {
        if self.failing_channels.contains(&channel_id) {
            return Err(AppError::NotFound(format!("Unknown channel {}", channel_id)));
        }

        let message_id = {
            let mut next = self.next_message_id.lock().unwrap();
            *next += 1;
            *next
        };
        self.calls.lock().unwrap().push(ChatCall::Send {
            channel_id,
            message_id,
            message,
        });

        Ok(message_id)
    }

    async fn react(&self, channel_id: u64, message_id: u64, emoji: &str) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(ChatCall::React {
            channel_id,
            message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(ChatCall::Delete {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn channel_guild(&self, channel_id: u64) -> Result<Option<u64>, AppError> {
        Ok(self.channel_guilds.get(&channel_id).copied())
    }

    async fn is_member(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        Ok(self.members.contains(&(guild_id, user_id)))
    }

    async fn is_nsfw_channel(&self, channel_id: u64) -> Result<bool, AppError> {
        Ok(self.nsfw_channels.contains(&channel_id))
    }

    async fn direct_message(&self, user_id: u64, message: MessagePayload) -> Result<(), AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(ChatCall::DirectMessage { user_id, message });
        Ok(())
    }
}

/// Settings source serving fixed settings and recording group edits.
#[derive(Default)]
pub(crate) struct FakeSettings {
    pub(crate) guilds: HashMap<u64, GuildSettings>,
    pub(crate) users: HashMap<u64, UserSettings>,
    pub(crate) removed: Mutex<Vec<(i32, u64)>>,
}

impl FakeSettings {
    pub(crate) fn with_guild(mut self, settings: GuildSettings) -> Self {
        self.guilds.insert(settings.guild_id, settings);
        self
    }

    pub(crate) fn with_user(mut self, settings: UserSettings) -> Self {
        self.users.insert(settings.user_id, settings);
        self
    }

    pub(crate) fn removed(&self) -> Vec<(i32, u64)> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsSource for FakeSettings {
    async fn find_guild(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        Ok(self
            .guilds
            .get(&guild_id)
            .cloned()
            .unwrap_or_else(|| GuildSettings::default_for(guild_id)))
    }

    async fn find_user(&self, user_id: u64) -> Result<UserSettings, AppError> {
        Ok(self
            .users
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| UserSettings::default_for(user_id)))
    }

    async fn remove_crosspost_channel(
        &self,
        group_id: i32,
        channel_id: u64,
    ) -> Result<(), AppError> {
        self.removed.lock().unwrap().push((group_id, channel_id));
        Ok(())
    }
}
