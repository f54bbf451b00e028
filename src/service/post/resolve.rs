//! Artwork resolution: from message text to fetched artworks and repost hits.
//!
//! Every URL in the text is matched against the provider registry, duplicate artworks are
//! collapsed, each artwork passes the guild's provider and repost gates, and the remaining
//! ones are fetched concurrently under a shared limit. Results keep the order in which
//! artworks first appear in the text.

use futures::future::{join_all, try_join_all};
use std::{collections::HashSet, sync::Arc, time::Duration};
use tokio::sync::Semaphore;

use crate::{
    error::{internal::InternalError, provider::ProviderError, AppError},
    model::{
        artwork::{Artwork, ArtworkKey, ProviderKind},
        repost::{CreateRepostParam, Repost},
        settings::{GuildSettings, RepostMode},
    },
    provider::ProviderRegistry,
    service::repost::RepostDetector,
    util::url::extract_urls,
};

/// Default number of provider fetches allowed in flight across the process.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 16;
/// Default deadline for one resolution.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a resolution serves the original message or a crosspost destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    Original,
    /// Reposts are never fetched and no repost record is written; the crosspost service
    /// records artworks once it knows the IDs of the messages it sent.
    Crosspost,
}

/// What to do when an individual fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure aborts the whole resolution.
    FailFast,
    /// Failed artworks are skipped and reported in `Resolution::failures`.
    BestEffort,
}

/// Input of one resolution.
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    /// Message text containing artwork URLs.
    pub text: &'a str,
    /// Settings of the guild the artworks are posted to.
    pub guild: &'a GuildSettings,
    /// Channel the artworks are posted to.
    pub channel_id: u64,
    /// Message the artworks were posted in.
    pub message_id: u64,
    pub mode: ResolveMode,
    pub policy: FailurePolicy,
}

/// Outcome of one resolution.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Fetched artworks in source order.
    pub artworks: Vec<Artwork>,
    /// Artworks already posted in the channel, in source order.
    pub reposts: Vec<Repost>,
    /// Number of distinct artworks any provider recognised.
    pub matched: usize,
    /// Fetch failures skipped under `FailurePolicy::BestEffort`.
    pub failures: Vec<ProviderError>,
}

impl Resolution {
    /// Whether every recognised artwork was a repost.
    ///
    /// URLs no provider recognised are not counted.
    pub fn all_reposts(&self) -> bool {
        self.matched > 0 && self.reposts.len() == self.matched
    }
}

/// Per-artwork result before aggregation.
enum Outcome {
    /// Rejected by guild policy before any lookup.
    Skipped,
    /// Already posted and not fetched.
    Repost(Repost),
    Fetched {
        artwork: Artwork,
        repost: Option<Repost>,
    },
    Failed(ProviderError),
}

/// Resolves message text into artworks.
#[derive(Clone)]
pub struct Resolver {
    registry: ProviderRegistry,
    reposts: Arc<dyn RepostDetector>,
    limiter: Arc<Semaphore>,
    timeout: Duration,
}

impl Resolver {
    /// Creates a new Resolver.
    ///
    /// # Arguments
    /// - `registry` - Providers in priority order
    /// - `reposts` - Repost detector shared by every resolution
    /// - `concurrency` - Maximum number of fetches in flight across all resolutions
    /// - `timeout` - Deadline for one resolution
    pub fn new(
        registry: ProviderRegistry,
        reposts: Arc<dyn RepostDetector>,
        concurrency: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            reposts,
            limiter: Arc::new(Semaphore::new(concurrency.max(1))),
            timeout,
        }
    }

    /// Matches URLs in text to provider-qualified artwork keys.
    ///
    /// Keys are returned once each, in order of first appearance, together with the URL
    /// they were first seen in.
    pub fn match_text(&self, text: &str) -> Vec<(ArtworkKey, String)> {
        let mut seen = HashSet::new();

        extract_urls(text)
            .into_iter()
            .filter_map(|url| self.registry.match_url(&url).map(|key| (key, url)))
            .filter(|(key, _)| seen.insert(key.clone()))
            .collect()
    }

    /// Resolves every artwork linked in the request's text.
    ///
    /// # Arguments
    /// - `request` - Text, destination and policies of this resolution
    ///
    /// # Returns
    /// - `Ok(Resolution)` - Artworks, reposts and match count
    /// - `Err(AppError::ProviderErr)` - A fetch failed under `FailurePolicy::FailFast`
    /// - `Err(AppError::Timeout)` - The resolution exceeded its deadline; in-flight fetches
    ///   are dropped
    /// - `Err(AppError)` - Repost detector failure
    pub async fn resolve(&self, request: ResolveRequest<'_>) -> Result<Resolution, AppError> {
        tokio::time::timeout(self.timeout, self.resolve_inner(request))
            .await
            .map_err(|_| AppError::Timeout("Artwork resolution".to_string()))?
    }

    async fn resolve_inner(&self, request: ResolveRequest<'_>) -> Result<Resolution, AppError> {
        let matches = self.match_text(request.text);
        let matched = matches.len();

        let tasks = matches
            .into_iter()
            .map(|(key, url)| self.resolve_key(&request, key, url));

        let outcomes = match request.policy {
            FailurePolicy::FailFast => try_join_all(tasks).await?,
            FailurePolicy::BestEffort => join_all(tasks.map(|task| async move {
                match task.await {
                    Ok(outcome) => outcome,
                    Err(AppError::ProviderErr(e)) => Outcome::Failed(e),
                    Err(e) => {
                        tracing::warn!("Skipping artwork after repost detector failure: {}", e);
                        Outcome::Skipped
                    }
                }
            }))
            .await,
        };

        let mut resolution = Resolution {
            matched,
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                Outcome::Skipped => {}
                Outcome::Repost(repost) => resolution.reposts.push(repost),
                Outcome::Fetched { artwork, repost } => {
                    if let Some(repost) = repost {
                        resolution.reposts.push(repost);
                    }
                    resolution.artworks.push(artwork);
                }
                Outcome::Failed(e) => {
                    tracing::warn!("Skipping artwork that failed to resolve: {}", e);
                    resolution.failures.push(e);
                }
            }
        }

        Ok(resolution)
    }

    async fn resolve_key(
        &self,
        request: &ResolveRequest<'_>,
        key: ArtworkKey,
        url: String,
    ) -> Result<Outcome, AppError> {
        let guild = request.guild;
        let crosspost = request.mode == ResolveMode::Crosspost;

        if key.kind.always_nsfw() && !guild.nsfw {
            tracing::debug!(
                "Skipping NSFW-only artwork {} in SFW guild {}",
                key,
                guild.guild_id
            );
            return Ok(Outcome::Skipped);
        }

        let enabled = guild.providers.enabled(key.kind)
            || (crosspost && key.kind == ProviderKind::Twitter);
        if !enabled {
            tracing::debug!(
                "Skipping {}, provider disabled in guild {}",
                key,
                guild.guild_id
            );
            return Ok(Outcome::Skipped);
        }

        let mut repost = None;
        let mut record = None;
        if guild.repost != RepostMode::Disabled {
            let artwork_id = key.to_string();

            match self.reposts.find(request.channel_id, &artwork_id).await? {
                Some(found) => {
                    if guild.repost == RepostMode::Strict || crosspost {
                        return Ok(Outcome::Repost(found));
                    }
                    repost = Some(found);
                }
                None if !crosspost => {
                    record = Some(CreateRepostParam {
                        artwork_id,
                        url,
                        guild_id: guild.guild_id,
                        channel_id: request.channel_id,
                        message_id: request.message_id,
                    });
                }
                None => {}
            }
        }

        let artwork = {
            let _permit = self
                .limiter
                .acquire()
                .await
                .map_err(|_| InternalError::FetchLimiterClosed)?;

            self.registry.find(&key).await?
        };

        // Dropped artworks are neither flagged nor recorded as posted.
        if artwork.nsfw && !guild.nsfw {
            tracing::debug!(
                "Dropping NSFW artwork {} in SFW guild {}",
                key,
                guild.guild_id
            );
            return Ok(Outcome::Skipped);
        }

        if let Some(record) = record {
            self.reposts
                .create(record, guild.repost_expiration)
                .await?;
        }

        Ok(Outcome::Fetched { artwork, repost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::artwork::tests::pixiv_artwork,
        provider::Provider,
        service::{post::test_support::FakeProvider, repost::memory::MemoryRepostDetector},
    };
    use chrono::TimeDelta;

    fn resolver(providers: Vec<Arc<dyn Provider>>) -> (Resolver, Arc<MemoryRepostDetector>) {
        let detector = Arc::new(MemoryRepostDetector::new());
        let resolver = Resolver::new(
            ProviderRegistry::new(providers),
            detector.clone(),
            DEFAULT_FETCH_CONCURRENCY,
            Duration::from_secs(5),
        );
        (resolver, detector)
    }

    fn request<'a>(text: &'a str, guild: &'a GuildSettings) -> ResolveRequest<'a> {
        ResolveRequest {
            text,
            guild,
            channel_id: 10,
            message_id: 20,
            mode: ResolveMode::Original,
            policy: FailurePolicy::FailFast,
        }
    }

    #[tokio::test]
    async fn preserves_source_order_regardless_of_completion() {
        let provider = FakeProvider::pixiv()
            .with_delay("1", Duration::from_millis(50))
            .with_artwork(pixiv_artwork("1", 1))
            .with_artwork(pixiv_artwork("2", 1));
        let (resolver, _) = resolver(vec![Arc::new(provider)]);
        let guild = GuildSettings::default_for(1);

        let resolution = resolver
            .resolve(request(
                "https://www.pixiv.net/artworks/1 some words https://www.pixiv.net/artworks/2",
                &guild,
            ))
            .await
            .unwrap();

        let ids: Vec<_> = resolution.artworks.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn duplicate_urls_are_fetched_once() {
        let provider = Arc::new(FakeProvider::pixiv().with_artwork(pixiv_artwork("1", 1)));
        let (resolver, _) = resolver(vec![provider.clone()]);
        let guild = GuildSettings::default_for(1);

        let resolution = resolver
            .resolve(request(
                "https://www.pixiv.net/artworks/1 https://www.pixiv.net/en/artworks/1",
                &guild,
            ))
            .await
            .unwrap();

        assert_eq!(resolution.matched, 1);
        assert_eq!(resolution.artworks.len(), 1);
        assert_eq!(provider.calls("1"), 1);
    }

    #[tokio::test]
    async fn unmatched_urls_are_ignored() {
        let (resolver, _) = resolver(vec![Arc::new(FakeProvider::pixiv())]);
        let guild = GuildSettings::default_for(1);

        let resolution = resolver
            .resolve(request("https://google.com/search?q=art", &guild))
            .await
            .unwrap();

        assert_eq!(resolution.matched, 0);
        assert!(!resolution.all_reposts());
    }

    #[tokio::test]
    async fn first_post_records_repost_and_second_is_flagged() {
        let (resolver, detector) = resolver(vec![Arc::new(
            FakeProvider::pixiv().with_artwork(pixiv_artwork("1", 1)),
        )]);
        let guild = GuildSettings::default_for(1);
        let text = "https://www.pixiv.net/artworks/1";

        let first = resolver.resolve(request(text, &guild)).await.unwrap();
        assert!(first.reposts.is_empty());
        assert!(detector.find(10, "pixiv:1").await.unwrap().is_some());

        let second = resolver.resolve(request(text, &guild)).await.unwrap();
        assert_eq!(second.reposts.len(), 1);
        assert_eq!(second.reposts[0].message_id, 20);
        // Enabled mode still sends the artwork.
        assert_eq!(second.artworks.len(), 1);
        assert!(second.all_reposts());
    }

    #[tokio::test]
    async fn strict_mode_skips_fetching_reposts() {
        let provider = Arc::new(FakeProvider::pixiv().with_artwork(pixiv_artwork("1", 1)));
        let (resolver, detector) = resolver(vec![provider.clone()]);
        let guild = GuildSettings {
            repost: RepostMode::Strict,
            ..GuildSettings::default_for(1)
        };
        detector
            .create(
                CreateRepostParam {
                    artwork_id: "pixiv:1".to_string(),
                    url: "https://www.pixiv.net/artworks/1".to_string(),
                    guild_id: 1,
                    channel_id: 10,
                    message_id: 5,
                },
                TimeDelta::hours(1),
            )
            .await
            .unwrap();

        let resolution = resolver
            .resolve(request("https://www.pixiv.net/artworks/1", &guild))
            .await
            .unwrap();

        assert!(resolution.artworks.is_empty());
        assert_eq!(resolution.reposts.len(), 1);
        assert!(resolution.all_reposts());
        assert_eq!(provider.calls("1"), 0);
    }

    #[tokio::test]
    async fn disabled_repost_mode_writes_nothing() {
        let (resolver, detector) = resolver(vec![Arc::new(
            FakeProvider::pixiv().with_artwork(pixiv_artwork("1", 1)),
        )]);
        let guild = GuildSettings {
            repost: RepostMode::Disabled,
            ..GuildSettings::default_for(1)
        };

        resolver
            .resolve(request("https://www.pixiv.net/artworks/1", &guild))
            .await
            .unwrap();

        assert!(detector.find(10, "pixiv:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn crosspost_mode_neither_fetches_nor_records_reposts() {
        let provider = Arc::new(FakeProvider::pixiv().with_artwork(pixiv_artwork("1", 1)));
        let (resolver, detector) = resolver(vec![provider.clone()]);
        let guild = GuildSettings::default_for(1);
        let mut req = request("https://www.pixiv.net/artworks/1", &guild);
        req.mode = ResolveMode::Crosspost;

        let first = resolver.resolve(req.clone()).await.unwrap();
        assert_eq!(first.artworks.len(), 1);
        assert!(detector.find(10, "pixiv:1").await.unwrap().is_none());

        detector
            .create(
                CreateRepostParam {
                    artwork_id: "pixiv:1".to_string(),
                    url: String::new(),
                    guild_id: 1,
                    channel_id: 10,
                    message_id: 5,
                },
                TimeDelta::hours(1),
            )
            .await
            .unwrap();

        let second = resolver.resolve(req).await.unwrap();
        assert!(second.artworks.is_empty());
        assert_eq!(provider.calls("1"), 1);
    }

    #[tokio::test]
    async fn one_failure_fails_the_whole_resolution() {
        let provider = FakeProvider::pixiv()
            .with_artwork(pixiv_artwork("1", 1))
            .with_error("2", ProviderError::Transient {
                kind: ProviderKind::Pixiv,
                reason: "boom".to_string(),
            });
        let (resolver, _) = resolver(vec![Arc::new(provider)]);
        let guild = GuildSettings::default_for(1);

        let result = resolver
            .resolve(request(
                "https://www.pixiv.net/artworks/1 https://www.pixiv.net/artworks/2",
                &guild,
            ))
            .await;

        assert!(matches!(
            result,
            Err(AppError::ProviderErr(ProviderError::Transient { .. }))
        ));
    }

    #[tokio::test]
    async fn best_effort_keeps_successful_artworks() {
        let provider = FakeProvider::pixiv()
            .with_artwork(pixiv_artwork("1", 1))
            .with_error("2", ProviderError::NotFound {
                kind: ProviderKind::Pixiv,
                id: "2".to_string(),
            });
        let (resolver, _) = resolver(vec![Arc::new(provider)]);
        let guild = GuildSettings::default_for(1);
        let mut req = request(
            "https://www.pixiv.net/artworks/2 https://www.pixiv.net/artworks/1",
            &guild,
        );
        req.policy = FailurePolicy::BestEffort;

        let resolution = resolver.resolve(req).await.unwrap();

        assert_eq!(resolution.artworks.len(), 1);
        assert_eq!(resolution.failures.len(), 1);
    }

    #[tokio::test]
    async fn disabled_provider_is_matched_but_not_fetched() {
        let provider = Arc::new(FakeProvider::pixiv().with_artwork(pixiv_artwork("1", 1)));
        let (resolver, _) = resolver(vec![provider.clone()]);
        let mut guild = GuildSettings::default_for(1);
        guild.providers.pixiv = false;

        let resolution = resolver
            .resolve(request("https://www.pixiv.net/artworks/1", &guild))
            .await
            .unwrap();

        assert_eq!(resolution.matched, 1);
        assert!(resolution.artworks.is_empty());
        assert_eq!(provider.calls("1"), 0);
    }

    #[tokio::test]
    async fn twitter_is_fetched_for_crossposts_even_when_disabled() {
        let provider = Arc::new(
            FakeProvider::new(ProviderKind::Twitter).with_artwork(pixiv_artwork("7", 1)),
        );
        let (resolver, _) = resolver(vec![provider.clone()]);
        let mut guild = GuildSettings::default_for(1);
        guild.providers.twitter = false;
        let mut req = request("https://twitter.com/a/status/7", &guild);
        req.mode = ResolveMode::Crosspost;

        let resolution = resolver.resolve(req).await.unwrap();

        assert_eq!(resolution.artworks.len(), 1);
        assert_eq!(provider.calls("7"), 1);
    }

    #[tokio::test]
    async fn sfw_guild_drops_nsfw_artworks_and_nsfw_providers() {
        let mut nsfw = pixiv_artwork("1", 1);
        nsfw.nsfw = true;
        let pixiv = Arc::new(
            FakeProvider::pixiv()
                .with_artwork(nsfw)
                .with_artwork(pixiv_artwork("2", 1)),
        );
        let nhentai = Arc::new(FakeProvider::new(ProviderKind::Nhentai));
        let (resolver, detector) = resolver(vec![pixiv.clone(), nhentai.clone()]);
        let guild = GuildSettings {
            nsfw: false,
            ..GuildSettings::default_for(1)
        };

        let resolution = resolver
            .resolve(request(
                "https://www.pixiv.net/artworks/1 https://nhentai.net/g/3/ https://www.pixiv.net/artworks/2",
                &guild,
            ))
            .await
            .unwrap();

        let ids: Vec<_> = resolution.artworks.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(nhentai.calls("3"), 0);
        assert!(detector.find(10, "nhentai:3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dropped_nsfw_artwork_is_never_a_repost() {
        let mut nsfw = pixiv_artwork("1", 1);
        nsfw.nsfw = true;
        let (resolver, detector) =
            resolver(vec![Arc::new(FakeProvider::pixiv().with_artwork(nsfw))]);
        let guild = GuildSettings {
            nsfw: false,
            repost: RepostMode::Strict,
            ..GuildSettings::default_for(1)
        };
        let text = "https://www.pixiv.net/artworks/1";

        let first = resolver.resolve(request(text, &guild)).await.unwrap();
        assert!(first.artworks.is_empty());
        assert!(detector.find(10, "pixiv:1").await.unwrap().is_none());

        let second = resolver.resolve(request(text, &guild)).await.unwrap();
        assert!(second.artworks.is_empty());
        assert!(second.reposts.is_empty());
        assert_eq!(second.matched, 1);
        assert!(!second.all_reposts());
    }

    #[tokio::test]
    async fn slow_resolution_times_out() {
        let provider = FakeProvider::pixiv()
            .with_delay("1", Duration::from_secs(10))
            .with_artwork(pixiv_artwork("1", 1));
        let resolver = Resolver::new(
            ProviderRegistry::new(vec![Arc::new(provider)]),
            Arc::new(MemoryRepostDetector::new()),
            DEFAULT_FETCH_CONCURRENCY,
            Duration::from_millis(20),
        );
        let guild = GuildSettings::default_for(1);

        let result = resolver
            .resolve(request("https://www.pixiv.net/artworks/1", &guild))
            .await;

        assert!(matches!(result, Err(AppError::Timeout(_))));
    }
}
