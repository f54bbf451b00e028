//! Art site providers.
//!
//! Every supported site implements `Provider`: a pure URL matcher plus a network lookup
//! that turns a site id into an `Artwork`. `ProviderRegistry` holds one provider per site
//! in a fixed priority order so the same URL always resolves to the same provider.

pub mod bluesky;
pub mod cache;
pub mod deviantart;
pub mod http;
pub mod nhentai;
pub mod pixiv;
pub mod twitter;

use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

use crate::{
    error::provider::ProviderError,
    model::artwork::{Artwork, ArtworkKey, ProviderKind},
};

/// Adapter for one art-sharing site.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Site handled by this provider.
    fn kind(&self) -> ProviderKind;

    /// Extracts the canonical artwork id from a URL.
    ///
    /// Pure and deterministic. Returns `None` for any URL outside the provider's domains.
    fn matches(&self, url: &str) -> Option<String>;

    /// Fetches the artwork with the given canonical id.
    ///
    /// # Returns
    /// - `Ok(Artwork)` - Artwork with at least one image
    /// - `Err(ProviderError::NotFound)` - Site reports no such artwork, or it has no images
    /// - `Err(ProviderError::RateLimited)` - Site is throttling requests
    /// - `Err(ProviderError::Transient)` - Network, server or decoding failure
    async fn find(&self, id: &str) -> Result<Artwork, ProviderError>;
}

/// Settings shared by the built-in providers.
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// Host replacing `i.pximg.net` in Pixiv image URLs, which refuses hotlinking.
    pub pixiv_proxy: String,
    /// Lifetime of cached lookups for providers that cache.
    pub cache_ttl: Duration,
}

/// Providers in matching priority order.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Creates a registry, ordering providers by their site's priority.
    ///
    /// # Arguments
    /// - `providers` - One provider per site, in any order
    pub fn new(mut providers: Vec<Arc<dyn Provider>>) -> Self {
        providers.sort_by_key(|provider| provider.kind());
        Self { providers }
    }

    /// Builds the registry with every built-in provider sharing one HTTP client.
    pub fn standard(client: reqwest::Client, options: &ProviderOptions) -> Self {
        Self::new(vec![
            Arc::new(pixiv::PixivProvider::new(
                client.clone(),
                options.pixiv_proxy.clone(),
                options.cache_ttl,
            )),
            Arc::new(twitter::TwitterProvider::new(client.clone(), options.cache_ttl)),
            Arc::new(deviantart::DeviantArtProvider::new(client.clone())),
            Arc::new(bluesky::BlueskyProvider::new(client.clone())),
            Arc::new(nhentai::NhentaiProvider::new(client)),
        ])
    }

    /// Finds the first provider recognising the URL.
    ///
    /// # Arguments
    /// - `url` - A single URL extracted from a message
    ///
    /// # Returns
    /// - `Some(ArtworkKey)` - Provider-qualified id of the artwork
    /// - `None` - No provider recognises the URL
    pub fn match_url(&self, url: &str) -> Option<ArtworkKey> {
        self.providers.iter().find_map(|provider| {
            provider
                .matches(url)
                .map(|id| ArtworkKey::new(provider.kind(), id))
        })
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn Provider>> {
        self.providers.iter().find(|provider| provider.kind() == kind)
    }

    /// Fetches an artwork through the provider owning the key.
    ///
    /// # Returns
    /// - `Ok(Artwork)` - Resolved artwork
    /// - `Err(ProviderError::NotFound)` - No provider registered for the key's site
    /// - `Err(ProviderError)` - Provider lookup failed
    pub async fn find(&self, key: &ArtworkKey) -> Result<Artwork, ProviderError> {
        let provider = self.get(key.kind).ok_or_else(|| ProviderError::NotFound {
            kind: key.kind,
            id: key.id.clone(),
        })?;

        provider.find(&key.id).await
    }
}

/// Parses a URL and returns it only when its host is one of `hosts`.
///
/// Hosts are compared case-insensitively; the `url` crate lowercases them on parse.
pub(crate) fn parse_with_host(url: &str, hosts: &[&str]) -> Option<url::Url> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;

    hosts.contains(&host).then_some(parsed)
}
