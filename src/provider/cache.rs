//! Short-lived memoisation of provider lookups.

use moka::future::Cache;
use std::{future::Future, time::Duration};

use crate::{error::provider::ProviderError, model::artwork::Artwork};

const MAX_ENTRIES: u64 = 1_000;

/// TTL cache of resolved artworks keyed by provider-native id.
///
/// Only successful lookups are stored; failures are returned to every caller waiting on
/// the same id and then forgotten.
#[derive(Clone)]
pub struct ArtworkCache {
    inner: Cache<String, Artwork>,
}

impl ArtworkCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Returns the cached artwork for `id` or runs `fetch` and caches its success.
    ///
    /// Concurrent calls for the same id share a single `fetch`.
    pub async fn get_or_fetch<F>(&self, id: &str, fetch: F) -> Result<Artwork, ProviderError>
    where
        F: Future<Output = Result<Artwork, ProviderError>>,
    {
        self.inner
            .try_get_with(id.to_string(), fetch)
            .await
            .map_err(|e| (*e).clone())
    }
}
