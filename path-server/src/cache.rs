//! Caching layer for the arrivals feed.
//!
//! The feed is a single document covering every station, so the cache holds
//! one entry with a short TTL. Concurrent misses share one fetch. When a
//! refresh fails the last good snapshot is served instead; its age shows up
//! through `freshness` so callers can flag it.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::RwLock;
use tracing::warn;

use crate::arrivals::{ArrivalsClient, ArrivalsError, ArrivalsSource};
use crate::domain::ArrivalsFeed;

/// Key for the single cached feed document.
const FEED_KEY: &str = "ridepath";

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached feed.
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
        }
    }
}

/// Arrivals source with caching and last-known-good fallback.
pub struct CachedArrivalsClient<S = ArrivalsClient> {
    source: S,
    cache: MokaCache<&'static str, Arc<ArrivalsFeed>>,
    last_good: RwLock<Option<Arc<ArrivalsFeed>>>,
}

impl<S: ArrivalsSource> CachedArrivalsClient<S> {
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self {
            source,
            cache,
            last_good: RwLock::new(None),
        }
    }

    /// Get the feed, from cache if fresh enough.
    pub async fn get(&self) -> Result<Arc<ArrivalsFeed>, ArrivalsError> {
        let result = self
            .cache
            .try_get_with(FEED_KEY, async {
                let feed = Arc::new(self.source.fetch().await?);
                *self.last_good.write().await = Some(feed.clone());
                Ok::<_, ArrivalsError>(feed)
            })
            .await;

        match result {
            Ok(feed) => Ok(feed),
            Err(e) => self.fall_back((*e).clone()).await,
        }
    }

    /// Fetch a new snapshot regardless of the cache, and cache it.
    pub async fn refresh(&self) -> Result<Arc<ArrivalsFeed>, ArrivalsError> {
        match self.source.fetch().await {
            Ok(feed) => {
                let feed = Arc::new(feed);
                self.cache.insert(FEED_KEY, feed.clone()).await;
                *self.last_good.write().await = Some(feed.clone());
                Ok(feed)
            }
            Err(e) => self.fall_back(e).await,
        }
    }

    /// Serve the last good snapshot, or the error if there is none.
    async fn fall_back(&self, error: ArrivalsError) -> Result<Arc<ArrivalsFeed>, ArrivalsError> {
        match self.last_good.read().await.clone() {
            Some(feed) => {
                warn!(error = %error, fetched_at = %feed.fetched_at, "serving last good arrivals");
                Ok(feed)
            }
            None => Err(error),
        }
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Invalidate the cached feed. The last good snapshot is kept.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(
            config.with_ttl(Duration::from_secs(5)).ttl,
            Duration::from_secs(5)
        );
    }

    #[tokio::test]
    async fn get_uses_cache() {
        let client = CachedArrivalsClient::new(
            ScriptedSource::new(vec![Ok(feed("first")), Ok(feed("second"))]),
            &CacheConfig::default(),
        );

        assert_eq!(client.get().await.unwrap().source, "first");
        assert_eq!(client.get().await.unwrap().source, "first");
        assert_eq!(client.source().calls(), 1);
    }

    #[tokio::test]
    async fn refresh_bypasses_cache() {
        let client = CachedArrivalsClient::new(
            ScriptedSource::new(vec![Ok(feed("first")), Ok(feed("second"))]),
            &CacheConfig::default(),
        );

        client.get().await.unwrap();
        assert_eq!(client.refresh().await.unwrap().source, "second");
        assert_eq!(client.get().await.unwrap().source, "second");
        assert_eq!(client.source().calls(), 2);
    }

    #[tokio::test]
    async fn failure_without_history_is_an_error() {
        let client =
            CachedArrivalsClient::new(ScriptedSource::new(vec![Err(down())]), &CacheConfig::default());

        assert_eq!(client.get().await, Err(down()));
    }

    #[tokio::test]
    async fn failure_serves_last_good() {
        let client = CachedArrivalsClient::new(
            ScriptedSource::new(vec![Ok(feed("good")), Err(down()), Err(down())]),
            &CacheConfig::default(),
        );

        client.get().await.unwrap();

        assert_eq!(client.refresh().await.unwrap().source, "good");

        client.invalidate();
        assert_eq!(client.get().await.unwrap().source, "good");
        assert_eq!(client.source().calls(), 3);
    }
}
