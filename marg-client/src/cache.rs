//! Caching layer for the auxiliary stops endpoint.
//!
//! The stop list is large and changes only when the service reloads its
//! network, so it is fetched once and kept for a TTL. Route searches are
//! never cached: each one depends on the departure time.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::domain::Stop;

/// Cached stop list.
type StopsEntry = Arc<Vec<Stop>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached stop list.
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

/// API client with a cached stop list.
///
/// Failed fetches are not cached, so the next request retries upstream.
pub struct CachedStops {
    client: ApiClient,
    stops: MokaCache<(), StopsEntry>,
}

impl CachedStops {
    /// Create a new cached client.
    pub fn new(client: ApiClient, config: &CacheConfig) -> Self {
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { client, stops }
    }

    /// Get the stop list, using the cache if available.
    pub async fn stops(&self) -> Result<StopsEntry, ApiError> {
        if let Some(cached) = self.stops.get(&()).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.fetch_stops().await?);
        debug!(count = entry.len(), "caching stop list");
        self.stops.insert((), entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Drop the cached stop list.
    pub fn invalidate(&self) {
        self.stops.invalidate_all();
    }
}
