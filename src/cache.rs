// ABOUTME: Session-scoped memoization for activity list and stream fetches
// ABOUTME: Once-filled activity report plus an LRU-bounded stream cache
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::fetcher::FetchReport;
use crate::models::{ActivityId, StreamKey, StreamSet};

/// Default bound on cached stream sets
const DEFAULT_STREAM_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => unreachable!(),
};

/// Key for one cached stream fetch: activity id plus the requested streams
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StreamCacheKey {
    id: ActivityId,
    keys: Vec<StreamKey>,
}

impl StreamCacheKey {
    fn new(id: ActivityId, keys: &[StreamKey]) -> Self {
        let mut keys = keys.to_vec();
        keys.sort_unstable();
        Self { id, keys }
    }
}

/// In-memory caches for one dashboard session
///
/// The activity list is fetched once per session and held until invalidated,
/// and stream sets are kept in a bounded LRU keyed by (activity id, requested
/// streams) so repeated selection of the same activity does not refetch.
/// Execution is effectively single-threaded, but the locks make the type
/// safely shareable the same way the rest of the session state is.
pub struct SessionCache {
    activities: RwLock<Option<Arc<FetchReport>>>,
    streams: Mutex<LruCache<StreamCacheKey, StreamSet>>,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(DEFAULT_STREAM_CAPACITY.get())
    }
}

impl SessionCache {
    /// Create caches with the given stream-cache capacity
    #[must_use]
    pub fn new(stream_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(stream_capacity).unwrap_or(DEFAULT_STREAM_CAPACITY);
        Self {
            activities: RwLock::new(None),
            streams: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Get the session's activity report, fetching it on first access
    pub async fn activities_or_fetch<F, Fut>(&self, fetch: F) -> Arc<FetchReport>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = FetchReport>,
    {
        if let Some(report) = self.activities.read().await.as_ref() {
            debug!("Activity list served from session cache");
            return Arc::clone(report);
        }

        let report = Arc::new(fetch().await);
        *self.activities.write().await = Some(Arc::clone(&report));
        report
    }

    /// Get one activity's streams, fetching on miss
    pub async fn stream_or_fetch<F, Fut>(
        &self,
        id: ActivityId,
        keys: &[StreamKey],
        fetch: F,
    ) -> StreamSet
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = StreamSet>,
    {
        let key = StreamCacheKey::new(id, keys);

        if let Some(stream) = self.streams.lock().await.get(&key) {
            debug!("Streams for activity {id} served from session cache");
            return stream.clone();
        }

        let stream = fetch().await;
        self.streams.lock().await.put(key, stream.clone());
        stream
    }

    /// Drop all cached state, forcing a refetch on next access
    pub async fn invalidate(&self) {
        *self.activities.write().await = None;
        self.streams.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn activity_fetch_runs_once() {
        let cache = SessionCache::default();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .activities_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    FetchReport::default()
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stream_cache_keyed_by_id_and_keys() {
        let cache = SessionCache::default();
        let calls = AtomicUsize::new(0);
        let keys = [StreamKey::Distance, StreamKey::VelocitySmooth];

        for _ in 0..2 {
            cache
                .stream_or_fetch(7, &keys, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    StreamSet::default()
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Key order must not matter
        let reordered = [StreamKey::VelocitySmooth, StreamKey::Distance];
        cache
            .stream_or_fetch(7, &reordered, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                StreamSet::default()
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate().await;
        cache
            .stream_or_fetch(7, &keys, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                StreamSet::default()
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
