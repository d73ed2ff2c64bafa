//! The render cache (spec.md §4.6): fingerprinted lookup, single-flight
//! build coalescing, and TTL-governed storage in front of the view
//! renderers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::error::Result;

use super::backend::{CacheBackend, DistributedMutex, DEFAULT_OPERATION_TIMEOUT};

/// Wraps a [`CacheBackend`] with the fingerprint/single-flight/TTL policy
/// every render goes through.
pub struct RenderCache<C: CacheBackend> {
    backend: Arc<C>,
    render_ttl: Option<Duration>,
    enable_locks: bool,
}

impl<C: CacheBackend> RenderCache<C> {
    pub fn new(backend: Arc<C>, render_ttl: Option<Duration>, enable_locks: bool) -> Self {
        Self {
            backend,
            render_ttl,
            enable_locks,
        }
    }

    /// Looks up `key`; on miss, acquires the per-key render lock (if
    /// enabled), re-checks the cache, and otherwise calls `build` exactly
    /// once. Returns the bytes and whether they came from the cache.
    ///
    /// When `render_ttl` is absent, caching is disabled end to end
    /// (spec.md §4.6): every call runs `build` and nothing is stored.
    pub async fn get_or_build<F, Fut>(&self, key: &str, build: F) -> Result<(Vec<u8>, bool)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>>>,
    {
        let Some(render_ttl) = self.render_ttl else {
            return Ok((build().await?, false));
        };

        if let Some(bytes) = self.cached_read(key).await {
            return Ok((bytes, true));
        }

        let mutex = if self.enable_locks {
            Some(self.backend.new_mutex(&lock_name(key)))
        } else {
            None
        };

        if let Some(mutex) = &mutex {
            match mutex.lock(DEFAULT_OPERATION_TIMEOUT).await {
                Ok(true) => {
                    if let Some(bytes) = self.cached_read(key).await {
                        let _ = mutex.unlock().await;
                        return Ok((bytes, true));
                    }
                }
                Ok(false) => warn!("render lock {key} timed out, rendering without coalescing"),
                Err(err) => warn!("render lock {key} backend error: {err}, rendering without coalescing"),
            }
        }

        let bytes = build().await?;

        if let Err(err) = self.backend.set_bytes(key, &bytes, Some(render_ttl)).await {
            warn!("render cache write for {key} failed: {err}, serving uncached bytes");
        }

        if let Some(mutex) = &mutex {
            let _ = mutex.unlock().await;
        }

        Ok((bytes, false))
    }

    async fn cached_read(&self, key: &str) -> Option<Vec<u8>> {
        match self.backend.get_bytes(key).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!("render cache read for {key} failed: {err}, proceeding without cache");
                None
            }
        }
    }
}

fn lock_name(fingerprint_key: &str) -> String {
    match fingerprint_key.strip_prefix("result:") {
        Some(digest) => format!("render-lock:{digest}"),
        None => format!("render-lock:{fingerprint_key}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::memory::MemoryBackend;

    #[tokio::test]
    async fn cache_miss_then_hit() {
        let cache = RenderCache::new(Arc::new(MemoryBackend::new()), Some(Duration::from_secs(60)), true);
        let builds = AtomicUsize::new(0);

        let (bytes, hit) = cache
            .get_or_build("result:abc", || async {
                builds.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2, 3])
            })
            .await
            .unwrap();
        assert!(!hit);
        assert_eq!(bytes, vec![1, 2, 3]);

        let (bytes, hit) = cache
            .get_or_build("result:abc", || async {
                builds.fetch_add(1, Ordering::SeqCst);
                Ok(vec![9, 9, 9])
            })
            .await
            .unwrap();
        assert!(hit);
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_ttl_never_caches() {
        let cache = RenderCache::new(Arc::new(MemoryBackend::new()), None, true);
        let builds = AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .get_or_build("result:abc", || async {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1])
                })
                .await
                .unwrap();
        }
        assert_eq!(builds.load(Ordering::SeqCst), 3);
    }
}
