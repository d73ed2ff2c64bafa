//! The cache contract (spec.md §6): a key/value byte store plus named
//! distributed mutexes. Only an in-memory implementation ships here (see
//! [`crate::cache::memory`]); a production deployment supplies its own (e.g.
//! Redis) behind the same trait.
//!
//! Static dispatch (`Engine<C: CacheBackend, ...>`) is used throughout rather
//! than `Arc<dyn CacheBackend>` so the trait can use `async fn` directly
//! without boxing every call.

use std::time::Duration;

use crate::error::Result;

/// Key/value byte cache with TTLs and named distributed mutexes.
pub trait CacheBackend: Send + Sync + 'static {
    type Mutex: DistributedMutex;

    /// Returns the stored bytes for `key`, or `None` if absent or expired.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`. `ttl = None` means no expiry.
    async fn set_bytes(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Reports whether `key` is present (and unexpired).
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Removes `key`, if present. A delete of an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Builds a handle to the named distributed mutex. Creating a handle is
    /// cheap and does not itself acquire anything.
    fn new_mutex(&self, name: &str) -> Self::Mutex;
}

/// A cooperative, cross-process exclusion primitive keyed by name.
///
/// Per spec.md §9, a distributed mutex is a best-effort coalescing hint, not
/// a correctness mechanism: callers must treat a failed or timed-out
/// acquisition as "proceed without the lock", never as a fatal error.
pub trait DistributedMutex: Send + Sync {
    /// Attempts to acquire the lock within `timeout`. Returns `Ok(true)` if
    /// acquired, `Ok(false)` on timeout (backend reachable but contended),
    /// and `Err` only for a hard backend failure.
    async fn lock(&self, timeout: Duration) -> Result<bool>;

    /// Releases the lock. Safe to call even if `lock` was never called or
    /// did not succeed.
    async fn unlock(&self) -> Result<()>;
}

/// The default acquisition timeout for every distributed-mutex and
/// cache operation (spec.md §5, "approximately 5 seconds").
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);
