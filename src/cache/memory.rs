//! In-memory cache backend. Intended for local development and tests; a real
//! deployment swaps in a networked backend behind the same [`CacheBackend`]
//! trait (spec.md §6, "the key-value backend itself" is explicitly out of
//! scope for the core).

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use tokio::sync::Mutex as AsyncMutex;
use tokio::time::timeout as tokio_timeout;

use crate::error::Result;

use super::backend::{CacheBackend, DistributedMutex};

struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() < at,
            None => true,
        }
    }
}

/// A process-local cache backend backed by a `HashMap` guarded by a std
/// mutex for data, plus one `tokio::sync::Mutex` per distinct lock name for
/// the distributed-mutex contract.
#[derive(Default)]
pub struct MemoryBackend {
    data: StdMutex<HashMap<String, Entry>>,
    locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, name: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().expect("memory backend lock poisoned");
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

impl CacheBackend for MemoryBackend {
    type Mutex = MemoryMutex;

    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut data = self.data.lock().expect("memory backend lock poisoned");
        match data.get(key) {
            Some(entry) if entry.is_live() => Ok(Some(entry.value.clone())),
            Some(_) => {
                data.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_bytes(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut data = self.data.lock().expect("memory backend lock poisoned");
        data.insert(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                expires_at: ttl.map(|d| Instant::now() + d),
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get_bytes(key).await?.is_some())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut data = self.data.lock().expect("memory backend lock poisoned");
        data.remove(key);
        Ok(())
    }

    fn new_mutex(&self, name: &str) -> MemoryMutex {
        MemoryMutex {
            inner: self.lock_for(name),
            guard: StdMutex::new(None),
        }
    }
}

/// A handle to one named lock inside a [`MemoryBackend`].
pub struct MemoryMutex {
    inner: Arc<AsyncMutex<()>>,
    guard: StdMutex<Option<tokio::sync::OwnedMutexGuard<()>>>,
}

impl DistributedMutex for MemoryMutex {
    async fn lock(&self, timeout: Duration) -> Result<bool> {
        match tokio_timeout(timeout, self.inner.clone().lock_owned()).await {
            Ok(guard) => {
                *self.guard.lock().expect("mutex guard slot poisoned") = Some(guard);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn unlock(&self) -> Result<()> {
        self.guard.lock().expect("mutex guard slot poisoned").take();
        Ok(())
    }
}
