//! Cache backend contract, in-memory implementation, fingerprinting, and the
//! render cache built on top of them.

mod backend;
mod fingerprint;
mod memory;
mod render_cache;

pub use backend::{CacheBackend, DistributedMutex, DEFAULT_OPERATION_TIMEOUT};
pub use fingerprint::render_cache_key;
pub use memory::MemoryBackend;
pub use render_cache::RenderCache;
