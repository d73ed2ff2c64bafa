//! The skin-fetch pipeline (spec.md §4.5): cache -> optional lock -> upstream
//! profile -> texture URL -> HTTP fetch -> normalize -> cache write.
//!
//! Grounded in `original_source/src/util/skin.go`'s `GetPlayerSkin`. Per
//! spec.md §7, this pipeline never fails on upstream unavailability: every
//! error path short-circuits to the deterministic default skin instead of
//! propagating.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::cache::{CacheBackend, DistributedMutex, DEFAULT_OPERATION_TIMEOUT};
use crate::identity::{decode_textures, IdentityClient};
use crate::image::{decode_skin, encode, Image, OutputFormat};
use crate::player::PlayerUuid;
use crate::skin::default_skin;

/// The result of a skin fetch: the canonical texture plus which arm model it
/// uses.
#[derive(Clone)]
pub struct FetchedSkin {
    pub image: Image,
    pub is_slim: bool,
}

/// Tunables for the pipeline; mirrors `original_source/src/conf/config.go`'s
/// skin-cache section.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub skin_ttl: Option<Duration>,
    pub enable_locks: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            skin_ttl: Some(Duration::from_secs(60 * 60 * 24)),
            enable_locks: true,
        }
    }
}

pub struct SkinFetchPipeline<C: CacheBackend, I: IdentityClient> {
    cache: Arc<C>,
    identity: Arc<I>,
    http: reqwest::Client,
    config: PipelineConfig,
}

impl<C: CacheBackend, I: IdentityClient> SkinFetchPipeline<C, I> {
    pub fn new(cache: Arc<C>, identity: Arc<I>, http: reqwest::Client, config: PipelineConfig) -> Self {
        Self {
            cache,
            identity,
            http,
            config,
        }
    }

    /// Fetches the skin for `uuid`, falling back to the embedded default
    /// skin whenever the cache or upstream is unavailable or the player has
    /// never set a custom skin.
    pub async fn fetch(&self, uuid: PlayerUuid) -> FetchedSkin {
        let lock = if self.config.enable_locks {
            let mutex = self.cache.new_mutex(&format!("skin-lock:{uuid}"));
            match mutex.lock(DEFAULT_OPERATION_TIMEOUT).await {
                Ok(true) => Some(mutex),
                Ok(false) => {
                    warn!("skin lock for {uuid} timed out, fetching without coalescing");
                    None
                }
                Err(err) => {
                    warn!("skin lock for {uuid} backend error: {err}, fetching without coalescing");
                    None
                }
            }
        } else {
            None
        };

        let result = self.fetch_locked(uuid).await;

        if let Some(mutex) = lock {
            let _ = mutex.unlock().await;
        }

        result
    }

    async fn fetch_locked(&self, uuid: PlayerUuid) -> FetchedSkin {
        if let Some(cached) = self.cache_read(uuid).await {
            return cached;
        }

        let default_is_slim = uuid.is_slim_by_default();

        let profile = match self.identity.profile_textures(&uuid).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                debug!("no profile for {uuid}, using default skin");
                return self.default_for(default_is_slim);
            }
            Err(err) => {
                warn!("profile lookup for {uuid} failed: {err}, using default skin");
                return self.default_for(default_is_slim);
            }
        };

        let Some(textures_value) = profile.textures_value() else {
            debug!("profile for {uuid} has no textures property, using default skin");
            return self.default_for(default_is_slim);
        };

        let decoded = match decode_textures(textures_value) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!("malformed textures payload for {uuid}: {err}, using default skin");
                return self.default_for(default_is_slim);
            }
        };

        let Some(skin_texture) = decoded.textures.skin else {
            debug!("profile for {uuid} has no SKIN texture, using default skin");
            return self.default_for(default_is_slim);
        };

        let is_slim = skin_texture.metadata.model == "slim";

        let image = match self.fetch_texture(&skin_texture.url).await {
            Ok(Some(image)) => image,
            Ok(None) => {
                debug!("skin texture for {uuid} returned 404, using default skin");
                return self.default_for(is_slim);
            }
            Err(err) => {
                warn!("skin texture fetch for {uuid} failed: {err}, using default skin");
                return self.default_for(is_slim);
            }
        };

        self.write_cache(uuid, &image, is_slim).await;

        FetchedSkin { image, is_slim }
    }

    async fn fetch_texture(&self, url: &str) -> crate::error::Result<Option<Image>> {
        let fut = self.http.get(url).send();
        let resp = match tokio::time::timeout(DEFAULT_OPERATION_TIMEOUT, fut).await {
            Ok(resp) => resp?,
            Err(_) => return Err(crate::error::EngineError::Timeout),
        };

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(crate::error::EngineError::Upstream(
                resp.error_for_status().unwrap_err(),
            ));
        }

        let bytes = resp.bytes().await?;
        match decode_skin(&bytes) {
            Ok(img) => Ok(Some(img)),
            Err(err) => Err(err),
        }
    }

    async fn cache_read(&self, uuid: PlayerUuid) -> Option<FetchedSkin> {
        let skin_key = format!("skin:{uuid}");
        let slim_key = format!("slim:{uuid}");

        let bytes = match self.timed(self.cache.get_bytes(&skin_key)).await {
            Some(Ok(Some(bytes))) => bytes,
            Some(Ok(None)) => return None,
            Some(Err(err)) => {
                warn!("skin cache read for {uuid} failed: {err}, fetching upstream");
                return None;
            }
            None => {
                warn!("skin cache read for {uuid} timed out, fetching upstream");
                return None;
            }
        };

        let image = match decode_skin(&bytes) {
            Ok(image) => image,
            Err(err) => {
                warn!("cached skin for {uuid} failed to decode: {err}, fetching upstream");
                return None;
            }
        };

        let is_slim = match self.timed(self.cache.exists(&slim_key)).await {
            Some(Ok(exists)) => exists,
            _ => false,
        };

        debug!("cache hit for skin:{uuid}");
        Some(FetchedSkin { image, is_slim })
    }

    async fn write_cache(&self, uuid: PlayerUuid, image: &Image, is_slim: bool) {
        let Some(ttl) = self.config.skin_ttl else {
            return;
        };

        let encoded = match encode(image, OutputFormat::Png) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to encode fetched skin for {uuid}: {err}, skipping cache write");
                return;
            }
        };

        let skin_key = format!("skin:{uuid}");
        let slim_key = format!("slim:{uuid}");

        if let Some(Err(err)) = self
            .timed(self.cache.set_bytes(&skin_key, &encoded, Some(ttl)))
            .await
        {
            warn!("failed to write skin cache entry for {uuid}: {err}");
        }

        let slim_result = if is_slim {
            self.timed(self.cache.set_bytes(&slim_key, b"true", Some(ttl))).await
        } else {
            self.timed(self.cache.delete(&slim_key)).await
        };
        if let Some(Err(err)) = slim_result {
            warn!("failed to write slim cache entry for {uuid}: {err}");
        }

        if let Some(Err(err)) = self
            .timed(self.cache.set_bytes(&format!("unique:{uuid}"), b"0", None))
            .await
        {
            warn!("failed to write unique marker for {uuid}: {err}");
        }
    }

    fn default_for(&self, is_slim: bool) -> FetchedSkin {
        FetchedSkin {
            image: default_skin(is_slim).clone(),
            is_slim,
        }
    }

    async fn timed<T>(&self, fut: impl std::future::Future<Output = T>) -> Option<T> {
        tokio::time::timeout(DEFAULT_OPERATION_TIMEOUT, fut).await.ok()
    }
}
