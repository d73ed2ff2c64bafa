//! The `Engine` context (spec.md §9): an explicit, passed-in collaborator
//! bundle replacing the source's process-wide cache/config/HTTP-client
//! singletons. One `Engine` is built at process start and shared (behind an
//! `Arc`) across every request.

use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::cache::{render_cache_key, CacheBackend, RenderCache};
use crate::config::Config;
use crate::error::Result;
use crate::identity::IdentityClient;
use crate::image::{encode, OutputFormat};
use crate::pipeline::{PipelineConfig, SkinFetchPipeline};
use crate::player::PlayerUuid;
use crate::render::{self, RenderKind, RenderOptions};

/// Ties the skin-fetch pipeline and the render cache together behind one
/// entry point: `render`.
pub struct Engine<C: CacheBackend, I: IdentityClient> {
    cache: Arc<C>,
    identity: Arc<I>,
    pipeline: SkinFetchPipeline<C, I>,
    render_cache: RenderCache<C>,
    config: Config,
}

impl<C: CacheBackend, I: IdentityClient> Engine<C, I> {
    pub fn new(cache: Arc<C>, identity: Arc<I>, http: reqwest::Client, config: Config) -> Self {
        let pipeline = SkinFetchPipeline::new(
            cache.clone(),
            identity.clone(),
            http,
            PipelineConfig {
                skin_ttl: config.cache.skin_cache_duration,
                enable_locks: config.cache.enable_locks,
            },
        );
        let render_cache = RenderCache::new(
            cache.clone(),
            config.cache.render_cache_duration,
            config.cache.enable_locks,
        );

        Self {
            cache,
            identity,
            pipeline,
            render_cache,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves a path segment that may already be a UUID, or a username that
    /// needs a `uuid:<name>` cache lookup (spec.md §6) followed by an
    /// identity-layer lookup on a miss. Returns `Ok(None)` when the name does
    /// not resolve to any player, mirroring `original_source/src/util/uuid.go`'s
    /// `GetUUID`.
    pub async fn resolve_uuid(&self, user: &str) -> Result<Option<PlayerUuid>> {
        if let Ok(uuid) = PlayerUuid::parse(user) {
            return Ok(Some(uuid));
        }

        let name = user.to_ascii_lowercase();
        let cache_key = format!("uuid:{name}");

        if let Ok(Some(bytes)) = self.cache.get_bytes(&cache_key).await {
            if let Ok(hex) = std::str::from_utf8(&bytes) {
                if let Ok(uuid) = PlayerUuid::parse(hex) {
                    return Ok(Some(uuid));
                }
            }
        }

        let Some(profile) = self.identity.username_to_uuid(&name).await? else {
            return Ok(None);
        };
        let uuid = PlayerUuid::parse(&profile.id)?;

        if let Err(err) = self
            .cache
            .set_bytes(&cache_key, uuid.as_hex().as_bytes(), self.uuid_ttl())
            .await
        {
            warn!("failed to write uuid cache entry for {name}: {err}");
        }

        Ok(Some(uuid))
    }

    /// Fetches (and caches) the raw, unrendered skin texture for `uuid`,
    /// encoded as PNG. Grounded in `original_source/src/routes/skin.go`'s
    /// `SkinHandler`, which serves the fetched texture verbatim.
    pub async fn raw_skin(&self, uuid: PlayerUuid) -> Result<Vec<u8>> {
        let fetched = self.pipeline.fetch(uuid).await;
        encode(&fetched.image, OutputFormat::Png)
    }

    fn uuid_ttl(&self) -> Option<Duration> {
        self.config.cache.uuid_cache_duration
    }

    /// Renders `kind` for `uuid` under `opts`, encoded as `format`.
    ///
    /// Request flow (spec.md §2): fingerprint -> cache lookup -> on miss,
    /// acquire the render lock, re-check, run the skin-fetch pipeline, run
    /// the view renderer, encode, store, release. Returns the encoded bytes
    /// and whether they were served from cache.
    pub async fn render(
        &self,
        kind: RenderKind,
        uuid: PlayerUuid,
        opts: RenderOptions,
        format: OutputFormat,
    ) -> Result<(Vec<u8>, bool)> {
        let key = render_cache_key(uuid, kind, opts, format.extension());

        self.render_cache
            .get_or_build(&key, || async {
                let fetched = self.pipeline.fetch(uuid).await;
                let render_opts = RenderOptions { slim: fetched.is_slim, ..opts };
                let rendered = render::render(kind, &fetched.image, render_opts);
                encode(&rendered, format)
            })
            .await
    }

    /// Exposes the underlying cache backend for boundary-level concerns
    /// (e.g. a `/ping` healthcheck that round-trips a byte through it).
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryBackend;
    use crate::identity::{BasicProfile, Profile};

    struct NoProfileIdentity;

    impl IdentityClient for NoProfileIdentity {
        async fn username_to_uuid(&self, _username: &str) -> Result<Option<BasicProfile>> {
            Ok(None)
        }

        async fn profile_textures(&self, _uuid: &PlayerUuid) -> Result<Option<Profile>> {
            Ok(None)
        }
    }

    fn test_engine() -> Engine<MemoryBackend, NoProfileIdentity> {
        Engine::new(
            Arc::new(MemoryBackend::new()),
            Arc::new(NoProfileIdentity),
            reqwest::Client::new(),
            Config::default(),
        )
    }

    #[tokio::test]
    async fn renders_default_skin_face() {
        let engine = test_engine();
        let uuid = PlayerUuid::parse("069a79f444e94726a5befca90e38aaf5").unwrap();
        let opts = RenderOptions::new(1, false, false, false).unwrap();
        let (bytes, hit) = engine
            .render(RenderKind::Face, uuid, opts, OutputFormat::Png)
            .await
            .unwrap();
        assert!(!hit);
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn second_identical_render_is_a_cache_hit() {
        let engine = test_engine();
        let uuid = PlayerUuid::parse("069a79f444e94726a5befca90e38aaf5").unwrap();
        let opts = RenderOptions::new(2, true, false, false).unwrap();

        let (first, hit1) = engine
            .render(RenderKind::Head, uuid, opts, OutputFormat::Png)
            .await
            .unwrap();
        let (second, hit2) = engine
            .render(RenderKind::Head, uuid, opts, OutputFormat::Png)
            .await
            .unwrap();

        assert!(!hit1);
        assert!(hit2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn resolve_uuid_passes_through_a_well_formed_uuid() {
        let engine = test_engine();
        let resolved = engine
            .resolve_uuid("069a79f444e94726a5befca90e38aaf5")
            .await
            .unwrap();
        assert_eq!(
            resolved,
            Some(PlayerUuid::parse("069a79f444e94726a5befca90e38aaf5").unwrap())
        );
    }

    #[tokio::test]
    async fn resolve_uuid_returns_none_for_unknown_username() {
        let engine = test_engine();
        let resolved = engine.resolve_uuid("NotarealPlayer").await.unwrap();
        assert_eq!(resolved, None);
    }
}
