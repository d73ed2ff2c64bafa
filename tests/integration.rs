//! End-to-end exercise of [`skinforge::Engine`]: cache backend, identity
//! collaborator, skin-fetch pipeline, view renderers, and codec wired
//! together exactly as `skinforge-server` wires them, against the in-memory
//! cache and a fake identity client (no real Mojang lookup network calls,
//! per the module-level tests' own convention).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use skinforge::cache::MemoryBackend;
use skinforge::config::Config;
use skinforge::identity::{BasicProfile, IdentityClient, Profile};
use skinforge::image::OutputFormat;
use skinforge::player::PlayerUuid;
use skinforge::render::{RenderKind, RenderOptions};
use skinforge::Engine;

/// Always reports "no profile", so every render falls through to the
/// embedded default skin — exercises the fallback path without a network.
struct NoProfileIdentity {
    calls: AtomicUsize,
}

impl NoProfileIdentity {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl IdentityClient for NoProfileIdentity {
    async fn username_to_uuid(&self, _username: &str) -> skinforge::Result<Option<BasicProfile>> {
        Ok(None)
    }

    async fn profile_textures(&self, _uuid: &PlayerUuid) -> skinforge::Result<Option<Profile>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

fn test_engine() -> Engine<MemoryBackend, NoProfileIdentity> {
    Engine::new(
        Arc::new(MemoryBackend::new()),
        Arc::new(NoProfileIdentity::new()),
        reqwest::Client::new(),
        Config::default(),
    )
}

fn test_uuid() -> PlayerUuid {
    PlayerUuid::parse("069a79f444e94726a5befca90e38aaf5").unwrap()
}

/// Every render kind produces non-empty, decodable PNG bytes for a player
/// with no upstream profile (default-skin fallback, spec.md §7).
#[tokio::test]
async fn every_render_kind_produces_valid_png_bytes() {
    let engine = test_engine();
    let uuid = test_uuid();
    let opts = RenderOptions::new(4, true, false, false).unwrap();

    for kind in [
        RenderKind::Face,
        RenderKind::Head,
        RenderKind::FullBody,
        RenderKind::FrontBody,
        RenderKind::BackBody,
        RenderKind::LeftBody,
        RenderKind::RightBody,
    ] {
        let (bytes, _hit) = engine
            .render(kind, uuid, opts, OutputFormat::Png)
            .await
            .unwrap();
        assert!(!bytes.is_empty(), "{kind:?} produced empty bytes");
        assert_eq!(&bytes[1..4], b"PNG", "{kind:?} did not encode a PNG");
    }
}

/// Raw-skin bytes decode back to the 64x64 default skin when no profile exists.
#[tokio::test]
async fn raw_skin_falls_back_to_default() {
    use image::GenericImageView;

    let engine = test_engine();
    let bytes = engine.raw_skin(test_uuid()).await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (64, 64));
}

/// Render-cache memoization (spec.md Invariant 7/8): two identical render
/// requests return byte-identical output and only the first misses.
#[tokio::test]
async fn identical_requests_memoize_through_render_cache() {
    let engine = test_engine();
    let uuid = test_uuid();
    let opts = RenderOptions::new(8, false, false, false).unwrap();

    let (first, hit1) = engine
        .render(RenderKind::FullBody, uuid, opts, OutputFormat::Jpeg)
        .await
        .unwrap();
    let (second, hit2) = engine
        .render(RenderKind::FullBody, uuid, opts, OutputFormat::Jpeg)
        .await
        .unwrap();

    assert!(!hit1);
    assert!(hit2);
    assert_eq!(first, second);
}

/// Different scales/overlay/format fingerprint to distinct cache entries —
/// no cross-contamination between otherwise-identical requests.
#[tokio::test]
async fn distinct_options_do_not_share_a_cache_entry() {
    let engine = test_engine();
    let uuid = test_uuid();

    let (small, _) = engine
        .render(
            RenderKind::Face,
            uuid,
            RenderOptions::new(1, false, false, false).unwrap(),
            OutputFormat::Png,
        )
        .await
        .unwrap();
    let (large, _) = engine
        .render(
            RenderKind::Face,
            uuid,
            RenderOptions::new(2, false, false, false).unwrap(),
            OutputFormat::Png,
        )
        .await
        .unwrap();

    assert_ne!(small, large);
}

/// `resolve_uuid` accepts a well-formed UUID without consulting the identity
/// collaborator at all.
#[tokio::test]
async fn resolve_uuid_short_circuits_for_well_formed_uuid() {
    let engine = test_engine();
    let resolved = engine.resolve_uuid(test_uuid().as_hex()).await.unwrap();
    assert_eq!(resolved, Some(test_uuid()));
}
