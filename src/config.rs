//! Process configuration: routes and cache TTLs, loaded from YAML.
//!
//! Grounded in `original_source/src/config.go`'s `Config`/`DefaultConfig`;
//! restyled on `serde`/`serde_yaml`, the teacher's JSON/config stack.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{EngineError, Result};

/// Per-route scale bounds and defaults (spec.md §3, "clamped per-route to
/// `[min_scale, max_scale]`").
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub default_scale: i64,
    pub default_overlay: bool,
    pub default_download: bool,
    pub min_scale: i64,
    pub max_scale: i64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            default_scale: 4,
            default_overlay: true,
            default_download: false,
            min_scale: 1,
            max_scale: 64,
        }
    }
}

impl RouteConfig {
    /// Clamps a caller-supplied scale into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: i64) -> i64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub face: RouteConfig,
    pub head: RouteConfig,
    pub full_body: RouteConfig,
    pub front_body: RouteConfig,
    pub back_body: RouteConfig,
    pub left_body: RouteConfig,
    pub right_body: RouteConfig,
    pub raw_skin: RouteConfig,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            face: RouteConfig::default(),
            head: RouteConfig::default(),
            full_body: RouteConfig::default(),
            front_body: RouteConfig::default(),
            back_body: RouteConfig::default(),
            left_body: RouteConfig::default(),
            right_body: RouteConfig::default(),
            raw_skin: RouteConfig {
                default_overlay: false,
                ..RouteConfig::default()
            },
        }
    }
}

/// TTLs and single-flight toggle for the cache backend. Mirrors
/// `CacheConfig` in `original_source/src/config.go`: absent durations mean
/// "disable this cache" rather than "cache forever".
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(with = "option_duration_seconds")]
    pub uuid_cache_duration: Option<Duration>,
    #[serde(with = "option_duration_seconds")]
    pub skin_cache_duration: Option<Duration>,
    #[serde(with = "option_duration_seconds")]
    pub render_cache_duration: Option<Duration>,
    pub enable_locks: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            uuid_cache_duration: Some(Duration::from_secs(60 * 60 * 12)),
            skin_cache_duration: Some(Duration::from_secs(60 * 60 * 12)),
            render_cache_duration: Some(Duration::from_secs(60 * 60 * 12)),
            enable_locks: true,
        }
    }
}

mod option_duration_seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds: Option<u64> = Option::deserialize(deserializer)?;
        Ok(seconds.map(Duration::from_secs))
    }
}

/// The root configuration object for the server binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cache_backend_uri: String,
    pub routes: Routes,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3001,
            cache_backend_uri: "memory://local".to_string(),
            routes: Routes::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Parses a YAML document into a `Config`, falling back to `Config::default()`
    /// for any field the document omits.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| EngineError::Invariant(format!("invalid config: {e}")))
    }

    pub fn route_for(&self, kind: crate::render::RenderKind) -> RouteConfig {
        use crate::render::RenderKind::*;
        match kind {
            Face => self.routes.face,
            Head => self.routes.head,
            FullBody => self.routes.full_body,
            FrontBody => self.routes.front_body,
            BackBody => self.routes.back_body,
            LeftBody => self.routes.left_body,
            RightBody => self.routes.right_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.routes.face.default_scale, 4);
        assert_eq!(cfg.routes.face.min_scale, 1);
        assert_eq!(cfg.routes.face.max_scale, 64);
        assert!(cfg.cache.enable_locks);
    }

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let cfg = Config::from_yaml("host: 0.0.0.0\nport: 8080\n").unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.routes.face.default_scale, 4);
    }

    #[test]
    fn route_scale_clamps_to_bounds() {
        let route = RouteConfig::default();
        assert_eq!(route.clamp_scale(0), 1);
        assert_eq!(route.clamp_scale(1000), 64);
        assert_eq!(route.clamp_scale(10), 10);
    }
}
