#![forbid(unsafe_code)]

//! # skinforge
//!
//! A Minecraft player-skin rendering engine: given a skin texture (or a
//! player UUID resolved through the identity collaborator), produces the
//! face, head, full-body, or orthographic-body view as PNG/JPEG/GIF bytes.
//!
//! ## Modules
//! - [`image`] — canonical pixel buffer, raster primitives, codec
//! - [`skin`] — legacy/modern layout detection, embedded default skins
//! - [`render`] — the seven view renderers and their dispatch
//! - [`cache`] — cache backend contract, in-memory impl, fingerprinting, render cache
//! - [`identity`] — Mojang profile/texture lookup
//! - [`pipeline`] — the skin-fetch pipeline tying identity and cache together
//! - [`engine`] — the `Engine` context: the single entry point, `render`
//! - [`config`] — route and cache-TTL configuration
//! - [`player`] — UUID parsing and default-model derivation
//! - [`error`] — the shared error type

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod image;
pub mod pipeline;
pub mod player;
pub mod render;
pub mod skin;

pub use engine::Engine;
pub use error::{EngineError, Result};
pub use player::PlayerUuid;
