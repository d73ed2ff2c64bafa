//! The embedded classic (Steve) and slim (Alex) default skins used when a
//! player has no upstream profile. Grounded in
//! `original_source/src/util/skin.go`, which embeds the same two textures via
//! `//go:embed` and decodes them once at process start.

use std::sync::OnceLock;

use crate::image::{decode_skin, Image};

static STEVE_PNG: &[u8] = include_bytes!("../../assets/steve.png");
static ALEX_PNG: &[u8] = include_bytes!("../../assets/alex.png");

static STEVE: OnceLock<Image> = OnceLock::new();
static ALEX: OnceLock<Image> = OnceLock::new();

/// Returns the embedded default skin for the given model. Decoding happens
/// once per process and is cached for the lifetime of the program; a
/// malformed embedded asset is a build-time invariant violation, so decode
/// failure panics rather than threading a `Result` through every caller.
pub fn default_skin(slim: bool) -> &'static Image {
    if slim {
        ALEX.get_or_init(|| decode_skin(ALEX_PNG).expect("embedded alex.png must decode"))
    } else {
        STEVE.get_or_init(|| decode_skin(STEVE_PNG).expect("embedded steve.png must decode"))
    }
}
