//! Skin texture layout detection and the embedded default skins.

mod default;

pub use default::default_skin;

use crate::image::Image;

/// Legacy (64x32) skins predate the overlay ("hat") layer and have no
/// separate left-arm/left-leg region; those limbs are mirrored from the
/// right side at render time. Grounded in
/// `original_source/src/util/renders/util.go`'s `IsOldSkin`.
pub fn is_legacy(skin: &Image) -> bool {
    skin.height() < 64
}

/// The x-offset subtracted from arm width and added to several arm overlay
/// origins for slim ("Alex") models, whose arms are 3px wide instead of 4px.
/// Grounded in `GetSlimOffset`.
pub fn slim_offset(slim: bool) -> u32 {
    if slim {
        1
    } else {
        0
    }
}
