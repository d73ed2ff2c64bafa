//! Flat orthographic right-side view. Grounded in
//! `original_source/src/util/renders/rightbody.go`.
//!
//! Unlike the other orthographic views, the right side has no legacy-mirror
//! branch in the original: legacy skins already carry a real right
//! arm/leg/head region, so the same extraction is used regardless of layout.

use crate::image::{composite, extract, fix_transparency, remove_transparency, scale, Image};
use crate::skin::is_legacy;

use super::options::RenderOptions;

/// Output size `8n x 32n`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let mut right_head = remove_transparency(&extract(skin, 0, 8, 8, 8));
    let mut right_arm = remove_transparency(&extract(skin, 40, 20, 4, 12));
    let mut right_leg = remove_transparency(&extract(skin, 0, 20, 4, 12));

    if opts.overlay && !is_legacy(skin) {
        let overlay_skin = fix_transparency(skin);
        right_head = composite(&right_head, &extract(&overlay_skin, 32, 8, 8, 8), 0, 0);
        right_arm = composite(&right_arm, &extract(&overlay_skin, 40, 36, 4, 12), 0, 0);
        right_leg = composite(&right_leg, &extract(&overlay_skin, 0, 36, 4, 12), 0, 0);
    }

    let mut out = Image::new(8, 32);
    out = composite(&out, &right_head, 0, 0);
    out = composite(&out, &right_arm, 2, 8);
    out = composite(&out, &right_leg, 2, 20);

    scale(&out, opts.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_8n_by_32n() {
        let out = render(&Image::new(64, 64), RenderOptions::new(3, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (24, 96));
    }
}
