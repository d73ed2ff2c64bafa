//! Flat orthographic front view. Grounded in
//! `original_source/src/util/renders/frontbody.go`.

use crate::image::{composite, extract, fix_transparency, flip_horizontal, remove_transparency, scale, Image};
use crate::skin::{is_legacy, slim_offset};

use super::options::RenderOptions;

/// Output size `16n x 32n`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let so = slim_offset(opts.slim);

    let mut front_head = remove_transparency(&extract(skin, 8, 8, 8, 8));
    let mut front_torso = remove_transparency(&extract(skin, 20, 20, 8, 12));
    let mut right_arm = remove_transparency(&extract(skin, 44, 20, 4 - so, 12));
    let mut right_leg = remove_transparency(&extract(skin, 4, 20, 4, 12));

    let (left_arm, left_leg);

    if is_legacy(skin) {
        left_arm = flip_horizontal(&right_arm);
        left_leg = flip_horizontal(&right_leg);
    } else {
        let mut la = remove_transparency(&extract(skin, 36, 52, 4 - so, 12));
        let mut ll = remove_transparency(&extract(skin, 20, 52, 4, 12));

        if opts.overlay {
            let overlay_skin = fix_transparency(skin);
            front_head = composite(&front_head, &extract(&overlay_skin, 40, 8, 8, 8), 0, 0);
            front_torso = composite(&front_torso, &extract(&overlay_skin, 20, 36, 8, 12), 0, 0);
            la = composite(&la, &extract(&overlay_skin, 52, 52, 4 - so, 64), 0, 0);
            right_arm = composite(&right_arm, &extract(&overlay_skin, 44, 36, 4 - so, 48), 0, 0);
            ll = composite(&ll, &extract(&overlay_skin, 4, 52, 4, 12), 0, 0);
            right_leg = composite(&right_leg, &extract(&overlay_skin, 4, 36, 4, 12), 0, 0);
        }

        left_arm = la;
        left_leg = ll;
    }

    let mut out = Image::new(16, 32);
    out = composite(&out, &front_head, 4, 0);
    out = composite(&out, &front_torso, 4, 8);
    out = composite(&out, &left_arm, 12, 8);
    out = composite(&out, &right_arm, so as i64, 8);
    out = composite(&out, &left_leg, 8, 20);
    out = composite(&out, &right_leg, 4, 20);

    scale(&out, opts.scale)
}
