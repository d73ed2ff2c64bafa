//! Flat orthographic left-side view. Grounded in
//! `original_source/src/util/renders/leftbody.go`.

use crate::image::{composite, extract, fix_transparency, flip_horizontal, remove_transparency, scale, Image};
use crate::skin::{is_legacy, slim_offset};

use super::options::RenderOptions;

/// Output size `8n x 32n`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let so = slim_offset(opts.slim);

    let mut left_head = remove_transparency(&extract(skin, 24, 8, 8, 8));

    let (left_left_arm, left_left_leg);

    if is_legacy(skin) {
        left_left_arm = flip_horizontal(&remove_transparency(&extract(skin, 40, 20, 4, 12)));
        left_left_leg = flip_horizontal(&remove_transparency(&extract(skin, 0, 20, 4, 12)));
    } else {
        let mut lla = remove_transparency(&extract(skin, 40 - so, 52, 4, 12));
        let mut lll = remove_transparency(&extract(skin, 24, 52, 4, 12));

        if opts.overlay {
            let overlay_skin = fix_transparency(skin);
            left_head = composite(&left_head, &extract(&overlay_skin, 48, 8, 8, 8), 0, 0);
            lla = composite(&lla, &extract(&overlay_skin, 56 - so, 52, 4, 12), 0, 0);
            lll = composite(&lll, &extract(&overlay_skin, 8, 52, 4, 12), 0, 0);
        }

        left_left_arm = lla;
        left_left_leg = lll;
    }

    let mut out = Image::new(8, 32);
    out = composite(&out, &left_head, 0, 0);
    out = composite(&out, &left_left_arm, 2, 8);
    out = composite(&out, &left_left_leg, 2, 20);

    scale(&out, opts.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_8n_by_32n() {
        let out = render(&Image::new(64, 64), RenderOptions::new(2, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (16, 64));
    }
}
