//! Flat orthographic back view. Grounded in
//! `original_source/src/util/renders/backbody.go`.

use crate::image::{composite, extract, fix_transparency, flip_horizontal, remove_transparency, scale, Image};
use crate::skin::{is_legacy, slim_offset};

use super::options::RenderOptions;

/// Output size `16n x 32n`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let so = slim_offset(opts.slim);

    let mut back_head = remove_transparency(&extract(skin, 24, 8, 8, 8));
    let mut back_torso = remove_transparency(&extract(skin, 32, 20, 8, 12));
    let mut back_right_arm = remove_transparency(&extract(skin, 52 - so, 20, 4 - so, 12));
    let mut back_right_leg = remove_transparency(&extract(skin, 12, 20, 4, 12));

    let (back_left_arm, back_left_leg);

    if is_legacy(skin) {
        back_left_arm = flip_horizontal(&back_right_arm);
        back_left_leg = flip_horizontal(&back_right_leg);
    } else {
        let mut bla = remove_transparency(&extract(skin, 44 - so, 52, 4 - so, 12));
        let mut bll = remove_transparency(&extract(skin, 28, 52, 4, 12));

        if opts.overlay {
            let overlay_skin = fix_transparency(skin);
            back_head = composite(&back_head, &extract(&overlay_skin, 56, 8, 8, 8), 0, 0);
            back_torso = composite(&back_torso, &extract(&overlay_skin, 32, 36, 8, 12), 0, 0);
            bla = composite(&bla, &extract(&overlay_skin, 60 - so, 52, 4 - so, 64), 0, 0);
            back_right_arm =
                composite(&back_right_arm, &extract(&overlay_skin, 52 - so, 36, 4 - so, 48), 0, 0);
            bll = composite(&bll, &extract(&overlay_skin, 12, 52, 8, 64), 0, 0);
            back_right_leg = composite(&back_right_leg, &extract(&overlay_skin, 12, 36, 8, 48), 0, 0);
        }

        back_left_arm = bla;
        back_left_leg = bll;
    }

    let mut out = Image::new(16, 32);
    out = composite(&out, &back_head, 4, 0);
    out = composite(&out, &back_torso, 4, 8);
    out = composite(&out, &back_left_arm, so as i64, 8);
    out = composite(&out, &back_right_arm, 12, 8);
    out = composite(&out, &back_left_leg, 4, 20);
    out = composite(&out, &back_right_leg, 8, 20);

    scale(&out, opts.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_16n_by_32n() {
        let out = render(&Image::new(64, 64), RenderOptions::new(1, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (16, 32));
    }
}
