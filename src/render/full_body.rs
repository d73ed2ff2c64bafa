//! Full isometric body. Thirteen parts composited back-to-front. Grounded in
//! `original_source/src/util/renders/body.go`.

use crate::image::{
    composite, composite_transform, extract, fix_transparency, flip_horizontal,
    remove_transparency, scale, transform_forward, transform_right, transform_up, Image,
};
use crate::skin::{is_legacy, slim_offset};

use super::options::RenderOptions;

/// Output size `20n x (45n + floor(n/16))`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let n = opts.scale;
    let so = slim_offset(opts.slim);
    let f = n as f64;

    let width = 20 * n;
    let height = 45 * n + n / 16;
    let canvas = Image::new(width, height);

    let mut front_head = remove_transparency(&extract(skin, 8, 8, 8, 8));
    let mut top_head = remove_transparency(&extract(skin, 8, 0, 8, 8));
    let mut right_head = remove_transparency(&extract(skin, 0, 8, 8, 8));
    let mut front_torso = remove_transparency(&extract(skin, 20, 20, 8, 12));
    let mut front_right_arm = remove_transparency(&extract(skin, 44, 20, 4 - so, 12));
    let mut top_right_arm = remove_transparency(&extract(skin, 44, 16, 4 - so, 4));
    let mut right_right_arm = remove_transparency(&extract(skin, 40, 20, 4, 12));
    let mut front_right_leg = remove_transparency(&extract(skin, 4, 20, 4, 12));
    let mut right_right_leg = remove_transparency(&extract(skin, 0, 20, 4, 12));

    let (front_left_arm, top_left_arm, front_left_leg);

    if is_legacy(skin) {
        front_left_arm = flip_horizontal(&front_right_arm);
        top_left_arm = flip_horizontal(&top_right_arm);
        front_left_leg = flip_horizontal(&front_right_leg);
    } else {
        let mut fla = remove_transparency(&extract(skin, 36, 52, 4 - so, 12));
        let mut tla = remove_transparency(&extract(skin, 36, 48, 4 - so, 4));
        let mut fll = remove_transparency(&extract(skin, 20, 52, 4, 12));

        if opts.overlay {
            let overlay_skin = fix_transparency(skin);
            front_head = composite(&front_head, &extract(&overlay_skin, 40, 8, 8, 8), 0, 0);
            top_head = composite(&top_head, &extract(&overlay_skin, 40, 0, 8, 8), 0, 0);
            right_head = composite(&right_head, &extract(&overlay_skin, 32, 8, 8, 8), 0, 0);
            front_torso = composite(&front_torso, &extract(&overlay_skin, 20, 36, 8, 12), 0, 0);
            fla = composite(&fla, &extract(&overlay_skin, 52, 52, 4 - so, 64), 0, 0);
            tla = composite(&tla, &extract(&overlay_skin, 52, 48, 4 - so, 4), 0, 0);
            front_right_arm =
                composite(&front_right_arm, &extract(&overlay_skin, 44, 36, 4 - so, 48), 0, 0);
            top_right_arm =
                composite(&top_right_arm, &extract(&overlay_skin, 44, 48, 4 - so, 4), 0, 0);
            right_right_arm =
                composite(&right_right_arm, &extract(&overlay_skin, 40, 36, 4, 12), 0, 0);
            fll = composite(&fll, &extract(&overlay_skin, 4, 52, 4, 12), 0, 0);
            front_right_leg =
                composite(&front_right_leg, &extract(&overlay_skin, 4, 36, 4, 12), 0, 0);
            right_right_leg =
                composite(&right_right_leg, &extract(&overlay_skin, 0, 36, 4, 12), 0, 0);
        }

        front_left_arm = fla;
        top_left_arm = tla;
        front_left_leg = fll;
    }

    let fso = so as f64;

    let mut out = composite_transform(
        &canvas,
        &scale(&right_right_leg, n),
        transform_right(),
        4.0 * f,
        23.0 * f,
    );
    out = composite_transform(
        &out,
        &scale(&front_right_leg, n),
        transform_forward(),
        8.0 * f,
        31.0 * f,
    );
    out = composite_transform(
        &out,
        &scale(&front_left_leg, n),
        transform_forward(),
        12.0 * f,
        31.0 * f,
    );
    out = composite_transform(
        &out,
        &scale(&front_torso, n),
        transform_forward(),
        8.0 * f,
        19.0 * f,
    );
    out = composite_transform(
        &out,
        &scale(&front_right_arm, n),
        transform_forward(),
        (4.0 + fso) * f,
        19.0 * f - 1.0,
    );
    out = composite_transform(
        &out,
        &scale(&front_left_arm, n),
        transform_forward(),
        16.0 * f,
        21.0 * f - 1.0,
    );
    out = composite_transform(
        &out,
        &scale(&top_left_arm, n),
        transform_up(),
        -5.0 * f,
        17.0 * f,
    );
    out = composite_transform(
        &out,
        &scale(&right_right_arm, n),
        transform_right(),
        fso * f,
        (15.0 - fso) * f,
    );
    out = composite_transform(
        &out,
        &scale(&top_right_arm, n),
        transform_up(),
        (-15.0 + fso) * f,
        15.0 * f,
    );
    out = composite_transform(
        &out,
        &scale(&front_head, n),
        transform_forward(),
        10.0 * f,
        13.0 * f - 1.0,
    );
    out = composite_transform(&out, &scale(&top_head, n), transform_up(), -3.0 * f, 5.0 * f);
    out = composite_transform(
        &out,
        &scale(&right_head, n),
        transform_right(),
        2.0 * f,
        3.0 * f,
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_size_matches_closed_form() {
        let skin = Image::new(64, 64);
        let out = render(&skin, RenderOptions::new(4, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (80, 180));

        let out16 = render(&skin, RenderOptions::new(16, false, false, false).unwrap());
        assert_eq!(out16.dimensions(), (320, 721));

        let out1 = render(&skin, RenderOptions::new(1, false, false, false).unwrap());
        assert_eq!(out1.dimensions(), (20, 45));
    }

    #[test]
    fn legacy_skin_mirrors_left_limbs() {
        let skin = Image::new(64, 32);
        let out = render(&skin, RenderOptions::new(1, true, false, false).unwrap());
        assert_eq!(out.dimensions(), (20, 45));
    }
}
