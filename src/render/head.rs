//! Three-quarter isometric head. Grounded in
//! `original_source/src/util/renders/head.go`.

use crate::image::{
    composite, composite_transform, extract, fix_transparency, remove_transparency, scale,
    transform_forward, transform_right, transform_up, Image,
};
use crate::skin::is_legacy;

use super::options::RenderOptions;

/// Output size `16n x (19n - floor(n/2) - 1)`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let n = opts.scale;
    let width = 16 * n;
    let height = 19 * n - n / 2 - 1;
    let canvas = Image::new(width, height);
    let f = n as f64;

    let mut front_head = remove_transparency(&extract(skin, 8, 8, 8, 8));
    let mut top_head = remove_transparency(&extract(skin, 8, 0, 8, 8));
    let mut right_head = remove_transparency(&extract(skin, 0, 8, 8, 8));

    if opts.overlay && !is_legacy(skin) {
        let overlay_skin = fix_transparency(skin);
        front_head = composite(&front_head, &extract(&overlay_skin, 40, 8, 8, 8), 0, 0);
        top_head = composite(&top_head, &extract(&overlay_skin, 40, 0, 8, 8), 0, 0);
        right_head = composite(&right_head, &extract(&overlay_skin, 32, 8, 8, 8), 0, 0);
    }

    let mut out = composite_transform(
        &canvas,
        &scale(&front_head, n),
        transform_forward(),
        8.0 * f,
        12.0 * f - 1.0,
    );
    out = composite_transform(&out, &scale(&top_head, n), transform_up(), -4.0 * f, 4.0 * f);
    out = composite_transform(&out, &scale(&right_head, n), transform_right(), 0.0, 4.0 * f);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_matches_expected_canvas_size() {
        let out = render(&Image::new(64, 64), RenderOptions::new(4, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (64, 19 * 4 - 4 / 2 - 1));
    }

    #[test]
    fn scale_one_matches_closed_form() {
        let out = render(&Image::new(64, 64), RenderOptions::new(1, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (16, 18));
    }
}
