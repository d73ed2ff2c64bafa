//! Flat face view. Grounded in `original_source/src/util/renders/face.go`.

use crate::image::{composite, extract, remove_transparency, scale, Image};
use crate::skin::is_legacy;

use super::options::RenderOptions;

/// Output size `8n x 8n`.
pub fn render(skin: &Image, opts: RenderOptions) -> Image {
    let mut output = remove_transparency(&extract(skin, 8, 8, 8, 8));

    if opts.overlay && !is_legacy(skin) {
        output = composite(&output, &extract(skin, 40, 8, 8, 8), 0, 0);
    }

    scale(&output, opts.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_skin() -> Image {
        Image::new(64, 64)
    }

    #[test]
    fn output_is_8n_square() {
        let out = render(&blank_skin(), RenderOptions::new(3, false, false, false).unwrap());
        assert_eq!(out.dimensions(), (24, 24));
    }

    #[test]
    fn without_overlay_is_fully_opaque() {
        let out = render(&blank_skin(), RenderOptions::new(1, false, false, false).unwrap());
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(out.get_pixel(x, y)[3], 255);
            }
        }
    }

    #[test]
    fn legacy_skin_ignores_overlay_flag() {
        let out = render(&Image::new(64, 32), RenderOptions::new(1, true, false, false).unwrap());
        assert_eq!(out.dimensions(), (8, 8));
    }
}
