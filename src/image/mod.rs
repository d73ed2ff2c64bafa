//! Canonical pixel buffer, raster primitives, and multi-format codec.

mod canonical;
mod codec;
mod primitives;

pub use canonical::Image;
pub use codec::{decode_skin, encode, OutputFormat};
pub use primitives::{
    composite, composite_transform, extract, fix_transparency, flip_horizontal, pad_to_square,
    remove_transparency, scale, transform_forward, transform_right, transform_up, Matrix,
};
