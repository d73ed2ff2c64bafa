//! Decoding skin textures and encoding rendered output.
//!
//! Decoding is delegated to the `image` crate, which the upstream fetch path
//! already pulls in as a transitive dependency of the HTTP stack; encoding
//! dispatches on the requested output format, compositing onto opaque black
//! first for formats with no (PNG) or only binary (GIF) alpha support, per
//! spec.md §9's Open Question on JPEG/GIF alpha.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat};

use super::canonical::Image;
use super::primitives::composite;
use crate::error::{EngineError, Result};

/// Output image formats a render can be encoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
}

impl OutputFormat {
    /// Parses a format token from a query parameter or file extension.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            other => Err(EngineError::InvalidFormat(other.to_string())),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
        }
    }

    fn has_alpha(&self) -> bool {
        matches!(self, Self::Png)
    }

    fn image_crate_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Gif => ImageFormat::Gif,
        }
    }
}

/// Decodes a skin texture from raw bytes (PNG is the overwhelming common
/// case; upstream textures are not guaranteed to be one, so any format the
/// `image` crate understands is accepted) into the canonical buffer.
pub fn decode_skin(bytes: &[u8]) -> Result<Image> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| EngineError::SkinDecode(e.to_string()))?;
    Ok(to_canonical(&decoded))
}

fn to_canonical(decoded: &DynamicImage) -> Image {
    let rgba = decoded.to_rgba8();
    let (w, h) = rgba.dimensions();
    Image::from_raw(w, h, rgba.into_raw())
}

/// Encodes `img` in the requested output format. Non-alpha formats are
/// composited onto opaque black first so a given render always memoizes to
/// the same bytes regardless of how its alpha channel happened to look.
pub fn encode(img: &Image, format: OutputFormat) -> Result<Vec<u8>> {
    let flattened;
    let to_encode = if format.has_alpha() {
        img
    } else {
        let black = solid_black(img.width(), img.height());
        flattened = composite(&black, img, 0, 0);
        &flattened
    };

    let (w, h) = to_encode.dimensions();
    let rgba =
        image::RgbaImage::from_raw(w, h, to_encode.as_bytes().to_vec()).ok_or_else(|| {
            EngineError::Invariant("canonical buffer length mismatched its own dimensions".into())
        })?;
    let dynamic = DynamicImage::ImageRgba8(rgba);

    let mut buf = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut buf, format.image_crate_format())
        .map_err(|e| EngineError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

fn solid_black(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, [0, 0, 0, 255]);
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats_case_insensitively() {
        assert_eq!(OutputFormat::parse("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("gif").unwrap(), OutputFormat::Gif);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(OutputFormat::parse("bmp").is_err());
    }

    #[test]
    fn png_round_trips_through_encode_and_decode() {
        let mut img = Image::new(2, 2);
        img.put_pixel(0, 0, [255, 0, 0, 128]);
        img.put_pixel(1, 1, [0, 255, 0, 255]);
        let bytes = encode(&img, OutputFormat::Png).unwrap();
        let decoded = decode_skin(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0), [255, 0, 0, 128]);
    }

    #[test]
    fn jpeg_encode_flattens_onto_black() {
        let mut img = Image::new(1, 1);
        img.put_pixel(0, 0, [200, 200, 200, 0]);
        let bytes = encode(&img, OutputFormat::Jpeg).unwrap();
        let decoded = decode_skin(&bytes).unwrap();
        // Fully transparent pixel over black should decode back close to black,
        // modulo JPEG's lossy quantization.
        let px = decoded.get_pixel(0, 0);
        assert!(px[0] < 40 && px[1] < 40 && px[2] < 40);
    }
}
