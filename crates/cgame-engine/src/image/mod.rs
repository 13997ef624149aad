//! Image file loading into surfaces.

use std::path::Path;

use anyhow::{Context, Result};

use crate::render::Renderer;
use crate::surface::Surface;

/// Decodes the image at `path` into a new surface.
pub fn load(renderer: &Renderer, path: impl AsRef<Path>) -> Result<Surface> {
    let path = path.as_ref();
    let img = ::image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    log::debug!("loaded image {} ({w}x{h})", path.display());
    Surface::from_rgba(renderer, w, h, img.as_raw())
        .with_context(|| format!("failed to upload image {}", path.display()))
}

/// Decodes an in-memory encoded image (format guessed from its header).
pub fn load_from_memory(renderer: &Renderer, bytes: &[u8]) -> Result<Surface> {
    let img = decode_rgba(bytes)?;
    let (w, h) = img.dimensions();
    Surface::from_rgba(renderer, w, h, img.as_raw())
}

fn decode_rgba(bytes: &[u8]) -> Result<::image::RgbaImage> {
    Ok(::image::load_from_memory(bytes)
        .context("failed to decode image data")?
        .to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_png(w: u32, h: u32) -> Vec<u8> {
        let img = ::image::RgbaImage::from_fn(w, h, |x, y| ::image::Rgba([x as u8, y as u8, 7, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, ::image::ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let img = decode_rgba(&encoded_png(3, 2)).expect("decode");
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [2, 1, 7, 255]);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_rgba(b"not an image").is_err());
    }
}
