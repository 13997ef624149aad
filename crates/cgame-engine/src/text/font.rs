use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Renderer;
use crate::surface::Surface;

use super::{Bitmap, RenderMode};

/// Error returned by [`Font::open`] and [`Font::from_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// A TrueType/OpenType face at one pixel size.
pub struct Font {
    face: fontdue::Font,
    size: f32,
    path: Option<PathBuf>,
}

impl Font {
    /// Loads the font file at `path` for rendering at `size` pixels.
    pub fn open(path: impl AsRef<Path>, size: f32) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        let mut font = Self::from_bytes(&bytes, size)
            .map_err(|e| FontLoadError(format!("{}: {}", path.display(), e.0)))?;
        font.path = Some(path.to_path_buf());
        log::debug!("loaded font {} at {size}px", path.display());
        Ok(font)
    }

    /// Parses a font from raw bytes.
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self, FontLoadError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FontLoadError(format!("invalid font size {size}")));
        }
        let settings = fontdue::FontSettings { scale: size, ..fontdue::FontSettings::default() };
        let face = fontdue::Font::from_bytes(bytes, settings).map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { face, size, path: None })
    }

    /// Source file, when loaded with [`Font::open`].
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Height of one line of text in pixels.
    pub fn line_height(&self) -> f32 {
        self.face
            .horizontal_line_metrics(self.size)
            .map(|m| (m.ascent - m.descent).ceil())
            .unwrap_or((self.size * 1.2).ceil())
    }

    /// Size `text` would render at.
    pub fn size_of(&self, text: &str) -> Vec2 {
        let layout = self.layout(text);
        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = self.face.metrics_indexed(g.key.glyph_index, self.size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w.ceil(), self.line_height().max(layout.height().ceil()))
    }

    /// Renders `text` with hard edges.
    pub fn render(&self, renderer: &Renderer, text: &str, color: Color) -> Result<Surface> {
        self.render_with(renderer, text, color, RenderMode::Solid)
    }

    /// Renders `text` antialiased.
    pub fn render_blended(&self, renderer: &Renderer, text: &str, color: Color) -> Result<Surface> {
        self.render_with(renderer, text, color, RenderMode::Blended)
    }

    fn render_with(&self, renderer: &Renderer, text: &str, color: Color, mode: RenderMode) -> Result<Surface> {
        let bitmap = self.rasterize(text, color, mode);
        if bitmap.width == 0 || bitmap.height == 0 {
            return Ok(Surface::empty(renderer, 0.0, self.line_height()));
        }
        Surface::from_rgba(renderer, bitmap.width, bitmap.height, &bitmap.pixels)
    }

    /// Rasterizes `text` into a bitmap sized by [`size_of`](Font::size_of).
    pub fn rasterize(&self, text: &str, color: Color, mode: RenderMode) -> Bitmap {
        let extent = self.size_of(text);
        let mut bitmap = Bitmap::new(extent.x as u32, extent.y as u32);
        if bitmap.width == 0 {
            return bitmap;
        }

        for g in self.layout(text).glyphs() {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, coverage) = self.face.rasterize_config(g.key);
            bitmap.stamp(
                g.x.round() as i32,
                g.y.round() as i32,
                metrics.width,
                &coverage,
                color,
                mode,
            );
        }
        bitmap
    }

    fn layout(&self, text: &str) -> Layout<()> {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.face], &TextStyle::new(text, self.size, 0));
        layout
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("path", &self.path)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let err = Font::from_bytes(b"definitely not a font", 16.0).unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Font::open("/nonexistent/cgame/font.ttf", 16.0).unwrap_err();
        assert!(err.0.contains("/nonexistent/cgame/font.ttf"), "{err}");
    }

    #[test]
    fn non_positive_size_is_rejected() {
        assert!(Font::from_bytes(&[], 0.0).is_err());
        assert!(Font::from_bytes(&[], f32::NAN).is_err());
        assert!(Font::from_bytes(&[], f32::INFINITY).is_err());
    }

    const DEJAVU: &[u8] = include_bytes!("testdata/DejaVuSans.ttf");

    fn font() -> Font {
        Font::from_bytes(DEJAVU, 32.0).unwrap()
    }

    #[test]
    fn infinite_size_is_rejected_for_a_real_face() {
        let err = Font::from_bytes(DEJAVU, f32::INFINITY).unwrap_err();
        assert!(err.to_string().contains("invalid font size"), "{err}");
    }

    #[test]
    fn line_height_tracks_pixel_size() {
        let f = font();
        let h = f.line_height();
        assert!(h >= 32.0 && h <= 64.0, "{h}");
        assert_eq!(h.fract(), 0.0);
    }

    #[test]
    fn extents_grow_with_text() {
        let f = font();
        let one = f.size_of("Hello");
        let two = f.size_of("HelloHello");
        assert!(one.x > 0.0);
        assert!(two.x > one.x);
        assert!(one.y >= f.line_height());
        assert_eq!(one.y, two.y);
    }

    #[test]
    fn empty_text_has_zero_width_and_line_height() {
        let f = font();
        assert_eq!(f.size_of(""), Vec2::new(0.0, f.line_height()));
        let bitmap = f.rasterize("", Color::WHITE, RenderMode::Blended);
        assert_eq!(bitmap.width, 0);
        assert_eq!(bitmap.height as f32, f.line_height());
    }

    #[test]
    fn empty_text_renders_without_texture() {
        let Some(renderer) = crate::render::testing::headless_renderer() else { return };
        let f = font();
        let s = f.render(&renderer, "", Color::WHITE).unwrap();
        assert!(!s.has_texture());
        assert_eq!(s.width(), 0.0);
        assert_eq!(s.height(), f.line_height());
    }

    #[test]
    fn solid_bitmap_is_hard_edged_and_sized_by_extent() {
        let f = font();
        let extent = f.size_of("Hi");
        let bitmap = f.rasterize("Hi", Color::RED, RenderMode::Solid);
        assert_eq!((bitmap.width as f32, bitmap.height as f32), (extent.x, extent.y));

        let alphas: Vec<u8> = bitmap.pixels.chunks(4).map(|p| p[3]).collect();
        assert!(alphas.iter().all(|&a| a == 0 || a == 255));
        assert!(bitmap.pixels.chunks(4).any(|p| p == [255, 0, 0, 255]));
    }

    #[test]
    fn blended_bitmap_has_partial_coverage() {
        let bitmap = font().rasterize("o", Color::WHITE, RenderMode::Blended);
        assert!(bitmap.pixels.chunks(4).any(|p| p[3] > 0 && p[3] < 255));
    }
}
