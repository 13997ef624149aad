use anyhow::{Context, Result};

use crate::coords::Rect;
use crate::paint::Color;
use crate::render::{BlendMode, GpuTexture, QuadSpec, Renderer};

use super::DisplayState;

/// An owned renderable target.
///
/// Not `Clone`: the texture is released when the surface is dropped. A
/// surface created with a size below one pixel has no texture; drawing onto
/// it or blitting it does nothing.
pub struct Surface {
    renderer: Renderer,
    texture: Option<GpuTexture>,
    display: DisplayState,
}

impl Surface {
    /// Creates a transparent `width` x `height` surface.
    pub fn new(renderer: &Renderer, width: f32, height: f32) -> Result<Self> {
        let texture = if width >= 1.0 && height >= 1.0 {
            let tex = renderer
                .create_texture(width as u32, height as u32)
                .with_context(|| format!("failed to create {width}x{height} surface"))?;
            Some(tex)
        } else {
            log::debug!("surface {width}x{height} has no pixels; created without texture");
            None
        };
        Ok(Self::with_texture(renderer, texture, width.max(0.0), height.max(0.0)))
    }

    /// Creates a surface from tightly packed RGBA8 pixels.
    pub fn from_rgba(renderer: &Renderer, width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        let texture = renderer
            .create_texture_rgba(width, height, pixels)
            .with_context(|| format!("failed to upload {width}x{height} pixels"))?;
        Ok(Self::with_texture(renderer, Some(texture), width as f32, height as f32))
    }

    /// A surface with a display size but nothing to draw.
    pub(crate) fn empty(renderer: &Renderer, width: f32, height: f32) -> Self {
        Self::with_texture(renderer, None, width, height)
    }

    fn with_texture(renderer: &Renderer, texture: Option<GpuTexture>, width: f32, height: f32) -> Self {
        Self {
            renderer: renderer.clone(),
            texture,
            display: DisplayState::new(width, height),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Size of the backing texture in pixels, `(0, 0)` when there is none.
    pub fn texture_size(&self) -> (u32, u32) {
        self.texture.as_ref().map_or((0, 0), |t| (t.width(), t.height()))
    }

    /// Clears the entire surface to `color`.
    pub fn fill(&mut self, color: Color) {
        if let Some(tex) = &self.texture {
            self.renderer.clear(tex, color);
        }
    }

    /// Draws `src` with its top-left corner at `(x, y)`.
    ///
    /// Uses `src`'s display size, rotation, flip and modulation.
    pub fn blit(&mut self, src: &Surface, x: f32, y: f32) {
        let (Some(target), Some(source)) = (&self.texture, &src.texture) else {
            return;
        };
        let d = &src.display;
        let quad = QuadSpec {
            dst: d.rect_at(x, y),
            rotation: d.rotation,
            flip: d.flip,
            color: d.modulation(),
        };
        self.renderer.draw(target, Some(source), &[quad], BlendMode::Blend);
    }

    /// Like [`blit`](Surface::blit), positioned at `rect.x, rect.y`.
    pub fn blit_rect(&mut self, src: &Surface, rect: Rect) {
        self.blit(src, rect.x, rect.y);
    }

    /// Fills `rects` with a solid color, overwriting what is underneath.
    pub(crate) fn fill_rects(&mut self, rects: &[Rect], color: Color) {
        let Some(target) = &self.texture else { return };
        let quads: Vec<QuadSpec> = rects
            .iter()
            .map(|r| r.normalized())
            .filter(|r| !r.is_empty())
            .map(|r| QuadSpec::solid(r, color.to_f32()))
            .collect();
        self.renderer.draw(target, None, &quads, BlendMode::Replace);
    }

    pub(crate) fn gpu_texture(&self) -> Option<&GpuTexture> {
        self.texture.as_ref()
    }

    /// Display state applied when this surface is blitted.
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Sets the blit alpha; clamped to `[0, 255]` and rounded.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.display.set_alpha(alpha);
    }

    pub fn alpha(&self) -> u8 {
        self.display.alpha()
    }

    /// Sets the RGB modulation; the color's alpha is ignored.
    pub fn set_color(&mut self, color: Color) {
        self.display.set_color(color);
    }

    pub fn color(&self) -> Color {
        self.display.color()
    }

    pub fn width(&self) -> f32 {
        self.display.width
    }

    pub fn height(&self) -> f32 {
        self.display.height
    }

    pub fn set_width(&mut self, width: f32) {
        self.display.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.display.height = height;
    }

    /// Degrees, clockwise.
    pub fn rotation(&self) -> f32 {
        self.display.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.display.rotation = degrees;
    }

    pub fn is_flip(&self) -> bool {
        self.display.flip
    }

    pub fn set_flip(&mut self, flip: bool) {
        self.display.flip = flip;
    }

    /// `Rect(0, 0, width, height)`.
    pub fn get_rect(&self) -> Rect {
        self.get_rect_at(0.0, 0.0)
    }

    pub fn get_rect_at(&self, x: f32, y: f32) -> Rect {
        self.display.rect_at(x, y)
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("texture", &self.texture)
            .field("display", &self.display)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::headless_renderer;

    #[test]
    fn sub_pixel_surface_has_no_texture() {
        let Some(renderer) = headless_renderer() else { return };
        let s = Surface::new(&renderer, 0.5, 10.0).unwrap();
        assert!(!s.has_texture());
        assert_eq!(s.texture_size(), (0, 0));
        assert_eq!(s.get_rect(), Rect::new(0.0, 0.0, 0.5, 10.0));
    }

    #[test]
    fn display_setters_are_stored() {
        let Some(renderer) = headless_renderer() else { return };
        let mut s = Surface::new(&renderer, 4.0, 2.0).unwrap();
        assert_eq!(s.texture_size(), (4, 2));

        s.set_alpha(-5.0);
        assert_eq!(s.alpha(), 0);
        s.set_color(Color::rgba(0, 0, 255, 0));
        assert_eq!(s.color(), Color::BLUE);
        s.set_width(8.0);
        assert_eq!(s.get_rect_at(1.0, 1.0), Rect::new(1.0, 1.0, 8.0, 2.0));
        // Display size does not resize the texture.
        assert_eq!(s.texture_size(), (4, 2));
    }
}
