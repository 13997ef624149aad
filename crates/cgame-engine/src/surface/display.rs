use crate::coords::Rect;
use crate::paint::Color;

/// How a surface is drawn when blitted: display size, rotation, mirroring
/// and color modulation. Independent of the pixels it applies to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayState {
    pub width: f32,
    pub height: f32,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub flip: bool,
    alpha: u8,
    tint: Color,
}

impl DisplayState {
    /// Unrotated, unflipped, opaque and untinted at `width` x `height`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            rotation: 0.0,
            flip: false,
            alpha: 255,
            tint: Color::WHITE,
        }
    }

    /// Sets the blit alpha; clamped to `[0, 255]` and rounded.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Sets the RGB modulation; the color's alpha is ignored.
    pub fn set_color(&mut self, color: Color) {
        self.tint = color.with_alpha(255);
    }

    pub fn color(&self) -> Color {
        self.tint
    }

    /// Color multiplied into every texel at blit time.
    pub fn modulation(&self) -> [f32; 4] {
        self.tint.with_alpha(self.alpha).to_f32()
    }

    pub fn rect_at(&self, x: f32, y: f32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

fn clamp_alpha(alpha: f32) -> u8 {
    if alpha.is_nan() {
        return 0;
    }
    alpha.clamp(0.0, 255.0).round() as u8
}
