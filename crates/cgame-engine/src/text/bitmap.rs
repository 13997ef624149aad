use crate::paint::Color;

/// How glyph coverage becomes alpha.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderMode {
    /// Hard edges: a pixel is either fully drawn or empty.
    Solid,
    /// Antialiased: coverage scales alpha.
    Blended,
}

impl RenderMode {
    #[inline]
    fn alpha(self, coverage: u8, color_alpha: u8) -> u8 {
        match self {
            RenderMode::Solid if coverage >= 128 => color_alpha,
            RenderMode::Solid => 0,
            RenderMode::Blended => ((coverage as u16 * color_alpha as u16 + 127) / 255) as u8,
        }
    }
}

/// Tightly packed RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    /// Stamps one glyph's coverage mask at `(x, y)`, clipped to the bitmap.
    ///
    /// Overlapping glyphs keep the larger alpha.
    pub fn stamp(
        &mut self,
        x: i32,
        y: i32,
        mask_w: usize,
        coverage: &[u8],
        color: Color,
        mode: RenderMode,
    ) {
        if mask_w == 0 {
            return;
        }
        for (row, line) in coverage.chunks(mask_w).enumerate() {
            let py = y + row as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for (col, &c) in line.iter().enumerate() {
                let px = x + col as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let a = mode.alpha(c, color.a);
                if a == 0 {
                    continue;
                }
                let i = (py as usize * self.width as usize + px as usize) * 4;
                if a > self.pixels[i + 3] {
                    self.pixels[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, a]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASK: [u8; 4] = [0, 127, 128, 255];

    #[test]
    fn solid_thresholds_at_half() {
        let mut bmp = Bitmap::new(4, 1);
        bmp.stamp(0, 0, 4, &MASK, Color::RED, RenderMode::Solid);
        let alphas: Vec<u8> = (0..4).map(|x| bmp.pixel(x, 0)[3]).collect();
        assert_eq!(alphas, vec![0, 0, 255, 255]);
        assert_eq!(bmp.pixel(2, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn blended_scales_alpha() {
        let mut bmp = Bitmap::new(4, 1);
        bmp.stamp(0, 0, 4, &MASK, Color::WHITE.with_alpha(128), RenderMode::Blended);
        let alphas: Vec<u8> = (0..4).map(|x| bmp.pixel(x, 0)[3]).collect();
        assert_eq!(alphas, vec![0, 64, 64, 128]);
    }

    #[test]
    fn stamp_clips_to_bounds() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.stamp(-1, 1, 2, &[255, 255, 255, 255], Color::BLUE, RenderMode::Solid);
        assert_eq!(bmp.pixel(0, 1)[3], 255);
        assert_eq!(bmp.pixel(1, 1)[3], 0);
        assert_eq!(bmp.pixel(0, 0)[3], 0);
    }

    #[test]
    fn overlap_keeps_stronger_coverage() {
        let mut bmp = Bitmap::new(1, 1);
        bmp.stamp(0, 0, 1, &[200], Color::WHITE, RenderMode::Blended);
        bmp.stamp(0, 0, 1, &[50], Color::WHITE, RenderMode::Blended);
        assert_eq!(bmp.pixel(0, 0)[3], 200);
    }
}
