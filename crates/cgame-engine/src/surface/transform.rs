//! In-place surface transforms.
//!
//! Each function changes how the surface is displayed when blitted (not its
//! pixels) and hands the same surface back for chaining.

use super::Surface;

/// Sets the display size.
pub fn scale(surface: &mut Surface, width: f32, height: f32) -> &mut Surface {
    surface.set_width(width);
    surface.set_height(height);
    surface
}

/// Sets the rotation in degrees, clockwise about the blit centre.
pub fn rotate(surface: &mut Surface, degrees: f32) -> &mut Surface {
    surface.set_rotation(degrees);
    surface
}

/// Sets horizontal mirroring.
pub fn flip(surface: &mut Surface, flip: bool) -> &mut Surface {
    surface.set_flip(flip);
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::render::testing::headless_renderer;

    #[test]
    fn transforms_chain_on_the_same_surface() {
        let Some(renderer) = headless_renderer() else { return };
        let mut s = Surface::empty(&renderer, 50.0, 100.0);

        let r = flip(rotate(scale(&mut s, 25.0, 40.0), 90.0), true);
        r.set_alpha(10.0);

        assert_eq!(s.get_rect(), Rect::new(0.0, 0.0, 25.0, 40.0));
        assert_eq!(s.get_rect_at(3.0, 4.0), Rect::new(3.0, 4.0, 25.0, 40.0));
        assert_eq!(s.rotation(), 90.0);
        assert!(s.is_flip());
        assert_eq!(s.alpha(), 10);
    }
}
