//! Primitive rectangle drawing onto surfaces.
//!
//! Primitives overwrite the target (alpha included) instead of blending.

use crate::coords::Rect;
use crate::paint::Color;
use crate::surface::Surface;

/// Draws a 1-pixel outline of `rect`.
pub fn rect(surface: &mut Surface, rect: Rect, color: Color) {
    surface.fill_rects(&outline_edges(rect), color);
}

/// Fills `rect`.
pub fn fill_rect(surface: &mut Surface, rect: Rect, color: Color) {
    surface.fill_rects(&[rect], color);
}

/// Splits the outline of `rect` into non-overlapping strips.
///
/// Rects thinner than two pixels on either axis collapse to one filled strip.
pub fn outline_edges(rect: Rect) -> Vec<Rect> {
    let r = rect.normalized();
    if r.is_empty() {
        return Vec::new();
    }
    if r.w <= 2.0 || r.h <= 2.0 {
        return vec![r];
    }

    let inner_h = r.h - 2.0;
    vec![
        Rect::new(r.x, r.y, r.w, 1.0),
        Rect::new(r.x, r.bottom() - 1.0, r.w, 1.0),
        Rect::new(r.x, r.y + 1.0, 1.0, inner_h),
        Rect::new(r.right() - 1.0, r.y + 1.0, 1.0, inner_h),
    ]
}
