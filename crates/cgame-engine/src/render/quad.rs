//! CPU-side quad geometry.
//!
//! Quads are built in pixel space (top-left origin, +Y down) and converted to
//! NDC against the render target size, so the shader needs no uniforms.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2], // NDC
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Vertices per quad (two triangles, no index buffer).
pub const QUAD_VERTEX_COUNT: usize = 6;

/// Where and how a textured quad lands on its target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadSpec {
    pub dst: Rect,
    /// Degrees, clockwise, about the centre of `dst`.
    pub rotation: f32,
    /// Mirror horizontally (swaps U).
    pub flip: bool,
    /// Multiplied with the sampled texel.
    pub color: [f32; 4],
}

impl QuadSpec {
    /// Axis-aligned, unflipped quad.
    pub fn solid(dst: Rect, color: [f32; 4]) -> Self {
        Self { dst, rotation: 0.0, flip: false, color }
    }
}

/// Corners of `dst` rotated about its centre, in order TL, TR, BR, BL.
pub fn corners(dst: Rect, rotation: f32) -> [Vec2; 4] {
    let c = dst.center();
    let hw = dst.w / 2.0;
    let hh = dst.h / 2.0;
    let local = [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ];
    if rotation == 0.0 {
        return local.map(|p| c + p);
    }
    local.map(|p| c + p.rotated(rotation))
}

/// Texture coordinates matching [`corners`].
pub fn corner_uvs(flip: bool) -> [[f32; 2]; 4] {
    if flip {
        [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
    } else {
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
    }
}

/// Pixel position to normalized device coordinates for a `width` x `height` target.
#[inline]
pub fn pixel_to_ndc(p: Vec2, width: u32, height: u32) -> [f32; 2] {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    [p.x / w * 2.0 - 1.0, 1.0 - p.y / h * 2.0]
}

/// Builds the two triangles for `quad` on a target of the given size.
pub fn build_quad(quad: &QuadSpec, target_w: u32, target_h: u32) -> [QuadVertex; QUAD_VERTEX_COUNT] {
    let pts = corners(quad.dst, quad.rotation);
    let uvs = corner_uvs(quad.flip);

    let v = |i: usize| QuadVertex {
        pos: pixel_to_ndc(pts[i], target_w, target_h),
        uv: uvs[i],
        color: quad.color,
    };

    [v(0), v(1), v(2), v(0), v(2), v(3)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn unrotated_corners_match_rect() {
        let c = corners(Rect::new(10.0, 20.0, 30.0, 40.0), 0.0);
        assert_eq!(c[0], Vec2::new(10.0, 20.0));
        assert_eq!(c[1], Vec2::new(40.0, 20.0));
        assert_eq!(c[2], Vec2::new(40.0, 60.0));
        assert_eq!(c[3], Vec2::new(10.0, 60.0));
    }

    #[test]
    fn quarter_turn_is_clockwise_about_centre() {
        // 20x10 box centred on (50, 50); after 90 degrees the top-left corner
        // sits top-right of the centre.
        let c = corners(Rect::new(40.0, 45.0, 20.0, 10.0), 90.0);
        assert!(approx(c[0], Vec2::new(55.0, 40.0)), "{:?}", c[0]);
        assert!(approx(c[2], Vec2::new(45.0, 60.0)), "{:?}", c[2]);
    }

    #[test]
    fn flip_swaps_u_only() {
        let a = corner_uvs(false);
        let b = corner_uvs(true);
        for i in 0..4 {
            assert_eq!(b[i][0], 1.0 - a[i][0]);
            assert_eq!(b[i][1], a[i][1]);
        }
    }

    #[test]
    fn ndc_maps_target_corners() {
        assert_eq!(pixel_to_ndc(Vec2::new(0.0, 0.0), 200, 100), [-1.0, 1.0]);
        assert_eq!(pixel_to_ndc(Vec2::new(200.0, 100.0), 200, 100), [1.0, -1.0]);
        assert_eq!(pixel_to_ndc(Vec2::new(100.0, 50.0), 200, 100), [0.0, 0.0]);
    }

    #[test]
    fn quad_is_two_triangles_sharing_diagonal() {
        let q = build_quad(&QuadSpec::solid(Rect::new(0.0, 0.0, 10.0, 10.0), [1.0; 4]), 10, 10);
        assert_eq!(q[0], q[3]);
        assert_eq!(q[2], q[4]);
        assert_eq!(q[0].pos, [-1.0, 1.0]);
        assert_eq!(q[2].pos, [1.0, -1.0]);
        assert!(q.iter().all(|v| v.color == [1.0; 4]));
    }
}
