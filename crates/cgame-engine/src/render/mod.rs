//! GPU rendering subsystem.
//!
//! One sprite pipeline draws everything: textured quads for blits, and the
//! same quads over a 1x1 white texture for solid fills.
//!
//! Convention:
//! - CPU geometry is in pixels (top-left origin, +Y down).
//! - Vertices are converted to NDC on the CPU against the target size.

pub mod quad;
mod renderer;
#[cfg(test)]
pub(crate) mod testing;

pub use quad::{QuadSpec, QuadVertex};
pub use renderer::{BlendMode, GpuTexture, Renderer, SURFACE_FORMAT};
