//! Geometry value types.
//!
//! Screen space throughout the crate:
//! - pixels, origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC on the CPU against the target size.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
