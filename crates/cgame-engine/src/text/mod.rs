//! Font loading and text rasterization.
//!
//! Text is rasterized on the CPU with `fontdue` into an RGBA [`Bitmap`] and
//! then uploaded as a [`Surface`](crate::Surface).

mod bitmap;
mod font;

pub use bitmap::{Bitmap, RenderMode};
pub use font::{Font, FontLoadError};
