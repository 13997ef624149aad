//! Render-target surfaces.
//!
//! A [`Surface`] owns one GPU texture plus the display state (size, rotation,
//! flip, alpha and color modulation) applied when it is blitted elsewhere.

mod display;
mod surface;
pub mod transform;

pub use display::DisplayState;
pub use surface::Surface;
