//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer.

mod runtime;
mod view;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx, DEFAULT_TITLE};
pub use view::Window;
