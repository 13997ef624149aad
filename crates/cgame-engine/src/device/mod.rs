//! GPU device + swap-chain management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for the window
//! - creating & configuring the window surface (swap-chain)
//! - acquiring frames for presentation
//!
//! Drawing itself lives in [`crate::render`].

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit};
pub use surface::SurfaceErrorAction;
