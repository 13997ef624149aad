//! Color model.
//!
//! Colors are straight-alpha sRGB bytes, passed to the GPU unconverted so they
//! land on screen exactly as written (the swap-chain is a non-sRGB format).

pub mod color;

pub use color::Color;
