//! cgame engine crate.
//!
//! A small 2D game-support layer: one window, render-target surfaces, polled
//! input events, audio playback, font rendering and frame pacing.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod draw;
pub mod image;
pub mod logging;
pub mod mixer;
pub mod paint;
pub mod random;
pub mod render;
pub mod surface;
pub mod text;

pub use coords::{Rect, Vec2};
pub use paint::Color;
pub use surface::{transform, DisplayState, Surface};

pub use crate::core::{AppControl, FrameCtx, Game, LoadCtx};
pub use input::{Event, EventType, Key, MouseButton};
pub use mixer::{LoopMode, Mixer, Music, Sound};
pub use render::Renderer;
pub use text::Font;
pub use time::Clock;
pub use window::{Runtime, RuntimeConfig, Window};
