//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! game code: the [`Game`] trait and the contexts handed to it.

mod app;
mod ctx;

pub use app::{AppControl, Game};
pub use ctx::{FrameCtx, LoadCtx};
