use crate::input::{Event, EventQueue, InputState};
use crate::mixer::Mixer;
use crate::render::Renderer;
use crate::time::FrameTime;
use crate::window::{RuntimeCtx, Window};

/// Handles available while the game is being constructed.
pub struct LoadCtx<'a> {
    pub renderer: &'a Renderer,
    pub mixer: &'a Mixer,
    /// Screen size in pixels.
    pub width: u32,
    pub height: u32,
}

/// Per-frame context passed to [`Game::on_frame`](super::Game::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: Window<'a, 'w>,
    pub events: &'a mut EventQueue,
    pub input: &'a InputState,
    pub time: FrameTime,
    pub mixer: &'a Mixer,
    /// Frame rate measured by the runtime clock.
    pub fps: f32,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// Pops the oldest pending event.
    ///
    /// ```ignore
    /// while let Some(ev) = ctx.poll_event() {
    ///     if ev == Event::Quit { return AppControl::Exit; }
    /// }
    /// ```
    pub fn poll_event(&mut self) -> Option<Event> {
        self.events.poll()
    }

    pub fn renderer(&self) -> &Renderer {
        self.window.renderer()
    }
}
