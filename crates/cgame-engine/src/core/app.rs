use super::ctx::FrameCtx;

/// Control directive returned by game callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Game contract driven by [`Runtime`](crate::window::Runtime).
pub trait Game {
    /// Called once per frame, after pacing and before input bookkeeping is
    /// reset. Poll events, update, draw and call
    /// [`Window::end_frame`](crate::window::Window::end_frame) here.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
