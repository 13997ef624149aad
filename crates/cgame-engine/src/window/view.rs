use crate::coords::{Rect, Vec2};
use crate::core::AppControl;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::Renderer;
use crate::surface::Surface;

/// The on-screen window as seen from one frame.
///
/// Drawing goes to the screen surface, a texture the size of the game area;
/// [`end_frame`](Window::end_frame) stretches it over the swap-chain and
/// presents.
pub struct Window<'a, 'w> {
    window: &'a winit::window::Window,
    gpu: &'a mut Gpu<'w>,
    screen: &'a mut Surface,
    title: &'a mut String,
    fatal: &'a mut bool,
}

impl<'a, 'w> Window<'a, 'w> {
    pub(crate) fn new(
        window: &'a winit::window::Window,
        gpu: &'a mut Gpu<'w>,
        screen: &'a mut Surface,
        title: &'a mut String,
        fatal: &'a mut bool,
    ) -> Self {
        Self { window, gpu, screen, title, fatal }
    }

    /// Clears the screen surface to `color`.
    pub fn begin_frame(&mut self, color: Color) {
        self.screen.fill(color);
    }

    /// Draws `src` onto the screen at `(x, y)`.
    pub fn blit(&mut self, src: &Surface, x: f32, y: f32) {
        self.screen.blit(src, x, y);
    }

    pub fn blit_rect(&mut self, src: &Surface, rect: Rect) {
        self.screen.blit_rect(src, rect);
    }

    /// Submits pending drawing and presents the screen surface.
    ///
    /// Returns [`AppControl::Exit`] when the GPU can no longer present.
    pub fn end_frame(&mut self) -> AppControl {
        let frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                // Offscreen work still gets submitted.
                self.gpu.renderer().flush();
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("swap-chain is unusable; exiting");
                    *self.fatal = true;
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let size = self.gpu.size();
        let renderer = self.gpu.renderer();
        if let Some(tex) = self.screen.gpu_texture() {
            renderer.composite(&frame.view, self.gpu.surface_format(), (size.width, size.height), tex);
        }
        renderer.flush();

        self.window.pre_present_notify();
        self.gpu.present(frame);
        AppControl::Continue
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        title.clone_into(self.title);
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Width of the game area in pixels.
    pub fn width(&self) -> f32 {
        self.screen.width()
    }

    pub fn height(&self) -> f32 {
        self.screen.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn renderer(&self) -> &Renderer {
        self.gpu.renderer()
    }

    pub fn screen(&self) -> &Surface {
        &*self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Surface {
        &mut *self.screen
    }
}
