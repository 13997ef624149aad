use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window as WinitWindow, WindowId};

use crate::core::{AppControl, FrameCtx, Game, LoadCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::translate::translate_window_event;
use crate::input::{EventQueue, InputState};
use crate::mixer::{AudioConfig, Mixer};
use crate::surface::Surface;
use crate::time::Clock;

use super::Window;

/// Caption used when none is configured.
pub const DEFAULT_TITLE: &str = "cgame window";

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Game area in pixels; also the initial logical window size.
    pub width: u32,
    pub height: u32,
    /// Frame cap; 0 runs uncapped (vsync still applies).
    pub target_fps: u32,
    pub resizable: bool,
    /// Destroy the window as soon as it is closed instead of waiting for the
    /// game to exit on [`Event::Quit`](crate::input::Event::Quit).
    pub exit_on_close: bool,
    pub audio: AudioConfig,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1280,
            height: 720,
            target_fps: 60,
            resizable: false,
            exit_on_close: false,
            audio: AudioConfig::default(),
            gpu: GpuInit::default(),
        }
    }
}

/// Runtime context passed to the game.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn quit(&mut self) {
        self.commands.push(Command::Quit);
    }

    pub fn set_caption(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetCaption(title.into()));
    }
}

#[derive(Debug)]
enum Command {
    Quit,
    SetCaption(String),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs `G` until it exits or the window closes.
    ///
    /// `init` runs once, after the window, GPU and mixer exist.
    pub fn run<G, F>(config: RuntimeConfig, init: F) -> Result<()>
    where
        G: Game + 'static,
        F: FnOnce(&mut LoadCtx<'_>) -> Result<G> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: WinitWindow,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<G, F> {
    config: RuntimeConfig,
    init: Option<F>,
    game: Option<G>,

    // Field order is drop order: the screen's texture goes before the device.
    screen: Option<Surface>,
    entry: Option<WindowEntry>,
    mixer: Option<Mixer>,

    input: InputState,
    events: EventQueue,
    clock: Clock,
    title: String,

    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<G, F> AppState<G, F>
where
    G: Game + 'static,
    F: FnOnce(&mut LoadCtx<'_>) -> Result<G> + 'static,
{
    fn new(config: RuntimeConfig, init: F) -> Self {
        let title = config.title.clone();
        Self {
            config,
            init: Some(init),
            game: None,
            screen: None,
            entry: None,
            mixer: None,
            input: InputState::default(),
            events: EventQueue::new(),
            clock: Clock::new(),
            title,
            exit_requested: false,
            error: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.request_exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = WinitWindow::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let renderer = entry.with_gpu(|gpu| gpu.renderer().clone());
        let screen = Surface::new(&renderer, self.config.width as f32, self.config.height as f32)
            .context("failed to create screen surface")?;
        let mixer = Mixer::open(&self.config.audio);

        let init = self.init.take().context("game already initialized")?;
        let game = init(&mut LoadCtx {
            renderer: &renderer,
            mixer: &mixer,
            width: self.config.width,
            height: self.config.height,
        })
        .context("game initialization failed")?;

        log::info!("window '{}' {}x{} ready", self.title, self.config.width, self.config.height);
        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        self.screen = Some(screen);
        self.mixer = Some(mixer);
        self.game = Some(game);
        self.clock.reset();
        Ok(())
    }

    fn close_window(&mut self) {
        self.game = None;
        self.screen = None;
        self.entry = None;
    }

    fn run_frame(&mut self) -> Option<RuntimeCtx> {
        let (Some(game), Some(screen), Some(entry), Some(mixer)) = (
            self.game.as_mut(),
            self.screen.as_mut(),
            self.entry.as_mut(),
            self.mixer.as_ref(),
        ) else {
            return None;
        };

        let time = self.clock.tick_frame(self.config.target_fps);
        let fps = self.clock.get_fps();
        let events = &mut self.events;
        let input = &self.input;
        let title = &mut self.title;
        let mut runtime_ctx = RuntimeCtx::default();
        let mut fatal = false;

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: Window::new(fields.window, fields.gpu, screen, title, &mut fatal),
                events,
                input,
                time,
                mixer,
                fps,
                runtime: &mut runtime_ctx,
            };
            game.on_frame(&mut ctx)
        });

        // Clear per-frame edges after the frame is consumed.
        self.input.end_frame();

        if control == AppControl::Exit || fatal {
            runtime_ctx.quit();
        }
        Some(runtime_ctx)
    }

    fn apply_commands(&mut self, ctx: RuntimeCtx) {
        for cmd in ctx.commands {
            match cmd {
                Command::Quit => self.request_exit(),
                Command::SetCaption(title) => {
                    if let Some(entry) = &self.entry {
                        entry.with_window(|w| w.set_title(&title));
                    }
                    self.title = title;
                }
            }
        }
    }
}

impl<G, F> ApplicationHandler for AppState<G, F>
where
    G: Game + 'static,
    F: FnOnce(&mut LoadCtx<'_>) -> Result<G> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            self.fail(err);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the clock paces frames.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.entry.as_mut() else { return };

        let scale = entry.with_window(|w| w.scale_factor());
        if let Some(ev) = translate_window_event(scale, &mut self.input, &event) {
            self.input.apply(&ev);
            self.events.push(ev);
        }

        match &event {
            WindowEvent::CloseRequested => {
                if self.config.exit_on_close {
                    log::info!("window closed");
                    self.close_window();
                    self.request_exit();
                } else {
                    log::debug!("close requested; waiting for the game to exit");
                }
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                if let Some(ctx) = self.run_frame() {
                    self.apply_commands(ctx);
                }
            }

            _ => {}
        }

        if self.exit_requested {
            self.close_window();
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_display_defaults() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.title, "cgame window");
        assert_eq!((cfg.width, cfg.height), (1280, 720));
        assert!(!cfg.exit_on_close);
    }

    #[test]
    fn runtime_commands_are_buffered_in_order() {
        let mut ctx = RuntimeCtx::default();
        ctx.set_caption("hello");
        ctx.quit();
        assert!(matches!(
            ctx.commands.as_slice(),
            [Command::SetCaption(t), Command::Quit] if t == "hello"
        ));
    }
}
