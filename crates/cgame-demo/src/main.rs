//! Moving-sprite example: a blue box and a player image drifting right over
//! a red background. ESC or closing the window exits.

use anyhow::Result;

use cgame_engine::logging::{init_logging, LoggingConfig};
use cgame_engine::{
    image, AppControl, Color, Event, FrameCtx, Game, Key, LoadCtx, Renderer, Runtime,
    RuntimeConfig, Surface,
};

const PLAYER_IMAGE: &str = "assets/images/player.png";
const SPEED: f32 = 3.0;

struct Demo {
    blue_box: Surface,
    player: Surface,
    x: f32,
}

impl Demo {
    fn load(ctx: &mut LoadCtx<'_>) -> Result<Self> {
        let mut blue_box = Surface::new(ctx.renderer, 50.0, 100.0)?;
        blue_box.fill(Color::BLUE);

        let player = match image::load(ctx.renderer, PLAYER_IMAGE) {
            Ok(s) => s,
            Err(err) => {
                log::warn!("{err:#}; using a placeholder sprite");
                placeholder_player(ctx.renderer)?
            }
        };

        Ok(Self { blue_box, player, x: 100.0 })
    }
}

/// 32x32 checkerboard standing in for a missing sprite.
fn placeholder_player(renderer: &Renderer) -> Result<Surface> {
    const N: u32 = 32;
    let pixels: Vec<u8> = (0..N * N)
        .flat_map(|i| {
            let (x, y) = (i % N, i / N);
            if (x / 8 + y / 8) % 2 == 0 {
                Color::WHITE.to_array()
            } else {
                Color::rgb(40, 40, 40).to_array()
            }
        })
        .collect();
    Surface::from_rgba(renderer, N, N, &pixels)
}

impl Game for Demo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        while let Some(ev) = ctx.poll_event() {
            match ev {
                Event::Quit => return AppControl::Exit,
                Event::KeyDown { key: Key::Escape, .. } => return AppControl::Exit,
                _ => {}
            }
        }

        let window = &mut ctx.window;
        window.begin_frame(Color::RED);

        self.x += SPEED;
        window.blit(&self.blue_box, 100.0, 200.0);
        window.blit(&self.player, self.x, 400.0);

        window.end_frame()
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "CGame example".to_string(),
        width: 1280,
        height: 720,
        target_fps: 60,
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Demo::load)
}
