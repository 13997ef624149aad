use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame budget for a target rate, in whole milliseconds.
///
/// Returns `None` when `fps` is 0 (uncapped).
#[inline]
pub fn frame_budget(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_millis(u64::from(1000 / fps)))
}

/// Frame-pacing clock.
///
/// Call [`tick`](Clock::tick) once per frame. With a non-zero `fps` the call
/// sleeps until the frame budget since the previous tick is spent, which caps
/// the loop at roughly that rate.
#[derive(Debug, Clone)]
pub struct Clock {
    last: Instant,
    frame_index: u64,
    current_fps: f32,
    max_dt: Option<Duration>,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            current_fps: 0.0,
            max_dt: None,
        }
    }

    /// Clamps reported delta times to `max_dt`.
    ///
    /// Long stalls (window drag, debugger) otherwise show up as one huge step.
    /// Pacing and [`get_fps`](Clock::get_fps) still use the real elapsed time.
    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self { max_dt: Some(max_dt), ..Self::new() }
    }

    /// Resets the baseline to now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the seconds since the previous tick.
    pub fn tick(&mut self, fps: u32) -> f32 {
        self.tick_frame(fps).dt
    }

    /// Like [`tick`](Clock::tick) but returns the whole [`FrameTime`].
    pub fn tick_frame(&mut self, fps: u32) -> FrameTime {
        if let Some(budget) = frame_budget(fps) {
            let spent = self.last.elapsed();
            if budget > spent {
                std::thread::sleep(budget - spent);
            }
        }

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        let secs = elapsed.as_secs_f32();
        self.current_fps = if secs > 0.0 { 1.0 / secs } else { 0.0 };

        let dt = match self.max_dt {
            Some(max) if elapsed > max => max.as_secs_f32(),
            _ => secs,
        };

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Frame rate measured at the last tick.
    pub fn get_fps(&self) -> f32 {
        self.current_fps
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
