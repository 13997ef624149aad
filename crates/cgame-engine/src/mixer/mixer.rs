use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rodio::{OutputStream, OutputStreamHandle, Sink};

/// Number of volume steps; `MAX_VOLUME` is full volume.
pub const MAX_VOLUME: u8 = 128;

/// Clamps `volume` to `[0, 1]` and maps it onto `0..=MAX_VOLUME`, rounding
/// to nearest.
pub fn quantize_volume(volume: f32) -> u8 {
    if volume.is_nan() {
        return 0;
    }
    (volume.clamp(0.0, 1.0) * MAX_VOLUME as f32 + 0.5) as u8
}

#[inline]
pub(crate) fn steps_to_gain(steps: u8) -> f32 {
    steps as f32 / MAX_VOLUME as f32
}

/// How many times a sound or music track plays.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopMode {
    /// Play once.
    #[default]
    Once,
    /// Repeat until stopped.
    Forever,
}

impl LoopMode {
    pub const LOOP_NONE: i32 = 0;
    pub const LOOP_INFINITE: i32 = -1;

    /// Maps the classic loop count (`0` once, `-1` forever).
    pub fn from_loops(loops: i32) -> Self {
        if loops == Self::LOOP_INFINITE {
            LoopMode::Forever
        } else {
            LoopMode::Once
        }
    }

    pub fn loops(self) -> i32 {
        match self {
            LoopMode::Once => Self::LOOP_NONE,
            LoopMode::Forever => Self::LOOP_INFINITE,
        }
    }
}

/// Audio output settings.
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Open the default output device. When false the mixer is silent.
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

struct Output {
    // Dropping the stream closes the device.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// The sink on the music channel and the track that started it.
struct MusicChannel {
    track: u64,
    sink: Sink,
}

struct Inner {
    output: Option<Output>,
    music: RefCell<Option<MusicChannel>>,
    music_volume: Cell<u8>,
    next_track: Cell<u64>,
}

/// Shared handle to the audio output.
///
/// A mixer without a device is "silent": loading still decodes, playing
/// does nothing.
#[derive(Clone)]
pub struct Mixer {
    inner: Rc<Inner>,
}

impl Mixer {
    /// Opens the default output device, falling back to a silent mixer.
    pub fn open(config: &AudioConfig) -> Self {
        if !config.enabled {
            log::info!("audio disabled");
            return Self::silent();
        }
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("audio output opened");
                Self::with_output(Some(Output { _stream: stream, handle }))
            }
            Err(err) => {
                log::error!("failed to open audio output: {err}");
                Self::silent()
            }
        }
    }

    /// A mixer with no output device.
    pub fn silent() -> Self {
        Self::with_output(None)
    }

    fn with_output(output: Option<Output>) -> Self {
        Self {
            inner: Rc::new(Inner {
                output,
                music: RefCell::new(None),
                music_volume: Cell::new(MAX_VOLUME),
                next_track: Cell::new(0),
            }),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.inner.output.is_none()
    }

    /// A fresh, idle channel; `None` on a silent mixer.
    pub(crate) fn new_sink(&self) -> Option<Sink> {
        let output = self.inner.output.as_ref()?;
        match Sink::try_new(&output.handle) {
            Ok(sink) => Some(sink),
            Err(err) => {
                log::error!("failed to allocate audio channel: {err}");
                None
            }
        }
    }

    /// Identifier for a newly loaded music track, unique within this mixer.
    pub(crate) fn next_track_id(&self) -> u64 {
        let id = self.inner.next_track.get();
        self.inner.next_track.set(id + 1);
        id
    }

    /// Replaces the music channel; whatever was playing stops.
    pub(crate) fn start_music(&self, track: u64, sink: Sink) {
        sink.set_volume(steps_to_gain(self.inner.music_volume.get()));
        if let Some(old) = self.inner.music.replace(Some(MusicChannel { track, sink })) {
            old.sink.stop();
        }
    }

    pub fn pause_music(&self) {
        if let Some(ch) = self.inner.music.borrow().as_ref() {
            ch.sink.pause();
        }
    }

    pub fn resume_music(&self) {
        if let Some(ch) = self.inner.music.borrow().as_ref() {
            ch.sink.play();
        }
    }

    pub fn stop_music(&self) {
        if let Some(ch) = self.inner.music.take() {
            ch.sink.stop();
        }
    }

    /// Stops the music channel only if `track` is what it is playing.
    pub(crate) fn stop_track(&self, track: u64) {
        let mut music = self.inner.music.borrow_mut();
        if music.as_ref().is_some_and(|ch| ch.track == track) {
            if let Some(ch) = music.take() {
                ch.sink.stop();
            }
        }
    }

    /// Sets the music volume in `[0, 1]`.
    pub fn set_music_volume(&self, volume: f32) {
        let steps = quantize_volume(volume);
        self.inner.music_volume.set(steps);
        if let Some(ch) = self.inner.music.borrow().as_ref() {
            ch.sink.set_volume(steps_to_gain(steps));
        }
    }

    /// Music volume after quantization.
    pub fn music_volume(&self) -> f32 {
        steps_to_gain(self.inner.music_volume.get())
    }

    /// True while a track is on the music channel, paused or not.
    pub fn is_music_playing(&self) -> bool {
        self.inner.music.borrow().as_ref().is_some_and(|ch| !ch.sink.empty())
    }

    pub fn is_music_paused(&self) -> bool {
        self.inner
            .music
            .borrow()
            .as_ref()
            .is_some_and(|ch| !ch.sink.empty() && ch.sink.is_paused())
    }
}

impl std::fmt::Debug for Mixer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mixer")
            .field("silent", &self.is_silent())
            .field("music_volume", &self.inner.music_volume.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        assert_eq!(quantize_volume(-1.0), 0);
        assert_eq!(quantize_volume(2.0), MAX_VOLUME);
        assert_eq!(quantize_volume(f32::NAN), 0);
    }

    #[test]
    fn volume_rounds_to_nearest_step() {
        assert_eq!(quantize_volume(0.5), 64);
        // 0.3 * 128 = 38.4
        assert_eq!(quantize_volume(0.3), 38);
        // 0.7 * 128 = 89.6
        assert_eq!(quantize_volume(0.7), 90);
    }

    #[test]
    fn loop_counts_round_trip() {
        assert_eq!(LoopMode::from_loops(-1), LoopMode::Forever);
        assert_eq!(LoopMode::from_loops(0), LoopMode::Once);
        assert_eq!(LoopMode::Forever.loops(), LoopMode::LOOP_INFINITE);
    }

    #[test]
    fn silent_mixer_tracks_music_volume() {
        let mixer = Mixer::silent();
        assert!(mixer.is_silent());
        assert_eq!(mixer.music_volume(), 1.0);
        mixer.set_music_volume(0.25);
        assert_eq!(mixer.music_volume(), 0.25);
        assert!(!mixer.is_music_playing());
        mixer.pause_music();
        mixer.stop_music();
    }

    #[test]
    fn disabled_config_is_silent() {
        assert!(Mixer::open(&AudioConfig { enabled: false }).is_silent());
    }
}
