use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, Sink, Source};

use super::mixer::{quantize_volume, steps_to_gain, LoopMode, Mixer, MAX_VOLUME};

/// A fully decoded sound effect.
///
/// Every [`play`](Sound::play) starts a new channel, so the same sound can
/// overlap itself.
///
/// Dropping the sound stops its channels.
pub struct Sound {
    mixer: Mixer,
    samples: Arc<[f32]>,
    channels: u16,
    sample_rate: u32,
    volume: u8,
    playing: Vec<Sink>,
}

impl Sound {
    pub fn load(mixer: &Mixer, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("failed to read sound {}", path.display()))?;
        Self::from_bytes(mixer, bytes).with_context(|| format!("failed to load sound {}", path.display()))
    }

    /// Decodes an encoded sound file (WAV, OGG, FLAC, MP3) held in memory.
    pub fn from_bytes(mixer: &Mixer, bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let decoder = Decoder::new(Cursor::new(bytes.into())).context("failed to decode sound")?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Arc<[f32]> = decoder.convert_samples::<f32>().collect();

        Ok(Self {
            mixer: mixer.clone(),
            samples,
            channels,
            sample_rate,
            volume: MAX_VOLUME,
            playing: Vec::new(),
        })
    }

    /// Starts playback on a free channel.
    pub fn play(&mut self, mode: LoopMode) {
        self.playing.retain(|s| !s.empty());

        let Some(sink) = self.mixer.new_sink() else { return };
        sink.set_volume(steps_to_gain(self.volume));

        let source = SamplesBuffer::new(self.channels, self.sample_rate, self.samples.to_vec());
        match mode {
            LoopMode::Once => sink.append(source),
            LoopMode::Forever => sink.append(source.repeat_infinite()),
        }
        self.playing.push(sink);
    }

    /// Halts every channel playing this sound.
    pub fn stop(&mut self) {
        for sink in self.playing.drain(..) {
            sink.stop();
        }
    }

    /// Sets the volume in `[0, 1]` for current and future plays.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = quantize_volume(volume);
        let gain = steps_to_gain(self.volume);
        for sink in &self.playing {
            sink.set_volume(gain);
        }
    }

    /// Volume after quantization.
    pub fn volume(&self) -> f32 {
        steps_to_gain(self.volume)
    }

    /// Length of the decoded audio.
    pub fn duration(&self) -> std::time::Duration {
        let frames = self.samples.len() as u64 / u64::from(self.channels.max(1));
        std::time::Duration::from_nanos(frames * 1_000_000_000 / u64::from(self.sample_rate.max(1)))
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound")
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("samples", &self.samples.len())
            .field("volume", &self.volume)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::test_wav::wav_bytes;

    #[test]
    fn decodes_wav_through_silent_mixer() {
        let mixer = Mixer::silent();
        let mut sound = Sound::from_bytes(&mixer, wav_bytes(&[0, 1000, -1000, 0], 8000)).expect("decode");
        assert_eq!(sound.channels(), 1);
        assert_eq!(sound.sample_rate(), 8000);
        assert_eq!(sound.duration(), std::time::Duration::from_micros(500));

        // No device: playing is a no-op.
        sound.play(LoopMode::Forever);
        sound.stop();
    }

    #[test]
    fn volume_is_quantized() {
        let mut sound = Sound::from_bytes(&Mixer::silent(), wav_bytes(&[0; 8], 8000)).expect("decode");
        assert_eq!(sound.volume(), 1.0);
        sound.set_volume(0.5);
        assert_eq!(sound.volume(), 0.5);
        sound.set_volume(3.0);
        assert_eq!(sound.volume(), 1.0);
    }

    #[test]
    fn rejects_non_audio() {
        assert!(Sound::from_bytes(&Mixer::silent(), b"no audio here".to_vec()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Sound::load(&Mixer::silent(), "/nonexistent/cgame/beep.wav").unwrap_err();
        assert!(format!("{err:#}").contains("beep.wav"));
    }
}
