use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::{Decoder, Sink};

use super::mixer::{LoopMode, Mixer};

/// A streamed music track.
///
/// There is one music channel: playing a track replaces the current one, and
/// the control methods act on whatever is on the channel. Dropping a track
/// stops the channel if that track is the one playing.
pub struct Music {
    mixer: Mixer,
    track: u64,
    data: Arc<[u8]>,
}

impl Music {
    pub fn load(mixer: &Mixer, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("failed to read music {}", path.display()))?;
        Self::from_bytes(mixer, bytes).with_context(|| format!("failed to load music {}", path.display()))
    }

    /// Validates that `bytes` decode; decoding proper happens while playing.
    pub fn from_bytes(mixer: &Mixer, bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let data: Arc<[u8]> = bytes.into();
        Decoder::new(Cursor::new(data.clone())).context("failed to decode music")?;
        Ok(Self {
            mixer: mixer.clone(),
            track: mixer.next_track_id(),
            data,
        })
    }

    /// Starts this track on the music channel.
    pub fn play(&self, mode: LoopMode) {
        if let Some(sink) = self.mixer.new_sink() {
            self.play_on(sink, mode);
        }
    }

    fn play_on(&self, sink: Sink, mode: LoopMode) {
        let cursor = Cursor::new(self.data.clone());

        let appended = match mode {
            LoopMode::Once => Decoder::new(cursor).map(|src| sink.append(src)),
            LoopMode::Forever => Decoder::new_looped(cursor).map(|src| sink.append(src)),
        };
        if let Err(err) = appended {
            log::error!("failed to start music: {err}");
            return;
        }
        self.mixer.start_music(self.track, sink);
    }

    pub fn pause(&self) {
        self.mixer.pause_music();
    }

    pub fn resume(&self) {
        self.mixer.resume_music();
    }

    pub fn stop(&self) {
        self.mixer.stop_music();
    }

    /// Sets the music channel volume in `[0, 1]`.
    pub fn set_volume(&self, volume: f32) {
        self.mixer.set_music_volume(volume);
    }

    pub fn volume(&self) -> f32 {
        self.mixer.music_volume()
    }

    pub fn is_playing(&self) -> bool {
        self.mixer.is_music_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.mixer.is_music_paused()
    }
}

impl Drop for Music {
    fn drop(&mut self) {
        self.mixer.stop_track(self.track);
    }
}

impl std::fmt::Debug for Music {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Music").field("bytes", &self.data.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::test_wav::wav_bytes;

    #[test]
    fn silent_music_never_plays() {
        let music = Music::from_bytes(&Mixer::silent(), wav_bytes(&[0; 16], 8000)).expect("decode");
        music.play(LoopMode::Forever);
        assert!(!music.is_playing());
        assert!(!music.is_paused());
        music.pause();
        music.resume();
        music.stop();
    }

    #[test]
    fn volume_is_shared_through_the_mixer() {
        let mixer = Mixer::silent();
        let a = Music::from_bytes(&mixer, wav_bytes(&[0; 16], 8000)).expect("decode");
        let b = Music::from_bytes(&mixer, wav_bytes(&[0; 16], 8000)).expect("decode");
        a.set_volume(0.7);
        assert_eq!(b.volume(), 90.0 / 128.0);
    }

    #[test]
    fn dropping_the_playing_track_stops_the_channel() {
        let mixer = Mixer::silent();
        let music = Music::from_bytes(&mixer, wav_bytes(&[0; 16], 8000)).expect("decode");
        let (sink, _output) = Sink::new_idle();
        music.play_on(sink, LoopMode::Forever);
        assert!(mixer.is_music_playing());

        drop(music);
        assert!(!mixer.is_music_playing());
    }

    #[test]
    fn dropping_another_track_leaves_the_channel_alone() {
        let mixer = Mixer::silent();
        let playing = Music::from_bytes(&mixer, wav_bytes(&[0; 16], 8000)).expect("decode");
        let other = Music::from_bytes(&mixer, wav_bytes(&[0; 16], 8000)).expect("decode");
        let (sink, _output) = Sink::new_idle();
        playing.play_on(sink, LoopMode::Forever);

        drop(other);
        assert!(mixer.is_music_playing());
        assert!(playing.is_playing());
    }

    #[test]
    fn rejects_non_audio() {
        assert!(Music::from_bytes(&Mixer::silent(), b"xx".to_vec()).is_err());
    }
}
