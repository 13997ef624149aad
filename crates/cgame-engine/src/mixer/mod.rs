//! Audio playback.
//!
//! [`Mixer`] owns the output device. [`Sound`]s are fully decoded and may
//! play on any number of channels at once; [`Music`] streams on a single
//! global channel.
//!
//! Volumes are given in `[0, 1]` and stored on a 128-step scale.

mod mixer;
mod music;
mod sound;

pub use mixer::{quantize_volume, AudioConfig, LoopMode, Mixer, MAX_VOLUME};
pub use music::Music;
pub use sound::Sound;

#[cfg(test)]
pub(crate) mod test_wav {
    /// Minimal mono 16-bit PCM WAV file.
    pub fn wav_bytes(samples: &[i16], rate: u32) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&rate.to_le_bytes());
        out.extend_from_slice(&(rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }
}
