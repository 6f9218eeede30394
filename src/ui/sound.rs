/// Sound effects: short procedural tones via rodio.
///
/// Every cue is synthesized once into an in-memory WAV buffer at start-up and
/// played fire-and-forget through a detached Sink.
///
/// Without the "sound" feature the stub SoundEngine does nothing.

use crate::sim::event::GameEvent;

/// Which effect an event should trigger.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Eat,
    LevelUp,
    Crash,
}

pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::FoodEaten { .. } => Some(Cue::Eat),
        GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
        GameEvent::Crashed { .. } => Some(Cue::Crash),
        _ => None,
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Cue;

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        eat: Arc<Vec<u8>>,
        level_up: Arc<Vec<u8>>,
        crash: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        /// `None` when no output device can be opened.
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("no audio output: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                eat: Arc::new(make_wav(&gen_eat())),
                level_up: Arc::new(make_wav(&gen_level_up())),
                crash: Arc::new(make_wav(&gen_crash())),
            })
        }

        pub fn play(&self, cue: Cue) {
            let buf = match cue {
                Cue::Eat => &self.eat,
                Cue::LevelUp => &self.level_up,
                Cue::Crash => &self.crash,
            };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                if let Ok(src) = rodio::Decoder::new(Cursor::new(buf.as_ref().clone())) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveforms: mono f32 samples
    // ════════════════════════════════════════════════════════════

    /// Notes played back to back, each with a linear decay to `sustain`.
    fn notes(seq: &[(f32, f32)], sustain: f32, volume: f32) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(freq, secs) in seq {
            let n = (SAMPLE_RATE as f32 * secs) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * (1.0 - sustain);
                let wave = (t * freq * TAU).sin() * 0.75 + (t * freq * 2.0 * TAU).sin() * 0.25;
                samples.push(wave * env * volume);
            }
        }
        samples
    }

    /// Eat: two quick rising chirps.
    fn gen_eat() -> Vec<f32> {
        notes(&[(880.0, 0.04), (1320.0, 0.05)], 0.0, 0.25)
    }

    /// Level up: major arpeggio with a held top note.
    fn gen_level_up() -> Vec<f32> {
        notes(&[(523.0, 0.08), (659.0, 0.08), (784.0, 0.08), (1047.0, 0.3)], 0.4, 0.3)
    }

    /// Crash: falling sweep over a noise burst.
    fn gen_crash() -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * 0.45) as usize;
        let mut rng = StdRng::seed_from_u64(0x9e37_79b9);
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 420.0 - t * 300.0;
                phase += freq * TAU / SAMPLE_RATE as f32;
                let noise: f32 = rng.gen_range(-1.0..1.0);
                (phase.sin() * 0.6 + noise * 0.4 * (1.0 - t)) * (1.0 - t) * 0.3
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder: 16-bit PCM mono
    // ════════════════════════════════════════════════════════════

    pub(super) fn make_wav(samples: &[f32]) -> Vec<u8> {
        const CHANNELS: u16 = 1;
        const BITS: u16 = 16;
        let block_align = CHANNELS * BITS / 8;
        let byte_rate = SAMPLE_RATE * block_align as u32;
        let data_size = samples.len() as u32 * block_align as u32;

        let mut buf = Vec::with_capacity(44 + data_size as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVEfmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&CHANNELS.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&BITS.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            buf.extend_from_slice(&((s.clamp(-1.0, 1.0) * 32767.0) as i16).to_le_bytes());
        }
        buf
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn wav_header_sizes() {
            let wav = make_wav(&[0.0, 1.0, -1.0]);
            assert_eq!(wav.len(), 44 + 6);
            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 36 + 6);
            assert_eq!(&wav[8..16], b"WAVEfmt ");
            assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 6);
            assert_eq!(i16::from_le_bytes([wav[46], wav[47]]), 32767);
        }

        #[test]
        fn cues_are_short_and_in_range() {
            for samples in [gen_eat(), gen_level_up(), gen_crash()] {
                assert!(!samples.is_empty());
                assert!(samples.len() < SAMPLE_RATE as usize);
                assert!(samples.iter().all(|s| s.abs() <= 1.0));
            }
        }

        #[test]
        fn crash_noise_is_repeatable() {
            assert_eq!(gen_crash(), gen_crash());
        }
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> {
        Some(SoundEngine)
    }
    pub fn play(&self, _cue: Cue) {}
}

impl SoundEngine {
    pub fn handle(&self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(cue_for) {
            self.play(cue);
        }
    }
}
