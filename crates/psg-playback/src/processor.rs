//! The realtime playback processor.
//!
//! Re-plays a decoded YM archive by driving the emulator at the recorded
//! frame rate while resampling its output to the host sample rate. Two
//! fractional accumulators decide, per output frame, whether to consume a
//! register frame (music clock) and how often to tick the chip (sound
//! clock).

use std::path::Path;

use parking_lot::Mutex;
use psg_core::Emulator;
use ym_format::Archive;

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::loader;

/// Live register count of a frame record; bytes 14/15 are padding.
const LIVE_REGISTERS: usize = 14;

/// Music-clock accumulator: when to push the next register frame.
#[derive(Clone, Copy, Debug, Default)]
struct MusicClock {
    ticks: u32,
    clock: u32,
    index: u32,
    count: u32,
}

/// Sound-clock accumulator: when to tick the emulator.
#[derive(Clone, Copy, Debug, Default)]
struct SoundClock {
    ticks: u32,
    clock: u32,
}

/// Everything the audio thread touches, behind the loader lock.
struct ProcessorState {
    archive: Archive,
    emulator: Emulator,
    music: MusicClock,
    sound: SoundClock,
}

impl ProcessorState {
    fn advance_music(&mut self, samplerate: u32) {
        self.music.ticks += self.music.clock;
        while self.music.ticks >= samplerate {
            self.step_music();
            self.music.ticks -= samplerate;
        }
    }

    fn step_music(&mut self) {
        if self.music.index >= self.music.count {
            return;
        }
        self.music.index += 1;
        if self.music.index < self.music.count {
            let frame = self.archive.frames[self.music.index as usize];
            for (register, &value) in frame.data.iter().enumerate().take(LIVE_REGISTERS) {
                // 0xFF in the shape register is the dump's "leave the
                // envelope alone" sentinel; rewriting it would retrigger.
                if register == 13 && value == 0xff {
                    continue;
                }
                self.emulator.set_index(register as u8);
                self.emulator.set_value(value);
            }
        } else {
            self.emulator.reset();
        }
    }

    fn advance_sound(&mut self, samplerate: u32) {
        self.sound.ticks += self.sound.clock;
        while self.sound.ticks >= samplerate {
            self.emulator.clock();
            self.sound.ticks -= samplerate;
        }
    }
}

/// Drives the emulator from a decoded archive on a realtime thread.
///
/// A single mutex (the loader lock) serializes [`load`](Self::load) against
/// [`process`](Self::process) and [`playing`](Self::playing). The audio
/// thread holds it for the duration of one output buffer; nothing inside
/// `process` allocates or performs I/O.
pub struct PlaybackProcessor {
    channels: u16,
    sample_rate: u32,
    state: Mutex<ProcessorState>,
}

impl PlaybackProcessor {
    /// Build a processor for the given device shape. `channels` must be
    /// 1 or 2.
    pub fn new(config: PlayerConfig) -> Self {
        debug_assert!(matches!(config.channels, 1 | 2));
        debug_assert!(config.sample_rate > 0);
        Self {
            channels: config.channels,
            sample_rate: config.sample_rate,
            state: Mutex::new(ProcessorState {
                archive: Archive::default(),
                emulator: Emulator::new(config.chip),
                music: MusicClock::default(),
                sound: SoundClock::default(),
            }),
        }
    }

    /// Output channel count, 1 or 2.
    pub fn channel_count(&self) -> u16 {
        self.channels
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Load a file: a plain YM stream, or an LHA archive whose first
    /// member is one.
    ///
    /// Decoding happens before the loader lock is taken, so a failed load
    /// leaves the current archive playing (or playable) untouched.
    pub fn load(&self, path: &Path) -> Result<()> {
        let archive = loader::read_archive(path)?;
        log::info!(
            "{}: {} frames at {} Hz, chip clock {} Hz",
            path.display(),
            archive.header.frames,
            archive.header.framerate,
            archive.header.frequency,
        );
        if !archive.infos.title.is_empty() {
            log::info!("{} - {}", archive.infos.title, archive.infos.author);
        }
        self.install(archive);
        Ok(())
    }

    /// Install a decoded archive and rewind both accumulators to its
    /// header values.
    pub fn install(&self, archive: Archive) {
        let mut state = self.state.lock();
        state.music = MusicClock {
            ticks: 0,
            clock: u32::from(archive.header.framerate),
            index: 0,
            count: archive.header.frames,
        };
        state.sound = SoundClock {
            ticks: 0,
            clock: archive.header.frequency,
        };
        state.archive = archive;
    }

    /// Whether the current archive still has frames to play.
    pub fn playing(&self) -> bool {
        let state = self.state.lock();
        state.music.index < state.music.count
    }

    /// Render interleaved f32 frames into `output`.
    ///
    /// The buffer length must be a multiple of the channel count; each
    /// frame advances the music and sound accumulators, then mixes the
    /// emulator's three channels. Mono is the plain average; stereo pans
    /// channel A left, channel C right and keeps channel B centred.
    pub fn process(&self, output: &mut [f32]) {
        let channels = usize::from(self.channels);
        let frames = output.len() / channels;
        let samplerate = self.sample_rate;

        let mut state = self.state.lock();
        for frame in 0..frames {
            state.advance_music(samplerate);
            state.advance_sound(samplerate);
            let (c0, c1, c2) = state.emulator.channel_outputs();
            if channels == 1 {
                output[frame] = (c0 + c1 + c2) / 3.0;
            } else {
                output[frame * 2] = (c0 * 0.75 + c1 * 0.50 + c2 * 0.25) / 1.5;
                output[frame * 2 + 1] = (c0 * 0.25 + c1 * 0.50 + c2 * 0.75) / 1.5;
            }
        }
    }

    /// Snapshot of the emulator register file, for displays and tests.
    pub fn register_snapshot(&self) -> [u8; 16] {
        let mut state = self.state.lock();
        let mut registers = [0u8; 16];
        for (index, slot) in registers.iter_mut().enumerate() {
            state.emulator.set_index(index as u8);
            *slot = state.emulator.get_value();
        }
        registers
    }

    /// Metadata of the loaded archive.
    pub fn infos(&self) -> ym_format::Infos {
        self.state.lock().archive.infos.clone()
    }
}
