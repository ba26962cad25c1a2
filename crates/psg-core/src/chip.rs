//! AY/YM chip core.
//!
//! The emulator models the register file, the three tone channels, the
//! noise generator, the envelope generator and the DAC of the AY-3-8910
//! family and the YM2149. It is driven one chip-clock tick at a time; the
//! internal divide-by-8 performs one generator sub-tick and one output
//! update on every eighth call.

use crate::bridge::{InertPorts, PortBridge};
use crate::generators::{EnvelopeGenerator, NoiseGenerator, NUM_CHANNELS, ToneChannel};
use crate::registers::{self, REGISTER_MASK};
use crate::tables::{AY_DAC, YM_DAC};

/// Supported chip variants.
///
/// The variant only selects the DAC ladder: the AY parts resolve 16 volume
/// steps, the YM2149 resolves 32.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChipVariant {
    /// General Instrument AY-3-8910.
    #[default]
    Ay8910,
    /// AY-3-8912 (28-pin package, port B absent on the die but present in
    /// the register file).
    Ay8912,
    /// AY-3-8913 (24-pin package, no I/O ports on the die).
    Ay8913,
    /// Yamaha YM2149.
    Ym2149,
}

impl ChipVariant {
    fn dac(self) -> &'static [f32; 32] {
        match self {
            ChipVariant::Ay8910 | ChipVariant::Ay8912 | ChipVariant::Ay8913 => &AY_DAC,
            ChipVariant::Ym2149 => &YM_DAC,
        }
    }
}

/// Per-channel DAC output, refreshed on every sub-tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Output {
    /// Channel A level in [0.0, 1.0].
    pub channel0: f32,
    /// Channel B level in [0.0, 1.0].
    pub channel1: f32,
    /// Channel C level in [0.0, 1.0].
    pub channel2: f32,
}

/// The PSG emulator.
///
/// Generic over the [`PortBridge`] wired to registers 0x0E/0x0F; the
/// default [`InertPorts`] bridge is what a standalone player uses. The
/// bridge is resolved statically, there is no dynamic dispatch on the
/// register path.
#[derive(Debug)]
pub struct Emulator<B: PortBridge = InertPorts> {
    variant: ChipVariant,
    bridge: B,
    dac: &'static [f32; 32],
    ticks: u32,
    index: u8,
    regs: [u8; 16],
    tone_enable: [u8; NUM_CHANNELS],
    noise_enable: [u8; NUM_CHANNELS],
    port_output: [bool; 2],
    tones: [ToneChannel; NUM_CHANNELS],
    noise: NoiseGenerator,
    envelope: EnvelopeGenerator,
    output: Output,
}

impl Emulator<InertPorts> {
    /// Create an emulator with inert I/O ports.
    pub fn new(variant: ChipVariant) -> Self {
        Self::with_bridge(variant, InertPorts)
    }
}

impl<B: PortBridge> Emulator<B> {
    /// Create an emulator with a host-supplied port bridge.
    pub fn with_bridge(variant: ChipVariant, bridge: B) -> Self {
        let mut emulator = Self {
            variant,
            bridge,
            dac: variant.dac(),
            ticks: 0,
            index: 0,
            regs: [0; 16],
            tone_enable: [0; NUM_CHANNELS],
            noise_enable: [0; NUM_CHANNELS],
            port_output: [false; 2],
            tones: [ToneChannel::default(); NUM_CHANNELS],
            noise: NoiseGenerator::default(),
            envelope: EnvelopeGenerator::default(),
            output: Output::default(),
        };
        emulator.reset();
        emulator
    }

    /// The chip variant this emulator was built for.
    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    /// Zero the whole generator state, the register file and the output.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.index = 0;
        self.regs = [0; 16];
        self.tone_enable = [0; NUM_CHANNELS];
        self.noise_enable = [0; NUM_CHANNELS];
        self.port_output = [false; 2];
        for tone in &mut self.tones {
            tone.reset();
        }
        self.noise.reset();
        self.envelope.reset();
        self.output = Output::default();
    }

    /// Latch the selected register index. The full byte is kept; only the
    /// low nibble addresses the register file.
    pub fn set_index(&mut self, index: u8) -> u8 {
        self.index = index;
        index
    }

    /// Write the selected register, propagating the masked value into the
    /// affected generator. Returns the value as stored.
    pub fn set_value(&mut self, mut value: u8) -> u8 {
        let reg = self.index & 0x0f;
        match reg {
            registers::CHANNEL_A_FINE_TUNE => {
                value &= 0xff;
                self.tones[0].set_fine_tune(value);
            }
            registers::CHANNEL_A_COARSE_TUNE => {
                value &= 0x0f;
                self.tones[0].set_coarse_tune(value);
            }
            registers::CHANNEL_B_FINE_TUNE => {
                value &= 0xff;
                self.tones[1].set_fine_tune(value);
            }
            registers::CHANNEL_B_COARSE_TUNE => {
                value &= 0x0f;
                self.tones[1].set_coarse_tune(value);
            }
            registers::CHANNEL_C_FINE_TUNE => {
                value &= 0xff;
                self.tones[2].set_fine_tune(value);
            }
            registers::CHANNEL_C_COARSE_TUNE => {
                value &= 0x0f;
                self.tones[2].set_coarse_tune(value);
            }
            registers::NOISE_PERIOD => {
                value &= 0x1f;
                self.noise.set_period(value);
            }
            registers::MIXER_AND_IO_CONTROL => {
                value &= 0xff;
                self.set_mixer_and_io_control(value);
            }
            registers::CHANNEL_A_AMPLITUDE => {
                value &= 0x1f;
                self.tones[0].set_amplitude(value);
            }
            registers::CHANNEL_B_AMPLITUDE => {
                value &= 0x1f;
                self.tones[1].set_amplitude(value);
            }
            registers::CHANNEL_C_AMPLITUDE => {
                value &= 0x1f;
                self.tones[2].set_amplitude(value);
            }
            registers::ENVELOPE_FINE_TUNE => {
                value &= 0xff;
                self.envelope.set_fine_tune(value);
            }
            registers::ENVELOPE_COARSE_TUNE => {
                value &= 0xff;
                self.envelope.set_coarse_tune(value);
            }
            registers::ENVELOPE_SHAPE => {
                value &= 0x0f;
                self.envelope.set_shape(value);
            }
            registers::IO_PORT_A => {
                value &= 0xff;
                // The bridge observes the transfer; the register file
                // always latches the programmed byte.
                if self.port_output[0] {
                    self.bridge.port_a_write(value);
                }
            }
            registers::IO_PORT_B => {
                value &= 0xff;
                if self.port_output[1] {
                    self.bridge.port_b_write(value);
                }
            }
            _ => return value,
        }
        self.regs[usize::from(reg)] = value;
        value
    }

    /// Read the selected register. Ports configured as inputs are routed
    /// through the bridge; everything else returns the masked stored value.
    pub fn get_value(&mut self) -> u8 {
        let reg = usize::from(self.index & 0x0f);
        let value = self.regs[reg] & REGISTER_MASK[reg];
        match reg as u8 {
            registers::IO_PORT_A if !self.port_output[0] => self.bridge.port_a_read(value),
            registers::IO_PORT_B if !self.port_output[1] => self.bridge.port_b_read(value),
            _ => value,
        }
    }

    /// Advance the chip by one clock tick.
    ///
    /// Seven ticks out of eight change nothing observable; the eighth
    /// performs one generator sub-tick and refreshes the output frame.
    pub fn clock(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks & 0x07 != 0 {
            return;
        }
        self.align_tones();
        for tone in &mut self.tones {
            tone.step();
        }
        self.noise.step();
        self.envelope.step();
        self.refresh_output();
    }

    /// Current three-channel output frame.
    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Current three-channel output frame as a tuple.
    pub fn channel_outputs(&self) -> (f32, f32, f32) {
        (self.output.channel0, self.output.channel1, self.output.channel2)
    }

    /// Current envelope level (0x00-0x1F), for hosts that display it.
    pub fn envelope_level(&self) -> u8 {
        self.envelope.amplitude
    }

    fn set_mixer_and_io_control(&mut self, value: u8) {
        // Active-low enables: a clear bit turns the source on.
        self.tone_enable[0] = u8::from(value & 0x01 == 0);
        self.tone_enable[1] = u8::from(value & 0x02 == 0);
        self.tone_enable[2] = u8::from(value & 0x04 == 0);
        self.noise_enable[0] = u8::from(value & 0x08 == 0);
        self.noise_enable[1] = u8::from(value & 0x10 == 0);
        self.noise_enable[2] = u8::from(value & 0x20 == 0);
        self.port_output[0] = value & 0x40 != 0;
        self.port_output[1] = value & 0x80 != 0;
    }

    /// Re-synchronize tone channels that share a period.
    ///
    /// The real chip's tone generators collapse onto a common comparator
    /// when programmed in unison; without this the three counters drift
    /// apart and dense chords phase audibly.
    fn align_tones(&mut self) {
        for (lhs, rhs) in [(0usize, 1usize), (0, 2), (1, 2)] {
            if self.tones[lhs].period == self.tones[rhs].period
                && self.tones[lhs].counter != self.tones[rhs].counter
            {
                self.tones[rhs].counter = self.tones[lhs].counter;
                self.tones[rhs].phase = self.tones[lhs].phase;
            }
        }
    }

    fn refresh_output(&mut self) {
        self.output.channel0 = self.channel_level(0);
        self.output.channel1 = self.channel_level(1);
        self.output.channel2 = self.channel_level(2);
    }

    #[inline]
    fn channel_level(&self, channel: usize) -> f32 {
        let tone = &self.tones[channel];
        let sound = tone.phase & self.tone_enable[channel];
        let noise = self.noise.phase & self.noise_enable[channel];
        let level = if tone.amplitude & 0x20 != 0 {
            self.envelope.amplitude & 0x1f
        } else {
            tone.amplitude & 0x1f
        };
        self.dac[usize::from((sound | noise) * level)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(emulator: &mut Emulator, reg: u8, value: u8) {
        emulator.set_index(reg);
        emulator.set_value(value);
    }

    #[test]
    fn register_writes_are_masked_on_read_back() {
        let mut emulator = Emulator::new(ChipVariant::Ay8910);
        for reg in 0u8..16 {
            for value in [0x00u8, 0x5a, 0xa5, 0xff] {
                write(&mut emulator, reg, value);
                assert_eq!(
                    emulator.get_value(),
                    value & REGISTER_MASK[usize::from(reg)],
                    "register {reg:#04x}, value {value:#04x}"
                );
            }
        }
    }

    #[test]
    fn index_selects_through_its_low_nibble() {
        let mut emulator = Emulator::new(ChipVariant::Ym2149);
        // 0x4D aliases the envelope shape register.
        emulator.set_index(0x4d);
        emulator.set_value(0x3e);
        assert_eq!(emulator.get_value(), 0x0e);
        emulator.set_index(registers::ENVELOPE_SHAPE);
        assert_eq!(emulator.get_value(), 0x0e);
    }

    #[test]
    fn output_only_changes_on_the_eighth_tick() {
        let mut emulator = Emulator::new(ChipVariant::Ay8910);
        // Tone A at period 0 toggles on every sub-tick, full fixed level.
        write(&mut emulator, registers::MIXER_AND_IO_CONTROL, 0x3e);
        write(&mut emulator, registers::CHANNEL_A_AMPLITUDE, 0x0f);

        for tick in 1..=16u32 {
            let before = *emulator.output();
            emulator.clock();
            let changed = *emulator.output() != before;
            assert_eq!(changed, tick % 8 == 0, "tick {tick}");
        }
    }

    #[test]
    fn square_wave_edge_count_matches_period() {
        let mut emulator = Emulator::new(ChipVariant::Ay8910);
        // Period 250 at a 2 MHz clock: a phase toggle every 2000 ticks.
        write(&mut emulator, registers::CHANNEL_A_FINE_TUNE, 0xfa);
        write(&mut emulator, registers::CHANNEL_A_COARSE_TUNE, 0x00);
        write(&mut emulator, registers::MIXER_AND_IO_CONTROL, 0x3e);
        write(&mut emulator, registers::CHANNEL_A_AMPLITUDE, 0x0f);

        let mut edges = 0u32;
        let mut level = emulator.output().channel0;
        for _ in 0..2_000_000u32 {
            emulator.clock();
            let now = emulator.output().channel0;
            if now != level {
                assert!(now == 0.0 || now == AY_DAC[0x1f]);
                edges += 1;
                level = now;
            }
        }
        assert_eq!(edges, 1000);
    }

    #[test]
    fn envelope_triangle_steps_every_128_ticks() {
        let mut emulator = Emulator::new(ChipVariant::Ym2149);
        write(&mut emulator, registers::ENVELOPE_FINE_TUNE, 0x10);
        write(&mut emulator, registers::ENVELOPE_COARSE_TUNE, 0x00);
        write(&mut emulator, registers::ENVELOPE_SHAPE, 0x0e);
        assert_eq!(emulator.envelope_level(), 0x00);

        // Period 16, sub-tick every 8 ticks: one envelope step per 128 ticks.
        for expected in 1..=0x1fu8 {
            for _ in 0..128 {
                emulator.clock();
            }
            assert_eq!(emulator.envelope_level(), expected);
        }
        for expected in (0x00..=0x1eu8).rev() {
            for _ in 0..128 {
                emulator.clock();
            }
            assert_eq!(emulator.envelope_level(), expected);
        }
    }

    #[test]
    fn envelope_flag_routes_shared_level() {
        let mut emulator = Emulator::new(ChipVariant::Ym2149);
        write(&mut emulator, registers::MIXER_AND_IO_CONTROL, 0x3e);
        write(&mut emulator, registers::CHANNEL_A_AMPLITUDE, 0x10);
        write(&mut emulator, registers::ENVELOPE_FINE_TUNE, 0x01);
        write(&mut emulator, registers::ENVELOPE_SHAPE, 0x0d);

        // Shape 0xD ramps up and holds at 0x1F; once the tone phase is
        // high the channel must follow the envelope to full scale.
        for _ in 0..(8 * 64) {
            emulator.clock();
        }
        let peak = (0..16u32)
            .map(|_| {
                emulator.clock();
                emulator.output().channel0
            })
            .fold(0.0f32, f32::max);
        assert_eq!(peak, YM_DAC[0x1f]);
    }

    #[test]
    fn unison_tones_are_realigned() {
        let mut emulator = Emulator::new(ChipVariant::Ay8910);
        write(&mut emulator, registers::MIXER_AND_IO_CONTROL, 0x38);
        write(&mut emulator, registers::CHANNEL_A_AMPLITUDE, 0x0f);
        write(&mut emulator, registers::CHANNEL_B_AMPLITUDE, 0x0f);

        // Start channel B at a different period so its counter drifts, then
        // bring it into unison with channel A.
        write(&mut emulator, registers::CHANNEL_A_FINE_TUNE, 0x40);
        write(&mut emulator, registers::CHANNEL_B_FINE_TUNE, 0x25);
        for _ in 0..800 {
            emulator.clock();
        }
        write(&mut emulator, registers::CHANNEL_B_FINE_TUNE, 0x40);
        for _ in 0..8 {
            emulator.clock();
        }
        assert_eq!(emulator.output().channel0, emulator.output().channel1);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut emulator = Emulator::new(ChipVariant::Ym2149);
        for reg in 0u8..14 {
            write(&mut emulator, reg, 0xff);
        }
        for _ in 0..1234 {
            emulator.clock();
        }
        emulator.reset();

        let mut fresh = Emulator::new(ChipVariant::Ym2149);
        for reg in 0u8..16 {
            emulator.set_index(reg);
            fresh.set_index(reg);
            assert_eq!(emulator.get_value(), fresh.get_value());
        }
        assert_eq!(*emulator.output(), *fresh.output());
        assert_eq!(emulator.envelope_level(), fresh.envelope_level());
    }

    #[test]
    fn port_direction_gates_the_bridge() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct Recorder {
            written: Rc<Cell<Option<u8>>>,
        }
        impl PortBridge for Recorder {
            fn port_a_read(&mut self, data: u8) -> u8 {
                data | 0x80
            }
            fn port_a_write(&mut self, data: u8) -> u8 {
                self.written.set(Some(data));
                data
            }
        }

        let written = Rc::new(Cell::new(None));
        let bridge = Recorder {
            written: Rc::clone(&written),
        };
        let mut emulator = Emulator::with_bridge(ChipVariant::Ay8910, bridge);

        // Direction input (bit 6 clear): writes bypass the bridge, reads
        // consult it.
        emulator.set_index(registers::MIXER_AND_IO_CONTROL);
        emulator.set_value(0x00);
        emulator.set_index(registers::IO_PORT_A);
        emulator.set_value(0x12);
        assert_eq!(written.get(), None);
        assert_eq!(emulator.get_value(), 0x12 | 0x80);

        // Direction output (bit 6 set): the bridge observes the write,
        // and the register file still reads back the programmed byte.
        emulator.set_index(registers::MIXER_AND_IO_CONTROL);
        emulator.set_value(0x40);
        emulator.set_index(registers::IO_PORT_A);
        emulator.set_value(0x34);
        assert_eq!(written.get(), Some(0x34));
        assert_eq!(emulator.get_value(), 0x34);
    }
}
