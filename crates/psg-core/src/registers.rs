//! Register map of the AY/YM register file.

/// Channel A tone period, low 8 bits.
pub const CHANNEL_A_FINE_TUNE: u8 = 0x00;
/// Channel A tone period, high 4 bits.
pub const CHANNEL_A_COARSE_TUNE: u8 = 0x01;
/// Channel B tone period, low 8 bits.
pub const CHANNEL_B_FINE_TUNE: u8 = 0x02;
/// Channel B tone period, high 4 bits.
pub const CHANNEL_B_COARSE_TUNE: u8 = 0x03;
/// Channel C tone period, low 8 bits.
pub const CHANNEL_C_FINE_TUNE: u8 = 0x04;
/// Channel C tone period, high 4 bits.
pub const CHANNEL_C_COARSE_TUNE: u8 = 0x05;
/// Noise period (5 bits).
pub const NOISE_PERIOD: u8 = 0x06;
/// Mixer and I/O control.
pub const MIXER_AND_IO_CONTROL: u8 = 0x07;
/// Channel A amplitude.
pub const CHANNEL_A_AMPLITUDE: u8 = 0x08;
/// Channel B amplitude.
pub const CHANNEL_B_AMPLITUDE: u8 = 0x09;
/// Channel C amplitude.
pub const CHANNEL_C_AMPLITUDE: u8 = 0x0a;
/// Envelope period, low 8 bits.
pub const ENVELOPE_FINE_TUNE: u8 = 0x0b;
/// Envelope period, high 8 bits.
pub const ENVELOPE_COARSE_TUNE: u8 = 0x0c;
/// Envelope shape (4 bits); writing retriggers the envelope.
pub const ENVELOPE_SHAPE: u8 = 0x0d;
/// I/O port A data.
pub const IO_PORT_A: u8 = 0x0e;
/// I/O port B data.
pub const IO_PORT_B: u8 = 0x0f;

/// Write mask per register; out-of-range bits are discarded before storage.
pub const REGISTER_MASK: [u8; 16] = [
    0xff, 0x0f, 0xff, 0x0f, 0xff, 0x0f, 0x1f, 0xff,
    0x1f, 0x1f, 0x1f, 0xff, 0xff, 0x0f, 0xff, 0xff,
];
