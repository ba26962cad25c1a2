//! AY-3-8910 / YM2149 PSG emulator
//!
//! A cycle-accurate model of the General Instrument AY-3-8910 family and
//! the Yamaha YM2149 programmable sound generators.
//!
//! # Features
//! - All three tone channels, the shared noise LFSR and the shared
//!   envelope generator, stepped on the chip's internal divide-by-8 clock
//! - Hardware register file semantics: per-register write masks, the
//!   spread amplitude encoding, active-low mixer enables
//! - Per-variant DAC ladders (16-step AY, 32-step YM)
//! - Host I/O ports exposed through a static [`PortBridge`] contract
//!
//! # Quick start
//! ```
//! use psg_core::{ChipVariant, Emulator};
//!
//! let mut chip = Emulator::new(ChipVariant::Ym2149);
//! chip.set_index(0x00);
//! chip.set_value(0xfa); // tone A period, low byte
//! chip.set_index(0x07);
//! chip.set_value(0x3e); // mixer: tone A only
//! chip.set_index(0x08);
//! chip.set_value(0x0f); // channel A at full fixed level
//! for _ in 0..8 {
//!     chip.clock();
//! }
//! let (a, _b, _c) = chip.channel_outputs();
//! assert!(a >= 0.0 && a <= 1.0);
//! ```
//!
//! For YM register-dump playback use the `psg-playback` crate, which drives
//! this core from a decoded `ym-format` archive.

#![warn(missing_docs)]

mod bridge;
mod chip;
mod generators;
pub mod registers;
mod tables;

pub use bridge::{InertPorts, PortBridge};
pub use chip::{ChipVariant, Emulator, Output};
pub use generators::NUM_CHANNELS;
pub use tables::{AY_DAC, YM_DAC};
