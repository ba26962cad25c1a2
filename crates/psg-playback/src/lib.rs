//! Realtime YM playback engine
//!
//! Re-plays decoded YM register dumps on the `psg-core` emulator:
//! - [`PlaybackProcessor`] renders interleaved f32 frames on the audio
//!   thread, pushing register frames at the dump's frame rate and ticking
//!   the chip at its recorded clock
//! - [`RodioDevice`] adapts rodio's default output to the
//!   [`DeviceAdapter`] contract
//! - [`Player`] owns the main loop: playlist advancement, device start and
//!   stop, and a raw-sample dump mode
//!
//! Loading accepts plain YM files and LHA containers; extraction and the
//! build-then-swap loader both live here, so a failed load never disturbs
//! the archive currently playing.
//!
//! # Quick start
//! ```no_run
//! use psg_playback::{Player, PlayerConfig, PlaylistCursor};
//!
//! # fn main() -> psg_playback::Result<()> {
//! let mut playlist = PlaylistCursor::new();
//! playlist.add("song.ym");
//! let mut player = Player::new(PlayerConfig::default(), playlist);
//! player.play()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod device;
mod error;
mod loader;
mod player;
mod playlist;
mod processor;

pub use config::PlayerConfig;
pub use device::{DeviceAdapter, RodioDevice};
pub use error::{PlayerError, Result};
pub use player::Player;
pub use playlist::PlaylistCursor;
pub use processor::PlaybackProcessor;
