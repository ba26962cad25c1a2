//! Player orchestration.
//!
//! Ties a processor, a playlist and an audio device together. The main
//! loop runs on the calling thread and only polls: the audio thread pulls
//! samples on its own cadence, so a one-second sleep between `playing()`
//! checks is plenty.

use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::PlayerConfig;
use crate::device::{DeviceAdapter, RodioDevice};
use crate::error::Result;
use crate::playlist::PlaylistCursor;
use crate::processor::PlaybackProcessor;

/// Frames rendered per iteration when dumping to stdout.
const DUMP_FRAMES: usize = 16_384;

/// Poll interval of the play main loop.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Plays a playlist of YM files on the host audio device, or renders them
/// to stdout.
pub struct Player {
    processor: Arc<PlaybackProcessor>,
    playlist: PlaylistCursor,
}

impl Player {
    /// Build a player over its own processor.
    pub fn new(config: PlayerConfig, playlist: PlaylistCursor) -> Self {
        Self {
            processor: Arc::new(PlaybackProcessor::new(config)),
            playlist,
        }
    }

    /// The processor driving the emulator.
    pub fn processor(&self) -> &Arc<PlaybackProcessor> {
        &self.processor
    }

    /// Play the playlist to the default audio device, blocking until it is
    /// exhausted.
    pub fn play(&mut self) -> Result<()> {
        let mut device = RodioDevice::new(Arc::clone(&self.processor))?;
        self.load_current()?;
        device.start()?;
        while self.advance()? {
            thread::sleep(POLL_INTERVAL);
        }
        device.stop();
        Ok(())
    }

    /// Render the playlist as raw little-endian f32 frames on stdout.
    pub fn dump(&mut self) -> Result<()> {
        self.load_current()?;
        let channels = usize::from(self.processor.channel_count());
        let mut buffer = vec![0.0f32; DUMP_FRAMES * channels];

        let stdout = std::io::stdout();
        let mut output = std::io::BufWriter::new(stdout.lock());
        while self.advance()? {
            self.processor.process(&mut buffer);
            for sample in &buffer {
                output.write_all(&sample.to_le_bytes())?;
            }
        }
        output.flush()?;
        Ok(())
    }

    fn load_current(&mut self) -> Result<()> {
        if let Some(path) = self.playlist.current() {
            self.processor.load(path)?;
        }
        Ok(())
    }

    /// Keep going while the current track plays; move to the next track
    /// when it ends. False once the playlist is exhausted.
    fn advance(&mut self) -> Result<bool> {
        if self.processor.playing() {
            return Ok(true);
        }
        match self.playlist.next() {
            Some(path) => {
                let path = path.to_path_buf();
                self.processor.load(&path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ym5_with_frames(frames: u16) -> NamedTempFile {
        let mut data = Vec::new();
        data.extend_from_slice(b"YM5!");
        data.extend_from_slice(b"LeOnArD!");
        data.extend_from_slice(&u32::from(frames).to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&2_000_000u32.to_be_bytes());
        data.extend_from_slice(&50u16.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&[0u8; 3]);
        data.extend_from_slice(&vec![0u8; usize::from(frames) * 16]);
        data.extend_from_slice(b"End!");

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        file
    }

    #[test]
    fn advance_walks_the_playlist_on_track_end() {
        let first = ym5_with_frames(1);
        let second = ym5_with_frames(2);

        let mut playlist = PlaylistCursor::new();
        playlist.add(first.path());
        playlist.add(second.path());

        let mut player = Player::new(PlayerConfig::default(), playlist);
        player.load_current().unwrap();
        assert!(player.processor.playing());

        // 2048 stereo frames cover the first music step at 50/44100, and a
        // single-frame track ends on its first step.
        let mut buffer = vec![0.0f32; 2048 * 2];
        player.processor.process(&mut buffer);
        assert!(!player.processor.playing());

        assert!(player.advance().unwrap());
        assert!(player.processor.playing());
    }

    #[test]
    fn failed_load_keeps_the_previous_archive() {
        let good = ym5_with_frames(3);
        let mut bad = NamedTempFile::new().unwrap();
        bad.write_all(b"not an audio file at all").unwrap();

        let player = Player::new(PlayerConfig::default(), PlaylistCursor::new());
        player.processor.load(good.path()).unwrap();
        assert!(player.processor.playing());

        assert!(player.processor.load(bad.path()).is_err());
        assert!(player.processor.playing(), "previous archive must survive");
    }
}
