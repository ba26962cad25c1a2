//! Host audio device integration.
//!
//! The processor only needs a small contract from the audio subsystem: a
//! channel count, a sample rate and a realtime thread that pulls frames.
//! [`RodioDevice`] fulfils it with rodio's default output; the pull side is
//! a [`rodio::Source`] that renders whole buffers through
//! [`PlaybackProcessor::process`] and hands them out one sample at a time.

use std::sync::Arc;
use std::time::Duration;

use rodio::{OutputStream, Sink, Source};

use crate::error::{PlayerError, Result};
use crate::processor::PlaybackProcessor;

/// Frames rendered per processor call on the audio thread.
const BATCH_FRAMES: usize = 1024;

/// Contract the playback engine requires from the host audio subsystem.
pub trait DeviceAdapter {
    /// Output channel count, 1 or 2.
    fn channel_count(&self) -> u16;

    /// Output sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Begin delivering callbacks to the processor.
    fn start(&mut self) -> Result<()>;

    /// Stop delivering callbacks and drain the device.
    fn stop(&mut self);
}

/// Audio device on rodio's default output stream.
///
/// Construction opens the stream and installs the pull source paused;
/// [`start`](DeviceAdapter::start) begins playback.
pub struct RodioDevice {
    _stream: OutputStream,
    sink: Sink,
    channels: u16,
    sample_rate: u32,
}

impl RodioDevice {
    /// Open the default output device for `processor`.
    pub fn new(processor: Arc<PlaybackProcessor>) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|err| PlayerError::Device(err.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|err| PlayerError::Device(err.to_string()))?;

        let channels = processor.channel_count();
        let sample_rate = processor.sample_rate();
        sink.pause();
        sink.append(ProcessorSource::new(processor));

        Ok(Self {
            _stream: stream,
            sink,
            channels,
            sample_rate,
        })
    }
}

impl DeviceAdapter for RodioDevice {
    fn channel_count(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start(&mut self) -> Result<()> {
        self.sink.play();
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.pause();
    }
}

/// Endless source pulling interleaved frames from the processor.
struct ProcessorSource {
    processor: Arc<PlaybackProcessor>,
    channels: u16,
    sample_rate: u32,
    buffer: Vec<f32>,
    position: usize,
}

impl ProcessorSource {
    fn new(processor: Arc<PlaybackProcessor>) -> Self {
        let channels = processor.channel_count();
        let sample_rate = processor.sample_rate();
        let buffer = vec![0.0; BATCH_FRAMES * usize::from(channels)];
        Self {
            processor,
            channels,
            sample_rate,
            buffer,
            // Force a render on the first pull.
            position: usize::MAX,
        }
    }
}

impl Iterator for ProcessorSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.buffer.len() {
            self.processor.process(&mut self.buffer);
            self.position = 0;
        }
        let sample = self.buffer[self.position];
        self.position += 1;
        Some(sample)
    }
}

impl Source for ProcessorSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
