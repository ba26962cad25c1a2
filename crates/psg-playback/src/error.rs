//! Error types for loading and playback.

use ym_format::FormatError;

/// Error raised by the playback engine.
///
/// Everything surfaces out of `load` and device management; the realtime
/// `process` path is infallible once a load has succeeded.
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// The YM stream failed to decode.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The LHA container failed to extract.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// The host audio device could not be opened or started.
    #[error("audio device error: {0}")]
    Device(String),

    /// Filesystem failure while opening or extracting a file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
