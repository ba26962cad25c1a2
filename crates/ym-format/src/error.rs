//! Error types for YM stream reading and decoding.

/// Error raised while reading or decoding a YM byte stream.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// The stream ended before a primitive or string was complete.
    #[error("truncated input")]
    TruncatedInput,

    /// A recognized magic tag for a format this decoder does not handle.
    #[error("{0} format is not supported")]
    UnsupportedFormat(&'static str),

    /// The initial bytes match none of the recognized magic tags.
    #[error("unknown file format")]
    UnknownFormat,

    /// The header signature is not `LeOnArD!`.
    #[error("bad header signature")]
    BadSignature,

    /// The frame count exceeds the format limit.
    #[error("bad frame count: {0}")]
    BadFrameCount(u32),

    /// The sample count or a sample payload size exceeds the format limit.
    #[error("bad sample count: {0}")]
    BadSampleCount(u32),

    /// The reserved extra-bytes field is non-zero.
    #[error("bad extra bytes: {0}")]
    BadExtraBytes(u16),

    /// The footer magic is not `End!`.
    #[error("bad footer magic")]
    BadFooter,

    /// An I/O failure other than end-of-stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for decoder operations.
pub type Result<T> = std::result::Result<T, FormatError>;
