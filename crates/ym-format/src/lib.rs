//! YM register-dump file formats
//!
//! Parsing support for the Atari ST YM file family: the six magic tags
//! `YM1!` through `YM6!` are recognized, and the YM5!/YM6! body (header,
//! sample table, metadata strings, frame table, footer) is decoded into an
//! in-memory [`Archive`].
//!
//! Most YM files in the wild are LHA-compressed; decompression is a host
//! concern and lives in the `psg-playback` crate. This crate only consumes
//! plain byte streams.
//!
//! # Quick start
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use ym_format::YmDecoder;
//!
//! # fn main() -> ym_format::Result<()> {
//! let file = File::open("song.ym")?;
//! let mut decoder = YmDecoder::new(BufReader::new(file));
//! let archive = decoder.read()?;
//! println!("{} frames at {} Hz", archive.header.frames, archive.header.framerate);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod archive;
mod decoder;
mod error;
mod reader;

pub use archive::{Archive, Frame, Header, Infos, MAX_FRAMES, MAX_SAMPLE_SIZE, MAX_SAMPLES, Sample};
pub use decoder::{TAG_YM1, TAG_YM2, TAG_YM3, TAG_YM4, TAG_YM5, TAG_YM6, YmDecoder};
pub use error::{FormatError, Result};
pub use reader::ByteReader;
