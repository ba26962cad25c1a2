//! YM file probing and decoding.
//!
//! Six magic tags are recognized. YM1! through YM4! are identified solely
//! to produce a precise error; only YM5! and YM6! are decoded (the two are
//! identical on the wire for this decoder). Everything is big-endian.

use std::io::{Read, Seek};

use crate::archive::{Archive, Frame, MAX_FRAMES, MAX_SAMPLE_SIZE, MAX_SAMPLES, Sample};
use crate::error::{FormatError, Result};
use crate::reader::ByteReader;

/// `YM1!` magic tag.
pub const TAG_YM1: u32 = 0x594d_3121;
/// `YM2!` magic tag.
pub const TAG_YM2: u32 = 0x594d_3221;
/// `YM3!` magic tag.
pub const TAG_YM3: u32 = 0x594d_3321;
/// `YM4!` magic tag.
pub const TAG_YM4: u32 = 0x594d_3421;
/// `YM5!` magic tag.
pub const TAG_YM5: u32 = 0x594d_3521;
/// `YM6!` magic tag.
pub const TAG_YM6: u32 = 0x594d_3621;

const TAG_LEONARD: u64 = 0x4c65_4f6e_4172_4421;
const TAG_END: u32 = 0x456e_6421;

/// Streaming decoder for the YM register-dump formats.
#[derive(Debug)]
pub struct YmDecoder<R> {
    reader: ByteReader<R>,
}

impl<R: Read + Seek> YmDecoder<R> {
    /// Wrap a seekable byte stream.
    pub fn new(inner: R) -> Self {
        Self {
            reader: ByteReader::new(inner),
        }
    }

    /// Report whether the stream starts with one of the six YM magic tags.
    pub fn probe(&mut self) -> bool {
        let magic = self.reader.rewind().and_then(|_| self.reader.read_u32_be());
        matches!(
            magic,
            Ok(TAG_YM1 | TAG_YM2 | TAG_YM3 | TAG_YM4 | TAG_YM5 | TAG_YM6)
        )
    }

    /// Decode the stream into a fresh [`Archive`].
    ///
    /// On failure nothing partial escapes; the caller keeps whatever
    /// archive it already had.
    pub fn read(&mut self) -> Result<Archive> {
        self.reader.rewind()?;
        let magic = self.reader.read_u32_be()?;
        match magic {
            TAG_YM1 => Err(FormatError::UnsupportedFormat("YM1!")),
            TAG_YM2 => Err(FormatError::UnsupportedFormat("YM2!")),
            TAG_YM3 => Err(FormatError::UnsupportedFormat("YM3!")),
            TAG_YM4 => Err(FormatError::UnsupportedFormat("YM4!")),
            TAG_YM5 | TAG_YM6 => self.read_body(magic),
            _ => Err(FormatError::UnknownFormat),
        }
    }

    fn read_body(&mut self, magic: u32) -> Result<Archive> {
        let mut archive = Archive {
            header: self.read_header(magic)?,
            ..Archive::default()
        };
        self.read_samples(&mut archive)?;
        self.read_metadata(&mut archive)?;
        self.read_frames(&mut archive)?;
        self.read_footer()?;
        Ok(archive)
    }

    fn read_header(&mut self, magic: u32) -> Result<crate::archive::Header> {
        let mut header = crate::archive::Header {
            magic,
            signature: self.reader.read_u64_be()?,
            ..Default::default()
        };
        if header.signature != TAG_LEONARD {
            return Err(FormatError::BadSignature);
        }

        header.frames = self.reader.read_u32_be()?;
        if header.frames as usize > MAX_FRAMES {
            return Err(FormatError::BadFrameCount(header.frames));
        }

        header.attributes = self.reader.read_u32_be()?;

        header.samples = self.reader.read_u16_be()?;
        if header.samples as usize > MAX_SAMPLES {
            return Err(FormatError::BadSampleCount(u32::from(header.samples)));
        }

        header.frequency = self.reader.read_u32_be()?;
        header.framerate = self.reader.read_u16_be()?;
        header.frameloop = self.reader.read_u32_be()?;

        header.extrabytes = self.reader.read_u16_be()?;
        if header.extrabytes != 0 {
            return Err(FormatError::BadExtraBytes(header.extrabytes));
        }

        Ok(header)
    }

    fn read_samples(&mut self, archive: &mut Archive) -> Result<()> {
        archive.samples.reserve_exact(usize::from(archive.header.samples));
        for _ in 0..archive.header.samples {
            let size = self.reader.read_u32_be()?;
            if size as usize > MAX_SAMPLE_SIZE {
                return Err(FormatError::BadSampleCount(size));
            }
            let mut data = vec![0u8; size as usize];
            self.reader.read_exact(&mut data)?;
            archive.samples.push(Sample { data });
        }
        Ok(())
    }

    fn read_metadata(&mut self, archive: &mut Archive) -> Result<()> {
        archive.infos.title = self.reader.read_cstring()?;
        archive.infos.author = self.reader.read_cstring()?;
        archive.infos.comments = self.reader.read_cstring()?;
        Ok(())
    }

    fn read_frames(&mut self, archive: &mut Archive) -> Result<()> {
        let count = archive.header.frames as usize;
        archive.frames = vec![Frame::default(); count];

        if archive.header.interleaved() {
            // Register-major: all of register 0 across the frames, then
            // register 1, through register 15.
            for register in 0..16 {
                for frame in archive.frames.iter_mut() {
                    frame.data[register] = self.reader.read_u8()?;
                }
            }
        } else {
            for frame in archive.frames.iter_mut() {
                self.reader.read_exact(&mut frame.data)?;
            }
        }
        Ok(())
    }

    fn read_footer(&mut self) -> Result<()> {
        if self.reader.read_u32_be()? != TAG_END {
            return Err(FormatError::BadFooter);
        }
        Ok(())
    }
}
