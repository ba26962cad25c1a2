//! Big-endian primitive reads over a seekable byte stream.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{FormatError, Result};

/// Reader for the big-endian primitives the YM formats are built from.
///
/// Every short read surfaces as [`FormatError::TruncatedInput`]; other I/O
/// failures keep their [`std::io::Error`].
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read + Seek> ByteReader<R> {
    /// Wrap a seekable byte stream.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Seek back to the start of the stream.
    pub fn rewind(&mut self) -> Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Read a big-endian u64.
    pub fn read_u64_be(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Fill `buf` completely from the stream.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.fill(buf)
    }

    /// Read bytes up to a NUL terminator; the NUL is consumed and dropped.
    ///
    /// YM metadata predates any encoding convention, so bytes are taken as
    /// Latin-1 to keep the read lossless.
    pub fn read_cstring(&mut self) -> Result<String> {
        let mut value = String::new();
        loop {
            match self.read_u8()? {
                0 => return Ok(value),
                byte => value.push(char::from(byte)),
            }
        }
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                FormatError::TruncatedInput
            } else {
                FormatError::Io(err)
            }
        })
    }
}
