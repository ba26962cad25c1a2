//! File loading with transparent LHA extraction.
//!
//! Most YM dumps in the wild ship inside an LHA container. Loading first
//! probes the file as a plain YM stream; when that fails, the first archive
//! member is extracted through `delharc` into a temporary file and decoded
//! from there. The temporary file is removed on every path, success or
//! failure, by its `Drop` handler.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tempfile::NamedTempFile;
use ym_format::{Archive, FormatError, YmDecoder};

use crate::error::{PlayerError, Result};

/// Prefix of the temporary extraction file.
const TEMP_PREFIX: &str = "psg-player-";

/// Ceiling on the extracted size; a conforming YM5!/YM6! file tops out
/// around 1.2 MiB, so anything past this bound is not a YM dump.
const MAX_EXTRACTED_SIZE: u64 = 4 * 1024 * 1024;

/// Decode `path` as a YM file, falling back to LHA extraction.
pub(crate) fn read_archive(path: &Path) -> Result<Archive> {
    let mut decoder = YmDecoder::new(BufReader::new(File::open(path)?));
    if decoder.probe() {
        return Ok(decoder.read()?);
    }
    drop(decoder);

    let extracted = extract_first_member(path)?;
    log::debug!("{}: extracted to {}", path.display(), extracted.path().display());

    let mut decoder = YmDecoder::new(BufReader::new(File::open(extracted.path())?));
    if !decoder.probe() {
        return Err(FormatError::UnknownFormat.into());
    }
    Ok(decoder.read()?)
}

/// Extract the first member of an LHA archive into a temporary file.
fn extract_first_member(path: &Path) -> Result<NamedTempFile> {
    // A parse failure here means the bytes are neither YM nor LHA.
    let reader = delharc::parse_file(path).map_err(|_| FormatError::UnknownFormat)?;

    let mut output = tempfile::Builder::new().prefix(TEMP_PREFIX).tempfile()?;
    let mut limited = reader.take(MAX_EXTRACTED_SIZE + 1);
    let copied = io::copy(&mut limited, output.as_file_mut())
        .map_err(|err| PlayerError::Decompression(err.to_string()))?;
    if copied > MAX_EXTRACTED_SIZE {
        return Err(PlayerError::Decompression(format!(
            "extracted data exceeds {MAX_EXTRACTED_SIZE} bytes"
        )));
    }
    Ok(output)
}
