// File: crates/pixlroll-core/src/source.rs
// Summary: Sample formats, raw byte decoding and the bounded block reader feeding the plot.

use std::fmt;
use std::io::{ErrorKind, Read};
use std::str::FromStr;

use crate::error::{PixlError, Result};
use crate::types::SampleRange;

/// Default read size, in bytes.
pub const BLOCK_SIZE: usize = 1000;

/// On-the-wire encoding of one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleFormat {
    #[default]
    Int8,
    Uint8,
}

impl SampleFormat {
    pub const fn name(&self) -> &'static str {
        match self {
            SampleFormat::Int8 => "int8",
            SampleFormat::Uint8 => "uint8",
        }
    }

    /// Bytes per sample.
    pub const fn width(&self) -> usize {
        match self {
            SampleFormat::Int8 | SampleFormat::Uint8 => 1,
        }
    }

    /// Every value the format can carry.
    pub const fn range(&self) -> SampleRange {
        match self {
            SampleFormat::Int8 => SampleRange::int8(),
            SampleFormat::Uint8 => SampleRange::uint8(),
        }
    }

    fn decode_one(&self, bytes: &[u8]) -> i32 {
        match self {
            SampleFormat::Int8 => bytes[0] as i8 as i32,
            SampleFormat::Uint8 => bytes[0] as i32,
        }
    }
}

impl FromStr for SampleFormat {
    type Err = PixlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int8" => Ok(SampleFormat::Int8),
            "uint8" => Ok(SampleFormat::Uint8),
            _ => Err(PixlError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    pub samples: Vec<i32>,
    /// Trailing bytes that did not make up a whole sample.
    pub dropped: usize,
}

/// Decode whole samples from `bytes`. A partial trailing sample is dropped,
/// never an error. Both current formats are one byte wide, so `dropped` is
/// always 0 for them.
pub fn decode(format: SampleFormat, bytes: &[u8]) -> Decoded {
    let chunks = bytes.chunks_exact(format.width());
    let dropped = chunks.remainder().len();
    let samples = chunks.map(|c| format.decode_one(c)).collect();
    if dropped > 0 {
        tracing::warn!(dropped, format = %format, "dropped partial trailing sample");
    }
    Decoded { samples, dropped }
}

/// Reads at most one block per call from a byte stream and decodes it.
pub struct BlockReader<R> {
    inner: R,
    format: SampleFormat,
    buf: Vec<u8>,
}

impl<R: Read> BlockReader<R> {
    pub fn new(inner: R, format: SampleFormat, block_size: usize) -> Result<Self> {
        if block_size < format.width() {
            return Err(PixlError::options(format!(
                "block size {block_size} is smaller than one {format} sample"
            )));
        }
        Ok(Self { inner, format, buf: vec![0; block_size] })
    }

    pub fn format(&self) -> SampleFormat { self.format }

    /// One bounded read. `Ok(None)` at end of stream; a read may return fewer
    /// samples than a full block.
    pub fn read_batch(&mut self) -> Result<Option<Vec<i32>>> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(decode(self.format, &self.buf[..n]).samples)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
