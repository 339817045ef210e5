//! Binary PBM (P4) decoding
//!
//! ```text
//! P4
//! # optional comments
//! 128 64
//! <raster: height rows of ceil(width/8) bytes, MSB = leftmost pixel>
//! ```
//!
//! The header is whitespace separated and `#` starts a comment running to
//! the end of the line. A single whitespace byte separates the height from
//! the raster.

use alloc::vec::Vec;

use packfont_format::{Bitmap, BitmapError};

/// Errors decoding a PBM image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PbmError {
    /// Not a binary PBM
    BadMagic,
    /// Width or height missing or not a number
    BadHeader,
    /// Raster shorter than the header declares
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes supplied
        found: usize,
    },
}

impl From<BitmapError> for PbmError {
    fn from(e: BitmapError) -> Self {
        match e {
            BitmapError::Truncated { expected, found } => PbmError::Truncated { expected, found },
        }
    }
}

impl core::fmt::Display for PbmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PbmError::BadMagic => f.write_str("not a P4 PBM image"),
            PbmError::BadHeader => f.write_str("malformed PBM header"),
            PbmError::Truncated { expected, found } => {
                write!(f, "PBM raster truncated: need {expected} bytes, got {found}")
            }
        }
    }
}

impl core::error::Error for PbmError {}

struct Header<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while self.bytes.get(self.pos).is_some_and(|&b| b != b'\n') {
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> Result<u16, PbmError> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        let mut value: u16 = 0;
        while let Some(&b) = self.bytes.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u16::from(b - b'0')))
                .ok_or(PbmError::BadHeader)?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(PbmError::BadHeader);
        }
        Ok(value)
    }

    /// Raster following the single separator byte
    fn raster(mut self) -> Result<&'a [u8], PbmError> {
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => self.pos += 1,
            _ => return Err(PbmError::BadHeader),
        }
        Ok(&self.bytes[self.pos..])
    }
}

/// Decode a P4 image into a row-major bitmap
pub fn decode(bytes: &[u8]) -> Result<Bitmap, PbmError> {
    if !bytes.starts_with(b"P4") {
        return Err(PbmError::BadMagic);
    }

    let mut header = Header { bytes, pos: 2 };
    let width = header.number()?;
    let height = header.number()?;
    let raster = header.raster()?;

    Ok(Bitmap::from_rows(width, height, Vec::from(raster))?)
}
