//! 1bpp row-major bitmaps
//!
//! Rows are padded to a whole byte and bit 7 of each byte is the leftmost
//! pixel. This is the layout of packed font glyph rows and of binary PBM
//! images, so both decode into the same type.

use alloc::vec;
use alloc::vec::Vec;

/// Bytes needed to hold one row of `width` pixels
pub const fn row_bytes(width: u16) -> usize {
    (width as usize + 7) / 8
}

/// Errors constructing a bitmap from raw rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// Fewer bytes than `height` rows of `row_bytes(width)`
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes supplied
        found: usize,
    },
}

impl core::fmt::Display for BitmapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitmapError::Truncated { expected, found } => {
                write!(f, "bitmap truncated: need {expected} bytes, got {found}")
            }
        }
    }
}

impl core::error::Error for BitmapError {}

/// Owned 1bpp image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a blank bitmap
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            data: vec![0; row_bytes(width) * height as usize],
        }
    }

    /// Wrap packed rows. Extra trailing bytes are dropped.
    pub fn from_rows(width: u16, height: u16, mut data: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = row_bytes(width) * height as usize;
        if data.len() < expected {
            return Err(BitmapError::Truncated {
                expected,
                found: data.len(),
            });
        }
        data.truncate(expected);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a bitmap by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u16, height: u16, mut f: impl FnMut(u16, u16) -> bool) -> Self {
        let mut bitmap = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    bitmap.set(x, y, true);
                }
            }
        }
        bitmap
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per row
    pub fn row_bytes(&self) -> usize {
        row_bytes(self.width)
    }

    /// Packed row `y`
    pub fn row(&self, y: u16) -> &[u8] {
        let stride = self.row_bytes();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// All packed rows
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel value; out of range reads as background
    pub fn get(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.row_bytes() + (x as usize >> 3)];
        byte & (0x80 >> (x & 7)) != 0
    }

    /// Set or clear a pixel; out of range writes are ignored
    pub fn set(&mut self, x: u16, y: u16, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.row_bytes() + (x as usize >> 3);
        let mask = 0x80 >> (x & 7);
        if on {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_padding() {
        assert_eq!(row_bytes(0), 0);
        assert_eq!(row_bytes(1), 1);
        assert_eq!(row_bytes(8), 1);
        assert_eq!(row_bytes(9), 2);
        assert_eq!(Bitmap::new(12, 3).as_bytes().len(), 6);
    }

    #[test]
    fn test_msb_is_leftmost() {
        let bitmap = Bitmap::from_rows(10, 1, vec![0x80, 0x40]).unwrap();
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(1, 0));
        assert!(bitmap.get(9, 0));
        assert!(!bitmap.get(10, 0));
    }

    #[test]
    fn test_from_rows_truncated() {
        assert_eq!(
            Bitmap::from_rows(16, 2, vec![0; 3]),
            Err(BitmapError::Truncated {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_set_and_clear() {
        let mut bitmap = Bitmap::from_fn(8, 2, |x, y| x == y);
        assert_eq!(bitmap.row(0), &[0x80]);
        assert_eq!(bitmap.row(1), &[0x40]);
        bitmap.set(0, 0, false);
        bitmap.set(7, 1, true);
        assert_eq!(bitmap.as_bytes(), &[0x00, 0x41]);
    }
}
