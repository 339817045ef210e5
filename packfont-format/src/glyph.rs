//! Glyph table entries and borrowed glyph bitmaps

use crate::bitmap::row_bytes;

/// Size of one glyph table entry in bytes
pub const TABLE_ENTRY_LEN: usize = 5;

/// One glyph table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphRecord {
    /// Character code
    pub code: u8,
    /// Width in pixels, also the advance width
    pub width: u8,
    /// Height in pixels
    pub height: u8,
    /// Byte offset of the first row in the glyph blob
    pub start: u16,
}

impl GlyphRecord {
    /// Parse a table entry
    pub fn from_bytes(entry: [u8; TABLE_ENTRY_LEN]) -> Self {
        Self {
            code: entry[0],
            width: entry[1],
            height: entry[2],
            start: u16::from_le_bytes([entry[3], entry[4]]),
        }
    }

    /// Serialize as a table entry
    pub fn to_bytes(&self) -> [u8; TABLE_ENTRY_LEN] {
        let [lo, hi] = self.start.to_le_bytes();
        [self.code, self.width, self.height, lo, hi]
    }

    /// Bytes per glyph row
    pub fn row_bytes(&self) -> usize {
        row_bytes(u16::from(self.width))
    }

    /// Total bytes the glyph occupies in the blob
    pub fn footprint(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Byte range of the glyph within the blob
    pub fn range(&self) -> core::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.footprint()
    }
}

/// A glyph's rows, borrowed from the font blob
#[derive(Debug, Clone, Copy)]
pub struct GlyphBitmap<'a> {
    width: u8,
    height: u8,
    rows: &'a [u8],
}

impl<'a> GlyphBitmap<'a> {
    /// View `rows` as a glyph; `None` unless it holds exactly the footprint
    pub fn new(record: &GlyphRecord, rows: &'a [u8]) -> Option<Self> {
        (rows.len() == record.footprint()).then_some(Self {
            width: record.width,
            height: record.height,
            rows,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Raw packed rows
    pub fn rows(&self) -> &'a [u8] {
        self.rows
    }

    /// Whether the pixel at (x, y) is foreground
    pub fn get(&self, x: u8, y: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let stride = row_bytes(u16::from(self.width));
        let byte = self.rows[y as usize * stride + (x as usize >> 3)];
        (byte >> (7 - (x & 7))) & 1 == 1
    }

    /// Iterate the foreground pixels as (x, y), row by row
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8)> + 'a {
        let glyph = *self;
        (0..glyph.height).flat_map(move |y| {
            (0..glyph.width).filter_map(move |x| glyph.get(x, y).then_some((x, y)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_roundtrip_little_endian_start() {
        let record = GlyphRecord::from_bytes([b'A', 5, 8, 0x34, 0x12]);
        assert_eq!(record.start, 0x1234);
        assert_eq!(record.to_bytes(), [b'A', 5, 8, 0x34, 0x12]);
    }

    #[test]
    fn test_footprint() {
        let record = GlyphRecord {
            code: b'W',
            width: 13,
            height: 16,
            start: 100,
        };
        assert_eq!(record.row_bytes(), 2);
        assert_eq!(record.footprint(), 32);
        assert_eq!(record.range(), 100..132);
    }

    #[test]
    fn test_glyph_pixels() {
        let record = GlyphRecord {
            code: b'|',
            width: 3,
            height: 2,
            start: 0,
        };
        let rows = [0b0100_0000, 0b1010_0000];
        let glyph = GlyphBitmap::new(&record, &rows).unwrap();
        let lit: Vec<(u8, u8)> = glyph.pixels().collect();
        assert_eq!(lit, vec![(1, 0), (0, 1), (2, 1)]);
        assert!(GlyphBitmap::new(&record, &rows[..1]).is_none());
    }
}
