//! Packed font encoding and decoding.
//!
//! Format:
//! - MAGIC (2 bytes): "PF"
//! - DEFAULT (1 byte): code drawn in place of missing characters
//! - COUNT (1 byte): number of glyph table entries (0-255)
//! - TABLE (COUNT x 5 bytes): code, width, height, start (u16 little endian)
//! - BLOB (rest of file): glyph rows in table order

use alloc::string::String;
use alloc::vec::Vec;

use crate::bitmap::Bitmap;
use crate::glyph::{GlyphBitmap, GlyphRecord, TABLE_ENTRY_LEN};

/// File magic
pub const MAGIC: [u8; 2] = *b"PF";

/// Header size (magic, default character, glyph count)
pub const HEADER_LEN: usize = 4;

/// Maximum glyphs a font can hold
pub const MAX_GLYPHS: usize = u8::MAX as usize;

/// Errors that can occur while reading a packed font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Fewer than four header bytes
    TooShort,
    /// File does not start with "PF"
    BadMagic,
    /// Glyph table ends before COUNT entries
    TruncatedTable {
        /// Table bytes required
        expected: usize,
        /// Table bytes present
        found: usize,
    },
    /// A glyph's rows extend past the end of the blob
    GlyphOutOfRange {
        /// Offending character code
        code: u8,
    },
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::TooShort => f.write_str("file too short for a packed font header"),
            FormatError::BadMagic => f.write_str("unknown file format (missing PF magic)"),
            FormatError::TruncatedTable { expected, found } => write!(
                f,
                "glyph table truncated: need {expected} bytes, got {found}"
            ),
            FormatError::GlyphOutOfRange { code } => {
                write!(f, "glyph {code} extends past the end of the glyph data")
            }
        }
    }
}

impl core::error::Error for FormatError {}

/// Errors that can occur while building a packed font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// More glyphs than fit the one-byte count
    TooManyGlyphs(usize),
    /// Source image smaller than the glyph's declared metrics
    ImageTooSmall {
        /// Character code
        code: u8,
        /// Declared width
        width: u8,
        /// Declared height
        height: u8,
        /// Image width
        image_width: u16,
        /// Image height
        image_height: u16,
    },
    /// Glyph data grew past what a 16-bit start offset can address
    BlobTooLarge {
        /// First glyph whose start offset does not fit
        code: u8,
    },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::TooManyGlyphs(count) => {
                write!(f, "{count} glyphs exceed the limit of {MAX_GLYPHS}")
            }
            EncodeError::ImageTooSmall {
                code,
                width,
                height,
                image_width,
                image_height,
            } => write!(
                f,
                "image for glyph {code} is {image_width}x{image_height}, less than expected ({width}x{height})"
            ),
            EncodeError::BlobTooLarge { code } => {
                write!(f, "glyph {code} starts beyond the 64 KiB glyph data limit")
            }
        }
    }
}

impl core::error::Error for EncodeError {}

/// A decoded packed font
///
/// Glyphs keep file order. Lookups go through a 256 entry index so
/// rendering a character is a single table access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFont {
    name: String,
    default_character: u8,
    glyphs: Vec<GlyphRecord>,
    index: [Option<u8>; 256],
    data: Vec<u8>,
}

impl PackedFont {
    /// Font name (the name it was loaded under)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Code of the fallback glyph
    pub fn default_character(&self) -> u8 {
        self.default_character
    }

    /// Number of glyph table entries
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph table in file order
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    /// Raw glyph blob
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Look up the glyph for `code`
    pub fn glyph(&self, code: u8) -> Option<&GlyphRecord> {
        self.index[code as usize].map(|i| &self.glyphs[i as usize])
    }

    /// Glyph for `code`, falling back to the default character
    ///
    /// `None` for `code` means the character has no single-byte code and
    /// goes straight to the fallback.
    pub fn glyph_or_default(&self, code: Option<u8>) -> Option<&GlyphRecord> {
        code.and_then(|c| self.glyph(c))
            .or_else(|| self.glyph(self.default_character))
    }

    /// Rows of `record`, or `None` if they are not wholly inside the blob
    pub fn bitmap(&self, record: &GlyphRecord) -> Option<GlyphBitmap<'_>> {
        let rows = self.data.get(record.range())?;
        GlyphBitmap::new(record, rows)
    }

    /// Check every glyph's rows lie inside the blob
    pub fn validate(&self) -> Result<(), FormatError> {
        match self
            .glyphs
            .iter()
            .find(|g| g.range().end > self.data.len())
        {
            Some(glyph) => Err(FormatError::GlyphOutOfRange { code: glyph.code }),
            None => Ok(()),
        }
    }
}

/// Decode a packed font
///
/// Everything after the glyph table is taken as the glyph blob. The blob
/// length is not checked against the table here; see
/// [`PackedFont::validate`] and [`PackedFont::bitmap`].
pub fn decode(name: &str, bytes: &[u8]) -> Result<PackedFont, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::TooShort);
    }
    if bytes[..2] != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let default_character = bytes[2];
    let count = bytes[3] as usize;
    let table_end = HEADER_LEN + count * TABLE_ENTRY_LEN;
    if bytes.len() < table_end {
        return Err(FormatError::TruncatedTable {
            expected: count * TABLE_ENTRY_LEN,
            found: bytes.len() - HEADER_LEN,
        });
    }

    let mut glyphs = Vec::with_capacity(count);
    let mut index = [None; 256];
    for (i, entry) in bytes[HEADER_LEN..table_end]
        .chunks_exact(TABLE_ENTRY_LEN)
        .enumerate()
    {
        let mut raw = [0u8; TABLE_ENTRY_LEN];
        raw.copy_from_slice(entry);
        let record = GlyphRecord::from_bytes(raw);
        // Later duplicates win the lookup
        index[record.code as usize] = Some(i as u8);
        glyphs.push(record);
    }

    Ok(PackedFont {
        name: String::from(name),
        default_character,
        glyphs,
        index,
        data: bytes[table_end..].to_vec(),
    })
}

/// One glyph to be packed
#[derive(Debug, Clone)]
pub struct GlyphSource {
    /// Character code
    pub code: u8,
    /// Width in pixels
    pub width: u8,
    /// Height in pixels
    pub height: u8,
    /// Source pixels; only the top-left `width` x `height` are used
    pub image: Bitmap,
}

/// Everything needed to build a packed font
#[derive(Debug, Clone, Default)]
pub struct FontSource {
    /// Font name, used as the output file name
    pub name: String,
    /// Code of the fallback glyph
    pub default_character: u8,
    /// Glyphs in output order
    pub glyphs: Vec<GlyphSource>,
}

/// Encode a packed font
pub fn encode(source: &FontSource) -> Result<Vec<u8>, EncodeError> {
    let count = source.glyphs.len();
    if count > MAX_GLYPHS {
        return Err(EncodeError::TooManyGlyphs(count));
    }

    let mut table = Vec::with_capacity(count * TABLE_ENTRY_LEN);
    let mut blob = Vec::new();

    for glyph in &source.glyphs {
        let image = &glyph.image;
        if image.width() < u16::from(glyph.width) || image.height() < u16::from(glyph.height) {
            return Err(EncodeError::ImageTooSmall {
                code: glyph.code,
                width: glyph.width,
                height: glyph.height,
                image_width: image.width(),
                image_height: image.height(),
            });
        }

        let start = u16::try_from(blob.len())
            .map_err(|_| EncodeError::BlobTooLarge { code: glyph.code })?;
        let record = GlyphRecord {
            code: glyph.code,
            width: glyph.width,
            height: glyph.height,
            start,
        };
        table.extend_from_slice(&record.to_bytes());

        // Source rows may be wider than the glyph; repack the left edge
        let stride = record.row_bytes();
        for y in 0..u16::from(glyph.height) {
            let row_start = blob.len();
            blob.resize(row_start + stride, 0);
            for x in 0..u16::from(glyph.width) {
                if image.get(x, y) {
                    blob[row_start + (x as usize >> 3)] |= 0x80 >> (x & 7);
                }
            }
        }
    }

    let mut bytes = Vec::with_capacity(HEADER_LEN + table.len() + blob.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.push(source.default_character);
    bytes.push(count as u8);
    bytes.extend_from_slice(&table);
    bytes.extend_from_slice(&blob);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;

    fn glyph(code: u8, width: u8, height: u8, f: impl FnMut(u16, u16) -> bool) -> GlyphSource {
        GlyphSource {
            code,
            width,
            height,
            image: Bitmap::from_fn(u16::from(width), u16::from(height), f),
        }
    }

    fn sample_font() -> FontSource {
        FontSource {
            name: "sample".into(),
            default_character: b'?',
            glyphs: vec![
                glyph(b'A', 5, 8, |x, y| x == 0 || y == 0),
                glyph(b'?', 3, 6, |_, _| true),
            ],
        }
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&sample_font()).unwrap();

        assert_eq!(&bytes[..4], &[b'P', b'F', b'?', 2]);
        assert_eq!(&bytes[4..9], &[b'A', 5, 8, 0, 0]);
        // 'A' occupies 1 byte x 8 rows
        assert_eq!(&bytes[9..14], &[b'?', 3, 6, 8, 0]);
        assert_eq!(bytes.len(), 14 + 8 + 6);
        assert_eq!(bytes[14], 0b1111_1000);
        assert_eq!(bytes[15], 0b1000_0000);
        assert_eq!(bytes[22], 0b1110_0000);
    }

    #[test]
    fn test_decode_header_errors() {
        assert_eq!(decode("x", b"PF?").unwrap_err(), FormatError::TooShort);
        assert_eq!(decode("x", b"PX?\x00").unwrap_err(), FormatError::BadMagic);
        assert_eq!(
            decode("x", b"PF?\x02AB").unwrap_err(),
            FormatError::TruncatedTable {
                expected: 10,
                found: 2
            }
        );
    }

    #[test]
    fn test_decode_empty_font() {
        let font = decode("empty", b"PF \x00").unwrap();
        assert_eq!(font.glyph_count(), 0);
        assert_eq!(font.default_character(), b' ');
        assert!(font.glyph_or_default(Some(b'a')).is_none());
        assert!(font.validate().is_ok());
    }

    #[test]
    fn test_default_character_fallback() {
        let font = decode("sample", &encode(&sample_font()).unwrap()).unwrap();
        assert_eq!(font.glyph_or_default(Some(b'A')).unwrap().code, b'A');
        assert_eq!(font.glyph_or_default(Some(b'Z')).unwrap().code, b'?');
        assert_eq!(font.glyph_or_default(None).unwrap().code, b'?');
    }

    #[test]
    fn test_short_blob_decodes_but_is_unreadable() {
        let mut bytes = encode(&sample_font()).unwrap();
        bytes.truncate(bytes.len() - 2);

        let font = decode("short", &bytes).unwrap();
        let question = *font.glyph(b'?').unwrap();
        assert!(font.bitmap(&question).is_none());
        assert!(font.bitmap(font.glyph(b'A').unwrap()).is_some());
        assert_eq!(
            font.validate(),
            Err(FormatError::GlyphOutOfRange { code: b'?' })
        );
    }

    #[test]
    fn test_duplicate_code_last_wins() {
        let bytes = [b'P', b'F', b'a', 2, b'a', 1, 1, 0, 0, b'a', 2, 1, 1, 0, 0x80, 0xC0];
        let font = decode("dup", &bytes).unwrap();
        assert_eq!(font.glyph_count(), 2);
        assert_eq!(font.glyph(b'a').unwrap().width, 2);
    }

    #[test]
    fn test_image_too_small() {
        let mut source = sample_font();
        source.glyphs[1].image = Bitmap::new(2, 6);
        assert_eq!(
            encode(&source),
            Err(EncodeError::ImageTooSmall {
                code: b'?',
                width: 3,
                height: 6,
                image_width: 2,
                image_height: 6,
            })
        );
    }

    #[test]
    fn test_wider_image_is_cropped() {
        let source = FontSource {
            name: "crop".into(),
            default_character: b'x',
            glyphs: vec![GlyphSource {
                code: b'x',
                width: 2,
                height: 1,
                image: Bitmap::from_fn(16, 4, |_, _| true),
            }],
        };
        let bytes = encode(&source).unwrap();
        assert_eq!(&bytes[9..], &[0b1100_0000]);
    }

    #[test]
    fn test_too_many_glyphs() {
        let source = FontSource {
            name: "big".into(),
            default_character: 0,
            glyphs: (0..256).map(|c| glyph(c as u8, 1, 1, |_, _| false)).collect(),
        };
        assert_eq!(encode(&source), Err(EncodeError::TooManyGlyphs(256)));
    }

    #[test]
    fn test_blob_too_large() {
        // 255x255 glyphs take 8160 bytes each; the tenth starts at 73440
        let source = FontSource {
            name: "huge".into(),
            default_character: 0,
            glyphs: (0..10u8).map(|c| glyph(c, 255, 255, |_, _| false)).collect(),
        };
        assert_eq!(encode(&source), Err(EncodeError::BlobTooLarge { code: 9 }));
    }

    fn glyph_strategy() -> impl Strategy<Value = (u8, u8, Vec<bool>)> {
        (0u8..=20, 0u8..=20).prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                proptest::collection::vec(any::<bool>(), w as usize * h as usize),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_roundtrip_preserves_glyphs(
            glyphs in proptest::collection::vec(glyph_strategy(), 1..=40),
            default in any::<u8>(),
        ) {
            let source = FontSource {
                name: "prop".into(),
                default_character: default,
                glyphs: glyphs
                    .iter()
                    .enumerate()
                    .map(|(i, (w, h, px))| {
                        let w16 = u16::from(*w);
                        glyph(i as u8, *w, *h, |x, y| px[(y * w16 + x) as usize])
                    })
                    .collect(),
            };

            let font = decode("prop", &encode(&source).unwrap()).unwrap();
            prop_assert_eq!(font.glyph_count(), source.glyphs.len());
            prop_assert_eq!(font.default_character(), default);
            prop_assert!(font.validate().is_ok());

            for src in &source.glyphs {
                let record = font.glyph(src.code).unwrap();
                prop_assert_eq!(record.width, src.width);
                prop_assert_eq!(record.height, src.height);
                let bitmap = font.bitmap(record).unwrap();
                prop_assert_eq!(bitmap.rows(), src.image.as_bytes());
            }
        }
    }
}
