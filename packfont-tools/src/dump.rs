//! Text rendering of a packed font for inspection
//!
//! ```text
//! font digits: 1 glyphs, default '0', 4 data bytes
//! '0' (48) 3x4 @0
//!   ###
//!   #.#
//!   #.#
//!   ###
//! ```

use std::fmt::Write;

use packfont_format::PackedFont;

fn label(code: u8) -> String {
    match code {
        0x20..=0x7E => format!("'{}'", code as char),
        _ => format!("0x{code:02X}"),
    }
}

/// Header summary followed by each glyph drawn with `#` and `.`
pub fn describe(font: &PackedFont) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "font {}: {} glyphs, default {}, {} data bytes",
        font.name(),
        font.glyph_count(),
        label(font.default_character()),
        font.data().len()
    );
    if font.glyph(font.default_character()).is_none() {
        let _ = writeln!(out, "  default glyph missing");
    }

    for record in font.glyphs() {
        let _ = writeln!(
            out,
            "{} ({}) {}x{} @{}",
            label(record.code),
            record.code,
            record.width,
            record.height,
            record.start
        );
        let Some(bitmap) = font.bitmap(record) else {
            let _ = writeln!(out, "  out of range");
            continue;
        };
        for y in 0..bitmap.height() {
            out.push_str("  ");
            out.extend((0..bitmap.width()).map(|x| if bitmap.get(x, y) { '#' } else { '.' }));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use packfont_format::{decode, encode, Bitmap, FontSource, GlyphSource};

    #[test]
    fn test_describe_draws_glyphs() {
        let bytes = encode(&FontSource {
            name: "digits".into(),
            default_character: b'0',
            glyphs: vec![
                GlyphSource {
                    code: b'0',
                    width: 3,
                    height: 4,
                    image: Bitmap::from_fn(3, 4, |x, y| x != 1 || y == 0 || y == 3),
                },
                GlyphSource {
                    code: 0xB0,
                    width: 2,
                    height: 1,
                    image: Bitmap::from_fn(2, 1, |x, _| x == 1),
                },
            ],
        })
        .unwrap();
        let font = decode("digits", &bytes).unwrap();

        let text = describe(&font);
        let expected = "\
font digits: 2 glyphs, default '0', 5 data bytes
'0' (48) 3x4 @0
  ###
  #.#
  #.#
  ###
0xB0 (176) 2x1 @4
  .#
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_describe_flags_broken_glyphs() {
        // One 8x2 glyph with only one of its two rows present
        let bytes = [b'P', b'F', b'?', 1, b'A', 8, 2, 0, 0, 0xFF];
        let font = decode("broken", &bytes).unwrap();
        let text = describe(&font);
        assert!(text.contains("default glyph missing"));
        assert!(text.contains("'A' (65) 8x2 @0\n  out of range"));
    }
}
