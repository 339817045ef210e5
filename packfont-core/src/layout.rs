//! Text layout and glyph emission
//!
//! ```text
//!   x,y ┌──────────── width ────────────┐
//!       │ Left        Center      Right │ Top
//!       │                               │ Middle   height
//!       │                               │ Bottom
//!       └───────────────────────────────┘
//! ```
//!
//! Text is a single line. Glyphs are emitted left to right, each advancing
//! the cursor by its own width, and only foreground pixels are written.
//! Origins are never clamped; what happens off the edge is up to the
//! [`Canvas`].

use packfont_format::PackedFont;

use crate::builtin;
use crate::registry::{char_code, ActiveFont, FontRegistry};
use crate::traits::{Canvas, Color};

/// Horizontal alignment inside the text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment inside the text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Where to put a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBox {
    /// Left edge of the box
    pub x: i32,
    /// Top edge of the box
    pub y: i32,
    /// Box width, 0 disables horizontal alignment
    pub width: i32,
    pub h_align: HAlign,
    /// Box height, 0 disables vertical alignment
    pub height: i32,
    pub v_align: VAlign,
}

impl TextBox {
    /// Unaligned text starting at (x, y)
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: 0,
            h_align: HAlign::Left,
            height: 0,
            v_align: VAlign::Top,
        }
    }

    /// Text aligned inside a `width` x `height` box at (x, y)
    pub const fn aligned(
        x: i32,
        y: i32,
        width: i32,
        h_align: HAlign,
        height: i32,
        v_align: VAlign,
    ) -> Self {
        Self {
            x,
            y,
            width,
            h_align,
            height,
            v_align,
        }
    }

    fn needs_measure(&self) -> bool {
        (self.width > 0 && self.h_align != HAlign::Left)
            || (self.height > 0 && self.v_align != VAlign::Top)
    }
}

fn shift(origin: i32, space: i32, size: i32, centered: bool, trailing: bool) -> i32 {
    if centered {
        origin + (space - size).div_euclid(2)
    } else if trailing {
        origin + (space - size)
    } else {
        origin
    }
}

/// Top-left corner the first glyph of `text` is drawn at
pub fn place(registry: &FontRegistry, text: &str, text_box: &TextBox) -> (i32, i32) {
    if !text_box.needs_measure() {
        return (text_box.x, text_box.y);
    }

    let (width, height) = registry.measure(text);
    let (width, height) = (width as i32, height as i32);

    let x = shift(
        text_box.x,
        text_box.width,
        width,
        text_box.h_align == HAlign::Center,
        text_box.h_align == HAlign::Right,
    );
    let y = shift(
        text_box.y,
        text_box.height,
        height,
        text_box.v_align == VAlign::Middle,
        text_box.v_align == VAlign::Bottom,
    );
    (x, y)
}

/// Draw `text` in the selected font
///
/// Returns the x coordinate following the last glyph.
pub fn draw_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    registry: &FontRegistry,
    text: &str,
    text_box: &TextBox,
    color: Color,
) -> i32 {
    let (x, y) = place(registry, text, text_box);
    match registry.active() {
        ActiveFont::Builtin => draw_builtin(canvas, text, x, y, color),
        ActiveFont::Packed(font) => draw_packed(canvas, font, text, x, y, color),
    }
}

fn draw_builtin<C: Canvas + ?Sized>(canvas: &mut C, text: &str, mut x: i32, y: i32, color: Color) -> i32 {
    let size = i32::from(builtin::GLYPH_SIZE);
    for c in text.chars() {
        if let Some(rows) = char_code(c).and_then(builtin::glyph) {
            for gy in 0..builtin::GLYPH_SIZE {
                for gx in 0..builtin::GLYPH_SIZE {
                    if builtin::is_set(rows, gx, gy) {
                        canvas.set_pixel(x + i32::from(gx), y + i32::from(gy), color);
                    }
                }
            }
        }
        x += size;
    }
    x
}

fn draw_packed<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &PackedFont,
    text: &str,
    mut x: i32,
    y: i32,
    color: Color,
) -> i32 {
    for c in text.chars() {
        let Some(record) = font.glyph_or_default(char_code(c)) else {
            continue;
        };
        // Glyphs whose rows lie outside the blob still advance
        if let Some(bitmap) = font.bitmap(record) {
            for (gx, gy) in bitmap.pixels() {
                canvas.set_pixel(x + i32::from(gx), y + i32::from(gy), color);
            }
        }
        x += i32::from(record.width);
    }
    x
}
