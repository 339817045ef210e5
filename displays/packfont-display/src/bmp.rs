//! Screenshot export as a 1bpp BMP
//!
//! ```text
//! 0x00  "BM" | file size u32 | reserved u32 | pixel offset u32 (0x20)
//! 0x0E  header size u32 (12) | width u16 | height u16 | planes u16 | bpp u16
//! 0x1A  palette: 00 00 00 (off), FF FF FF (on)
//! 0x20  rows, bottom row first, each padded to 4 bytes
//! ```

use alloc::vec::Vec;

use packfont_format::row_bytes;

use crate::framebuffer::Framebuffer;

/// Offset of the pixel rows, also the size of all headers
pub const PIXEL_OFFSET: usize = 0x20;

const CORE_HEADER_LEN: u32 = 12;
const PALETTE: [u8; 6] = [0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF];

/// Bytes per stored row for an image `width` pixels wide
pub const fn stride(width: u16) -> usize {
    (row_bytes(width) + 3) & !3
}

impl Framebuffer {
    /// Encode the current contents as a BMP file
    pub fn to_bmp(&self) -> Vec<u8> {
        let (width, height) = (self.width(), self.height());
        let stride = stride(width);
        let file_len = PIXEL_OFFSET + stride * height as usize;

        let mut out = Vec::with_capacity(file_len);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_len as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(PIXEL_OFFSET as u32).to_le_bytes());

        out.extend_from_slice(&CORE_HEADER_LEN.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&PALETTE);

        for y in (0..height).rev() {
            let row_start = out.len();
            out.resize(row_start + stride, 0);
            for x in 0..width {
                if self.get_pixel(i32::from(x), i32::from(y)).is_on() {
                    out[row_start + (x as usize >> 3)] |= 0x80 >> (x & 7);
                }
            }
        }
        out
    }
}
