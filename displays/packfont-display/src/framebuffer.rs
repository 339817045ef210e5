//! Page-major 1bpp framebuffer
//!
//! The buffer has the SSD1306 display RAM layout, so [`Framebuffer::as_bytes`]
//! can be sent to the controller as-is:
//!
//! ```text
//!            x=0    x=1         x=width-1
//! page 0   [ b0 ] [ b1 ] ...  [ b127 ]   bit 0 = row 0 ... bit 7 = row 7
//! page 1   [b128] [b129] ...  [ b255 ]   bit 0 = row 8 ... bit 7 = row 15
//!   ...
//! ```
//!
//! # Coordinates
//!
//! Every pixel write and read wraps both coordinates (Euclidean modulo), so
//! `(-1, 0)` addresses the last column and `(width, 0)` the first. Shapes
//! that run off one edge reappear at the opposite edge.

use alloc::vec;
use core::f64::consts::PI;
use alloc::vec::Vec;

use packfont_core::{Canvas, Color};

use crate::error::DisplayError;
use crate::pbm::{self, PbmError};

/// Rows per page
pub const PAGE_HEIGHT: u16 = 8;

/// 1bpp framebuffer stored page-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    buffer: Vec<u8>,
}

impl Framebuffer {
    /// Create a cleared framebuffer
    ///
    /// Height must be a whole number of pages.
    pub fn new(width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 || height % PAGE_HEIGHT != 0 {
            return Err(DisplayError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            buffer: vec![0; width as usize * (height / PAGE_HEIGHT) as usize],
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u16 {
        self.height / PAGE_HEIGHT
    }

    /// Raw display RAM image
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte index and bit mask of a wrapped coordinate
    fn locate(&self, x: i32, y: i32) -> (usize, u8) {
        let x = x.rem_euclid(i32::from(self.width)) as usize;
        let y = y.rem_euclid(i32::from(self.height)) as usize;
        ((y >> 3) * self.width as usize + x, 1 << (y & 7))
    }

    /// Set one pixel
    pub fn pixel(&mut self, x: i32, y: i32, color: Color) {
        let (index, mask) = self.locate(x, y);
        if color.is_on() {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }

    /// Read one pixel
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        let (index, mask) = self.locate(x, y);
        Color::from(self.buffer[index] & mask != 0)
    }

    /// Set every pixel
    pub fn fill(&mut self, color: Color) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Bresenham line, both endpoints included
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let (mut x1, mut y1, mut x2, mut y2) = (x1, y1, x2, y2);

        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        if steep {
            core::mem::swap(&mut x1, &mut y1);
            core::mem::swap(&mut x2, &mut y2);
        }
        if x1 > x2 {
            core::mem::swap(&mut x1, &mut x2);
            core::mem::swap(&mut y1, &mut y2);
        }

        let dx = x2 - x1;
        let dy = (y2 - y1).abs();
        let ystep = if y1 < y2 { 1 } else { -1 };
        let mut err = dx / 2;

        let mut y = y1;
        for x in x1..=x2 {
            if steep {
                self.pixel(y, x, color);
            } else {
                self.pixel(x, y, color);
            }
            err -= dy;
            if err < 0 {
                y += ystep;
                err += dx;
            }
        }
    }

    /// Horizontal line of `len + 1` pixels
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: Color) {
        self.line(x, y, x + len, y, color);
    }

    /// Vertical line of `len + 1` pixels
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: Color) {
        self.line(x, y, x, y + len, color);
    }

    /// Rectangle outline with corners (x, y) and (x + w, y + h)
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.hline(x, y, w, color);
        self.hline(x, y + h, w, color);
        self.vline(x, y, h, color);
        self.vline(x + w, y, h, color);
    }

    /// Filled rectangle, rows `y..y + h`
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for row in y..y + h {
            self.hline(x, row, w, color);
        }
    }

    /// Circle centered on (cx, cy)
    ///
    /// A `thickness` of 1 or more gives a filled disk. Below that it is the
    /// ring width as a fraction of `r`.
    pub fn circle(&mut self, cx: i32, cy: i32, r: i32, thickness: f32, color: Color) {
        let outer = r * r;
        let inner = r as f32 - r as f32 * thickness - 1.0;
        let inner = inner * inner;

        for i in cx - r..=cx + r {
            for j in cy - r..=cy + r {
                let d = (i - cx) * (i - cx) + (j - cy) * (j - cy);
                if d >= outer {
                    continue;
                }
                if thickness >= 1.0 || d as f32 >= inner {
                    self.pixel(i, j, color);
                }
            }
        }
    }

    /// Arc between two angles in degrees, sampled every degree
    ///
    /// Angles run clockwise from the positive x axis since y grows down.
    /// `thickness` is the arc width as a fraction of `r`; 0 draws the single
    /// radius `r - 1`.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        start_deg: i32,
        end_deg: i32,
        thickness: f32,
        color: Color,
    ) {
        let inner = libm::floor(f64::from(r) * (1.0 - f64::from(thickness))) as i32 - 1;
        for i in inner..r {
            let radius = f64::from(i);
            for angle in start_deg..end_deg {
                let rad = f64::from(angle) * PI / 180.0;
                let x = (radius * libm::cos(rad) + f64::from(cx)) as i32;
                let y = (radius * libm::sin(rad) + f64::from(cy)) as i32;
                self.pixel(x, y, color);
            }
        }
    }

    /// Shift the contents by (dx, dy)
    ///
    /// Pixels shifted out are lost. The vacated band keeps its old
    /// contents.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let (width, height) = (i32::from(self.width), i32::from(self.height));

        // Walk away from the direction of travel so sources are read before
        // they are overwritten
        let span = |step: i32, size: i32| {
            let (start, dir) = if step < 0 { (0, 1) } else { (size - 1, -1) };
            (0..(size - step.abs()).max(0)).map(move |k| start + k * dir)
        };

        for y in span(dy, height) {
            for x in span(dx, width) {
                let color = self.get_pixel(x - dx, y - dy);
                self.pixel(x, y, color);
            }
        }
    }

    /// Draw a P4 PBM image at the origin
    ///
    /// Foreground bits are drawn in `color`; background bits leave the
    /// framebuffer untouched. Parts of the image beyond the framebuffer are
    /// dropped.
    pub fn blit(&mut self, pbm_bytes: &[u8], color: Color) -> Result<(), PbmError> {
        let image = pbm::decode(pbm_bytes)?;
        for y in 0..image.height().min(self.height) {
            for x in 0..image.width().min(self.width) {
                if image.get(x, y) {
                    self.pixel(i32::from(x), i32::from(y), color);
                }
            }
        }
        Ok(())
    }
}

impl Canvas for Framebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.pixel(x, y, color);
    }
}
