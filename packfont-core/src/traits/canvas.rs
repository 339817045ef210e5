//! Pixel sink for text rendering

/// Monochrome pixel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off (background)
    #[default]
    Off,
    /// Pixel lit (foreground)
    On,
}

impl Color {
    /// Whether the pixel is lit
    pub fn is_on(self) -> bool {
        self == Color::On
    }

    /// The opposite color
    pub fn inverse(self) -> Self {
        match self {
            Color::Off => Color::On,
            Color::On => Color::Off,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

/// Nonzero is foreground, matching the 0/1 color arguments of the
/// MicroPython framebuffer API
impl From<u8> for Color {
    fn from(value: u8) -> Self {
        Color::from(value != 0)
    }
}

/// Something text can be drawn onto
///
/// Coordinates are signed: aligned text may start left of or above the
/// visible area and the implementation decides what that means.
pub trait Canvas {
    /// Set a single pixel
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        (**self).set_pixel(x, y, color)
    }
}
