//! Display configuration

use packfont_hal::i2c::{ALTERNATE_ADDRESS, DEFAULT_ADDRESS};

/// How the panel is wired and initialised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels, a multiple of 8
    pub height: u16,
    /// Contrast sent during initialisation
    pub contrast: u8,
    /// Scan direction flag sent during initialisation, as for
    /// `Ssd1306::rotate`. `true` is upright on the common modules.
    pub rotate: bool,
    /// First controller column the framebuffer maps to
    pub column_offset: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            width: 128,
            height: 64,
            contrast: 0xFF,
            rotate: true,
            column_offset: 0,
        }
    }
}

impl DisplayConfig {
    /// Pick the address from the board's address switch position
    pub fn with_address_switch(mut self, switch_on: bool) -> Self {
        self.address = if switch_on {
            ALTERNATE_ADDRESS
        } else {
            DEFAULT_ADDRESS
        };
        self
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u16 {
        self.height / 8
    }
}
