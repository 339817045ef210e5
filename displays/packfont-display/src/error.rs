//! Display crate errors

/// Errors constructing display-side objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Width must be nonzero and height a nonzero multiple of 8
    InvalidDimensions {
        /// Requested width
        width: u16,
        /// Requested height
        height: u16,
    },
    /// Panel larger than the controller's 128x64 RAM, or shifted past it
    UnsupportedGeometry {
        /// Requested width
        width: u16,
        /// Requested height
        height: u16,
        /// First controller column
        column_offset: u8,
    },
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::InvalidDimensions { width, height } => {
                write!(f, "invalid display size {width}x{height}")
            }
            DisplayError::UnsupportedGeometry {
                width,
                height,
                column_offset,
            } => write!(
                f,
                "controller cannot address {width}x{height} starting at column {column_offset}"
            ),
        }
    }
}

impl core::error::Error for DisplayError {}
