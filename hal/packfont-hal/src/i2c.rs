//! I2C bus abstractions
//!
//! Provides the I2C master trait plus the SSD1306-style control byte
//! framing that turns an I2C master into a [`DisplayBus`].

use crate::bus::DisplayBus;

/// Control byte for a single command byte (Co = 1, D/C# = 0)
pub const CONTROL_COMMAND: u8 = 0x80;

/// Control byte for a run of display data (Co = 0, D/C# = 1)
pub const CONTROL_DATA: u8 = 0x40;

/// Maximum data bytes sent per I2C transaction
pub const DATA_CHUNK_LEN: usize = 128;

/// Default SSD1306 address (address select switch off)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate SSD1306 address (address select switch on)
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// I2C bus master
///
/// Display controllers on I2C are write-only, so a single write
/// transaction is all the display bus needs.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// [`DisplayBus`] over an I2C master using SSD1306 control bytes
///
/// Every command byte goes out as its own `[0x80, byte]` transaction.
/// Display data is split into chunks of [`DATA_CHUNK_LEN`] bytes, each
/// prefixed with `0x40`; the controller's address pointer auto-increments
/// so chunking is invisible to the panel.
pub struct I2cDisplayBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cBus> I2cDisplayBus<I2C> {
    /// Create a display bus for the device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying I2C master
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> DisplayBus for I2cDisplayBus<I2C> {
    type Error = I2C::Error;

    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.i2c.write(self.address, &[CONTROL_COMMAND, byte])?;
        }
        Ok(())
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let mut frame = [0u8; DATA_CHUNK_LEN + 1];
        frame[0] = CONTROL_DATA;
        for chunk in bytes.chunks(DATA_CHUNK_LEN) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &frame[..=chunk.len()])?;
        }
        Ok(())
    }
}

/// Wraps an `embedded-hal` 1.0 I2C master as an [`I2cBus`]
#[cfg(feature = "embedded-hal")]
pub struct EmbeddedHalI2c<T>(pub T);

#[cfg(feature = "embedded-hal")]
impl<T: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Records every transaction as (address, first byte, length)
    struct MockI2c {
        writes: [(u8, u8, usize); 16],
        count: usize,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            Self {
                writes: [(0, 0, 0); 16],
                count: 0,
                fail: false,
            }
        }
    }

    impl I2cBus for MockI2c {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes[self.count] = (address, data[0], data.len());
            self.count += 1;
            Ok(())
        }
    }

    #[test]
    fn test_commands_sent_one_per_transaction() {
        let mut bus = I2cDisplayBus::new(MockI2c::new(), DEFAULT_ADDRESS);
        bus.write_command(&[0x81, 0x7F]).unwrap();

        let i2c = bus.release();
        assert_eq!(i2c.count, 2);
        assert_eq!(i2c.writes[0], (0x3C, CONTROL_COMMAND, 2));
        assert_eq!(i2c.writes[1], (0x3C, CONTROL_COMMAND, 2));
    }

    #[test]
    fn test_data_chunked_with_prefix() {
        let mut bus = I2cDisplayBus::new(MockI2c::new(), ALTERNATE_ADDRESS);
        let data = [0xAAu8; DATA_CHUNK_LEN * 2 + 10];
        bus.write_data(&data).unwrap();

        let i2c = bus.release();
        assert_eq!(i2c.count, 3);
        assert_eq!(i2c.writes[0], (0x3D, CONTROL_DATA, DATA_CHUNK_LEN + 1));
        assert_eq!(i2c.writes[2], (0x3D, CONTROL_DATA, 11));
    }

    #[test]
    fn test_errors_propagate() {
        let mut i2c = MockI2c::new();
        i2c.fail = true;
        let mut bus = I2cDisplayBus::new(i2c, DEFAULT_ADDRESS);
        assert_eq!(bus.write_command(&[0xAF]), Err(()));
        assert_eq!(bus.write_data(&[0x00]), Err(()));
    }
}
