//! Display bus abstraction
//!
//! Display controllers distinguish command bytes from pixel data. How that
//! distinction is made on the wire (an I2C control byte, a D/C pin on SPI)
//! is the transport's business.

/// Byte-oriented command/data channel to a display controller
pub trait DisplayBus {
    /// Error type for bus operations
    type Error;

    /// Write a sequence of command bytes (opcodes and their parameters)
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Write a block of display RAM data
    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<B: DisplayBus + ?Sized> DisplayBus for &mut B {
    type Error = B::Error;

    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_command(bytes)
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_data(bytes)
    }
}
