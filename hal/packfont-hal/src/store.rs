//! Font storage abstractions
//!
//! Packed fonts are addressed by name. Where the bytes live (a file
//! system, a flash partition, a table linked into the firmware image) is
//! up to the implementation.

/// Errors from font storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// No font stored under that name
    NotFound,
    /// Underlying storage failed
    Io,
    /// Buffer too small for the stored font
    BufferTooSmall,
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::NotFound => f.write_str("font not found"),
            StoreError::Io => f.write_str("font storage I/O error"),
            StoreError::BufferTooSmall => f.write_str("buffer too small for font"),
        }
    }
}

impl core::error::Error for StoreError {}

/// Named packed font storage
///
/// Loading is two-step so callers can size their buffer exactly before
/// reading.
pub trait FontStore {
    /// Size in bytes of the font stored under `name`
    fn size(&mut self, name: &str) -> Result<usize, StoreError>;

    /// Read the font stored under `name` into `buffer`
    ///
    /// # Returns
    /// The number of bytes read, or an error.
    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StoreError>;
}

impl<S: FontStore + ?Sized> FontStore for &mut S {
    fn size(&mut self, name: &str) -> Result<usize, StoreError> {
        (**self).size(name)
    }

    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StoreError> {
        (**self).read(name, buffer)
    }
}

/// Font store over a fixed table, e.g. fonts pulled in with `include_bytes!`
#[derive(Debug, Clone, Copy)]
pub struct StaticFontStore<'a> {
    entries: &'a [(&'a str, &'a [u8])],
}

impl<'a> StaticFontStore<'a> {
    /// Create a store over `(name, bytes)` pairs
    pub const fn new(entries: &'a [(&'a str, &'a [u8])]) -> Self {
        Self { entries }
    }

    fn find(&self, name: &str) -> Result<&'a [u8], StoreError> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, bytes)| *bytes)
            .ok_or(StoreError::NotFound)
    }
}

impl FontStore for StaticFontStore<'_> {
    fn size(&mut self, name: &str) -> Result<usize, StoreError> {
        self.find(name).map(<[u8]>::len)
    }

    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let bytes = self.find(name)?;
        let target = buffer
            .get_mut(..bytes.len())
            .ok_or(StoreError::BufferTooSmall)?;
        target.copy_from_slice(bytes);
        Ok(bytes.len())
    }
}
