//! Directory-backed font store
//!
//! Font `name` lives at `<dir>/<name>.pf`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use packfont_hal::{FontStore, StoreError};

/// Packed font file extension
pub const EXTENSION: &str = "pf";

/// [`FontStore`] over `.pf` files in one directory
#[derive(Debug, Clone)]
pub struct DirFontStore {
    dir: PathBuf,
}

impl DirFontStore {
    /// Serve fonts from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory fonts are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing font `name`
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }
}

fn store_error(e: io::Error) -> StoreError {
    match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound,
        _ => StoreError::Io,
    }
}

impl FontStore for DirFontStore {
    fn size(&mut self, name: &str) -> Result<usize, StoreError> {
        let path = self.path_of(name);
        let metadata = fs::metadata(&path).map_err(store_error)?;
        log::debug!("{} is {} bytes", path.display(), metadata.len());
        usize::try_from(metadata.len()).map_err(|_| StoreError::BufferTooSmall)
    }

    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let mut bytes = Vec::new();
        fs::File::open(self.path_of(name))
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .map_err(store_error)?;

        let target = buffer
            .get_mut(..bytes.len())
            .ok_or(StoreError::BufferTooSmall)?;
        target.copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch;
    use packfont_core::FontRegistry;
    use packfont_format::{encode, Bitmap, FontSource, GlyphSource};

    #[test]
    fn test_reads_named_file() {
        let dir = scratch::dir("store-read");
        fs::write(dir.join("digits.pf"), b"PF0\x00").unwrap();

        let mut store = DirFontStore::new(&dir);
        assert_eq!(store.size("digits"), Ok(4));
        assert_eq!(store.size("letters"), Err(StoreError::NotFound));

        let mut buffer = [0u8; 4];
        assert_eq!(store.read("digits", &mut buffer), Ok(4));
        assert_eq!(&buffer, b"PF0\x00");

        let mut small = [0u8; 3];
        assert_eq!(
            store.read("digits", &mut small),
            Err(StoreError::BufferTooSmall)
        );
    }

    #[test]
    fn test_registry_loads_from_directory() {
        let dir = scratch::dir("store-registry");
        let font = encode(&FontSource {
            name: "dot".into(),
            default_character: b'.',
            glyphs: vec![GlyphSource {
                code: b'.',
                width: 2,
                height: 2,
                image: Bitmap::from_fn(2, 2, |_, _| true),
            }],
        })
        .unwrap();
        fs::write(dir.join("dot.pf"), font).unwrap();

        let mut registry = FontRegistry::new();
        registry.load("dot", &mut DirFontStore::new(&dir)).unwrap();
        registry.select(Some("dot")).unwrap();
        assert_eq!(registry.measure("..."), (6, 2));
    }
}
