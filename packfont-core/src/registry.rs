//! Font registry
//!
//! Owns the loaded packed fonts by name and remembers which one text is
//! currently rendered in. Nothing here is global: a program driving two
//! displays simply owns two registries (or shares one by reference).

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;

use packfont_format::{decode, FormatError, PackedFont};
use packfont_hal::{FontStore, StoreError};

use crate::builtin;

/// Errors that can occur while loading a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// The store could not provide the font bytes
    Store(StoreError),
    /// The bytes are not a packed font
    Format(FormatError),
}

impl From<StoreError> for LoadError {
    fn from(e: StoreError) -> Self {
        LoadError::Store(e)
    }
}

impl From<FormatError> for LoadError {
    fn from(e: FormatError) -> Self {
        LoadError::Format(e)
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Store(e) => write!(f, "cannot read font: {e}"),
            LoadError::Format(e) => write!(f, "cannot decode font: {e}"),
        }
    }
}

impl core::error::Error for LoadError {}

/// Selecting a font that has not been loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionError {
    /// No font registered under the requested name
    UnknownFont,
}

impl core::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectionError::UnknownFont => f.write_str("cannot select unknown font"),
        }
    }
}

impl core::error::Error for SelectionError {}

/// Single-byte code of a character, `None` beyond U+00FF
pub fn char_code(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

/// The font text is currently rendered in
#[derive(Debug, Clone, Copy)]
pub enum ActiveFont<'a> {
    /// Built-in fixed 8x8 font
    Builtin,
    /// A loaded packed font
    Packed(&'a PackedFont),
}

impl ActiveFont<'_> {
    /// Width and height of `text` rendered in this font
    ///
    /// Characters missing from a packed font are measured as its default
    /// character. A character with neither contributes nothing.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            ActiveFont::Builtin => {
                let size = u32::from(builtin::GLYPH_SIZE);
                (text.chars().count() as u32 * size, size)
            }
            ActiveFont::Packed(font) => text
                .chars()
                .filter_map(|c| font.glyph_or_default(char_code(c)))
                .fold((0, 0), |(width, height), glyph| {
                    (
                        width + u32::from(glyph.width),
                        height.max(u32::from(glyph.height)),
                    )
                }),
        }
    }
}

/// Loaded fonts plus the current selection
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: BTreeMap<String, PackedFont>,
    selected: Option<String>,
}

impl FontRegistry {
    /// Create an empty registry with the built-in font selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `name` from `store` unless it is already resident
    ///
    /// On error the registry is left as it was.
    pub fn load<S: FontStore + ?Sized>(&mut self, name: &str, store: &mut S) -> Result<(), LoadError> {
        if self.fonts.contains_key(name) {
            return Ok(());
        }

        let size = store.size(name).inspect_err(|_| {
            warn!("font {} not found", name);
        })?;
        let mut bytes = vec![0u8; size];
        let read = store.read(name, &mut bytes)?;
        bytes.truncate(read);

        self.load_bytes(name, &bytes)?;
        Ok(())
    }

    /// Load each font in `names`, stopping at the first failure
    pub fn load_all<S: FontStore + ?Sized>(
        &mut self,
        names: &[&str],
        store: &mut S,
    ) -> Result<(), LoadError> {
        for name in names {
            self.load(name, store)?;
        }
        Ok(())
    }

    /// Register a font from bytes already in memory
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), FormatError> {
        if self.fonts.contains_key(name) {
            return Ok(());
        }

        let font = decode(name, bytes).inspect_err(|_| {
            warn!("{} has an unknown file format", name);
        })?;

        // Rendering skips glyphs whose rows are missing; flag it once here
        if let Err(FormatError::GlyphOutOfRange { code }) = font.validate() {
            warn!("font {}: glyph {} extends past the glyph data", name, code);
        }

        info!(
            "loaded font {} with {} characters",
            name,
            font.glyph_count()
        );
        self.fonts.insert(String::from(name), font);
        Ok(())
    }

    /// Drop every font and fall back to the built-in font
    pub fn unload_all(&mut self) {
        self.fonts.clear();
        self.selected = None;
    }

    /// Select a loaded font by name, or the built-in font with `None`
    ///
    /// Selecting an unknown font keeps the previous selection.
    pub fn select(&mut self, name: Option<&str>) -> Result<(), SelectionError> {
        match name {
            None => {
                self.selected = None;
                Ok(())
            }
            Some(name) if self.fonts.contains_key(name) => {
                if self.selected.as_deref() != Some(name) {
                    debug!("selected font {}", name);
                    self.selected = Some(String::from(name));
                }
                Ok(())
            }
            Some(name) => {
                warn!("cannot select unknown font {}", name);
                Err(SelectionError::UnknownFont)
            }
        }
    }

    /// Name of the selected font, `None` for the built-in font
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The font text is rendered in
    pub fn active(&self) -> ActiveFont<'_> {
        self.selected
            .as_deref()
            .and_then(|name| self.fonts.get(name))
            .map_or(ActiveFont::Builtin, ActiveFont::Packed)
    }

    /// Width and height of `text` in the selected font
    pub fn measure(&self, text: &str) -> (u32, u32) {
        self.active().measure(text)
    }

    /// A loaded font by name
    pub fn font(&self, name: &str) -> Option<&PackedFont> {
        self.fonts.get(name)
    }

    /// Whether `name` is loaded
    pub fn is_loaded(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Number of loaded fonts
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no fonts are loaded
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::vec::Vec;
    use packfont_format::{encode, Bitmap, FontSource, GlyphSource};
    use packfont_hal::StaticFontStore;

    fn glyph(code: u8, width: u8, height: u8) -> GlyphSource {
        GlyphSource {
            code,
            width,
            height,
            image: Bitmap::from_fn(u16::from(width), u16::from(height), |x, y| x == y),
        }
    }

    /// 'A' 5x8 and default '?' 3x6
    pub(crate) fn sample_font_bytes() -> Vec<u8> {
        encode(&FontSource {
            name: "sample".into(),
            default_character: b'?',
            glyphs: vec![glyph(b'A', 5, 8), glyph(b'?', 3, 6)],
        })
        .unwrap()
    }

    pub(crate) fn sample_registry() -> FontRegistry {
        let mut registry = FontRegistry::new();
        registry.load_bytes("sample", &sample_font_bytes()).unwrap();
        registry.select(Some("sample")).unwrap();
        registry
    }

    #[test]
    fn test_measure_with_fallback() {
        let registry = sample_registry();
        assert_eq!(registry.measure("A?Z"), (5 + 3 + 3, 8));
        assert_eq!(registry.measure("?"), (3, 6));
        // Beyond single-byte codes also fall back
        assert_eq!(registry.measure("\u{263A}"), (3, 6));
    }

    #[test]
    fn test_measure_empty_text() {
        assert_eq!(sample_registry().measure(""), (0, 0));
    }

    #[test]
    fn test_measure_builtin() {
        let registry = FontRegistry::new();
        assert_eq!(registry.measure("Hello"), (40, 8));
        assert_eq!(registry.measure("\u{b0}C"), (16, 8));
    }

    #[test]
    fn test_measure_without_default_glyph() {
        let bytes = encode(&FontSource {
            name: "nodefault".into(),
            default_character: b'#',
            glyphs: vec![glyph(b'1', 4, 7)],
        })
        .unwrap();
        let mut registry = FontRegistry::new();
        registry.load_bytes("nodefault", &bytes).unwrap();
        registry.select(Some("nodefault")).unwrap();
        assert_eq!(registry.measure("1x1"), (8, 7));
    }

    #[test]
    fn test_select_unknown_keeps_previous() {
        let mut registry = sample_registry();
        assert_eq!(
            registry.select(Some("missing")),
            Err(SelectionError::UnknownFont)
        );
        assert_eq!(registry.selected_name(), Some("sample"));

        registry.select(None).unwrap();
        assert_eq!(registry.selected_name(), None);
        assert!(matches!(registry.active(), ActiveFont::Builtin));
    }

    #[test]
    fn test_load_from_store_is_idempotent() {
        let bytes = sample_font_bytes();
        let entries = [("text-16", bytes.as_slice())];
        let mut store = StaticFontStore::new(&entries);

        let mut registry = FontRegistry::new();
        registry.load("text-16", &mut store).unwrap();
        registry.load("text-16", &mut store).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.font("text-16").unwrap().name(), "text-16");
    }

    #[test]
    fn test_load_failures_leave_registry_unchanged() {
        let garbage: &[u8] = b"GIF89a";
        let entries = [("broken", garbage)];
        let mut store = StaticFontStore::new(&entries);

        let mut registry = sample_registry();
        assert_eq!(
            registry.load("missing", &mut store),
            Err(LoadError::Store(StoreError::NotFound))
        );
        assert_eq!(
            registry.load("broken", &mut store),
            Err(LoadError::Format(FormatError::BadMagic))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.selected_name(), Some("sample"));
    }

    #[test]
    fn test_load_all_stops_at_first_error() {
        let bytes = sample_font_bytes();
        let entries = [("a", bytes.as_slice()), ("c", bytes.as_slice())];
        let mut store = StaticFontStore::new(&entries);

        let mut registry = FontRegistry::new();
        assert!(registry.load_all(&["a", "b", "c"], &mut store).is_err());
        assert!(registry.is_loaded("a"));
        assert!(!registry.is_loaded("c"));
    }

    #[test]
    fn test_unload_all_selects_builtin() {
        let mut registry = sample_registry();
        registry.unload_all();
        assert!(registry.is_empty());
        assert_eq!(registry.selected_name(), None);
        assert_eq!(registry.measure("ab"), (16, 8));
    }
}
