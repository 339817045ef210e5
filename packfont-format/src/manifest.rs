//! Font-source manifest
//!
//! The glyph rasterizer writes one bitmap image per character plus a JSON
//! document describing them:
//!
//! ```json
//! {
//!   "Name": "digits-30.pf",
//!   "Width": 18, "Height": 30,
//!   "DefaultCharacter": " ",
//!   "Characters": [
//!     { "Code": "0", "Width": 17, "Filename": "48.bmp" },
//!     { "Code": "." }
//!   ]
//! }
//! ```
//!
//! Per-character `Width`/`Height` fall back to the font-wide values and a
//! missing `Filename` means `"<Code>.bmp"`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Errors interpreting manifest values
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManifestError {
    /// A code string must hold exactly one character
    NotOneCharacter,
    /// Character beyond the single-byte range
    CodeOutOfRange(u32),
}

impl core::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ManifestError::NotOneCharacter => f.write_str("code must be a single character"),
            ManifestError::CodeOutOfRange(c) => {
                write!(f, "character U+{c:04X} does not fit a single byte")
            }
        }
    }
}

impl core::error::Error for ManifestError {}

/// Top-level manifest document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FontManifest {
    /// Output font name
    pub name: String,
    /// Default glyph width in pixels
    pub width: u8,
    /// Default glyph height in pixels
    pub height: u8,
    /// Fallback character, as a one-character string
    pub default_character: String,
    /// Glyphs in output order
    pub characters: Vec<ManifestCharacter>,
}

/// One glyph entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestCharacter {
    /// Character, as a one-character string
    pub code: String,
    /// Glyph width, if different from the font default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u8>,
    /// Glyph height, if different from the font default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u8>,
    /// Image file, relative to the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Map a one-character string to its single-byte code
pub fn code_point(text: &str) -> Result<u8, ManifestError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            u8::try_from(u32::from(c)).map_err(|_| ManifestError::CodeOutOfRange(c.into()))
        }
        _ => Err(ManifestError::NotOneCharacter),
    }
}

impl FontManifest {
    /// Code of the fallback glyph
    pub fn default_code(&self) -> Result<u8, ManifestError> {
        code_point(&self.default_character)
    }
}

impl ManifestCharacter {
    /// Character code
    pub fn code_point(&self) -> Result<u8, ManifestError> {
        code_point(&self.code)
    }

    /// Effective (width, height)
    pub fn size(&self, manifest: &FontManifest) -> (u8, u8) {
        (
            self.width.unwrap_or(manifest.width),
            self.height.unwrap_or(manifest.height),
        )
    }

    /// Effective image file name
    pub fn image_filename(&self) -> String {
        match &self.filename {
            Some(name) => name.clone(),
            None => format!("{}.bmp", self.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> FontManifest {
        FontManifest {
            name: "text-16.pf".into(),
            width: 8,
            height: 16,
            default_character: "?".into(),
            characters: Vec::new(),
        }
    }

    #[test]
    fn test_code_point() {
        assert_eq!(code_point("A"), Ok(65));
        assert_eq!(code_point("\u{b0}"), Ok(0xB0));
        assert_eq!(code_point(""), Err(ManifestError::NotOneCharacter));
        assert_eq!(code_point("AB"), Err(ManifestError::NotOneCharacter));
        assert_eq!(
            code_point("\u{20ac}"),
            Err(ManifestError::CodeOutOfRange(0x20AC))
        );
    }

    #[test]
    fn test_character_defaults() {
        let font = manifest();
        let c = ManifestCharacter {
            code: "W".into(),
            width: Some(11),
            height: None,
            filename: None,
        };
        assert_eq!(c.size(&font), (11, 16));
        assert_eq!(c.image_filename(), "W.bmp");
        assert_eq!(font.default_code(), Ok(b'?'));
    }
}
