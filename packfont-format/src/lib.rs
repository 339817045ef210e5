//! Packed font container
//!
//! A packed font stores proportional 1bpp glyphs for up to 255 single-byte
//! character codes in a layout that can be rendered straight from flash.
//!
//! # File Layout
//!
//! ```text
//! ┌─────┬──────────┬───────┬───────────────────────┬──────────────┐
//! │ 'P' │ 'F'      │ DEF   │ COUNT                 │              │
//! │ 1B  │ 1B       │ 1B    │ 1B                    │              │
//! ├─────┴──────────┴───────┴───────────────────────┤  header      │
//! │ COUNT x [CODE, WIDTH, HEIGHT, START_LO, START_HI]│  glyph table │
//! ├─────────────────────────────────────────────────┤              │
//! │ glyph rows, ceil(WIDTH/8) bytes each, MSB left   │  blob        │
//! └─────────────────────────────────────────────────┴──────────────┘
//! ```
//!
//! `DEF` names the glyph drawn for codes the font does not contain.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod bitmap;
pub mod codec;
pub mod glyph;
#[cfg(feature = "serde")]
pub mod manifest;

pub use bitmap::{row_bytes, Bitmap, BitmapError};
pub use codec::{
    decode, encode, EncodeError, FontSource, FormatError, GlyphSource, PackedFont, MAGIC,
    MAX_GLYPHS,
};
pub use glyph::{GlyphBitmap, GlyphRecord};
#[cfg(feature = "serde")]
pub use manifest::{FontManifest, ManifestCharacter, ManifestError};
