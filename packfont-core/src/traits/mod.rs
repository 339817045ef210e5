//! Drawing traits
//!
//! Text layout only ever needs to set single pixels, so that is the whole
//! surface a display has to offer to render packed fonts.

pub mod canvas;

pub use canvas::{Canvas, Color};
