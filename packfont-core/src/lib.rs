//! Text rendering core for packed bitmap fonts
//!
//! This crate contains everything between a decoded font file and the
//! pixels of a display, without depending on any particular display:
//!
//! - Font registry (load, select, unload, measure)
//! - Built-in fixed 8x8 font used when no packed font is selected
//! - Text layout with horizontal/vertical alignment inside a box
//! - The `Canvas` trait text is drawn through

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod builtin;
pub mod layout;
pub mod registry;
pub mod traits;

pub use layout::{draw_text, place, HAlign, TextBox, VAlign};
pub use registry::{char_code, ActiveFont, FontRegistry, LoadError, SelectionError};
pub use traits::{Canvas, Color};
