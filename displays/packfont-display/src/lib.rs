//! Monochrome graphics for SSD1306 class OLED panels
//!
//! This crate provides:
//! - [`Framebuffer`]: page-major 1bpp buffer with pixel, line, rectangle,
//!   circle, arc, scroll and PBM blit primitives
//! - [`Graph2D`]: scrolling point/bar graph over a buffer region
//! - [`Ssd1306`]: the panel adapter, generic over a [`DisplayBus`], which
//!   owns a framebuffer and a font registry and degrades to a no-op when
//!   the panel is missing
//!
//! # Architecture
//!
//! ```text
//!   caller ──▶ Ssd1306 ──▶ Framebuffer ◀── packfont-core (text via Canvas)
//!                 │
//!                 └──show()──▶ DisplayBus (I2C, SPI, mock)
//! ```
//!
//! [`DisplayBus`]: packfont_hal::DisplayBus

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod bmp;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod graph;
pub mod pbm;
pub mod ssd1306;

pub use config::DisplayConfig;
pub use error::DisplayError;
pub use framebuffer::Framebuffer;
pub use graph::{Graph2D, GraphError, GraphMode};
pub use pbm::PbmError;
pub use ssd1306::{AdapterState, AdapterStatus, Ssd1306};

// Text types used with the adapter
pub use packfont_core::{Color, HAlign, TextBox, VAlign};
