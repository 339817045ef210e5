//! packfont Hardware Abstraction Layer
//!
//! This crate defines the capabilities the display and font code are
//! injected with, so the same rendering code runs on a microcontroller,
//! a Linux single board computer or a host test harness.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  packfont-display / packfont-core       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  packfont-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  host mocks / │
//! │  I2C master   │       │  file system  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::DisplayBus`] - Command/data writes to a display controller
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`store::FontStore`] - Named packed font storage

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod i2c;
pub mod store;

// Re-export key traits at crate root for convenience
pub use bus::DisplayBus;
pub use i2c::{I2cBus, I2cDisplayBus};
pub use store::{FontStore, StaticFontStore, StoreError};

#[cfg(feature = "embedded-hal")]
pub use i2c::EmbeddedHalI2c;
