//! Host-side tooling for packfont
//!
//! - [`pack`]: build a `.pf` file from a JSON manifest and glyph images
//! - [`dump`]: print a packed font as text for inspection
//! - [`store`]: serve fonts to a registry from a directory
//! - [`screenshot`]: save a framebuffer as a BMP file
//! - [`config`]: read the `[display]` table of a TOML file
//!
//! Everything here returns `anyhow::Result` and logs through `log`; the
//! caller picks the logger.

pub mod config;
pub mod dump;
pub mod pack;
pub mod screenshot;
pub mod store;

pub use config::{load_display_config, parse_display_config};
pub use dump::describe;
pub use pack::{pack_manifest, PackedFontFile};
pub use screenshot::save_bmp;
pub use store::DirFontStore;

#[cfg(test)]
pub(crate) mod scratch {
    use std::path::PathBuf;

    /// Empty per-test directory under the system temp dir
    pub fn dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("packfont-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
