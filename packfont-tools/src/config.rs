//! Display configuration from TOML
//!
//! ```toml
//! [display]
//! address = 0x3C
//! width = 128
//! height = 64
//! contrast = 255
//! rotate = true
//! column_offset = 0
//! ```
//!
//! Missing keys, or a missing `[display]` table, take the defaults.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use packfont_display::DisplayConfig;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    display: DisplayConfig,
}

/// Parse the `[display]` table of a TOML document
pub fn parse_display_config(text: &str) -> Result<DisplayConfig> {
    let file: ConfigFile = toml::from_str(text).context("parsing display configuration")?;
    let config = file.display;

    ensure!(config.width > 0, "display width must be positive");
    ensure!(
        config.height > 0 && config.height % 8 == 0,
        "display height {} is not a positive multiple of 8",
        config.height
    );
    ensure!(config.address < 0x80, "address {:#x} is not a 7-bit address", config.address);

    Ok(config)
}

/// Read and parse a TOML configuration file
pub fn load_display_config(path: impl AsRef<Path>) -> Result<DisplayConfig> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config =
        parse_display_config(&text).with_context(|| format!("in config {}", path.display()))?;
    log::info!(
        "display {}x{} at {:#x} from {}",
        config.width,
        config.height,
        config.address,
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch;

    #[test]
    fn test_full_table() {
        let config = parse_display_config(
            r#"
            [display]
            address = 0x3D
            width = 128
            height = 32
            contrast = 0x7F
            rotate = false
            column_offset = 2
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            DisplayConfig {
                address: 0x3D,
                width: 128,
                height: 32,
                contrast: 0x7F,
                rotate: false,
                column_offset: 2,
            }
        );
    }

    #[test]
    fn test_missing_keys_default() {
        let config = parse_display_config("[display]\nheight = 32\n").unwrap();
        assert_eq!(config.height, 32);
        assert_eq!(config.address, 0x3C);
        assert!(config.rotate);

        assert_eq!(parse_display_config("").unwrap(), DisplayConfig::default());
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert!(parse_display_config("[display]\nheight = 60\n").is_err());
        assert!(parse_display_config("[display]\nwidth = 0\n").is_err());
        assert!(parse_display_config("[display]\naddress = 0x90\n").is_err());
        assert!(parse_display_config("[display]\ncontrast = 300\n").is_err());
    }

    #[test]
    fn test_load_names_file() {
        let dir = scratch::dir("config");
        let path = dir.join("display.toml");
        fs::write(&path, "[display]\nwidth = 96\n").unwrap();
        assert_eq!(load_display_config(&path).unwrap().width, 96);

        let error = load_display_config(dir.join("missing.toml")).unwrap_err();
        assert!(format!("{error:#}").contains("missing.toml"));
    }
}
