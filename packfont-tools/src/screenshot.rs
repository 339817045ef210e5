//! Saving framebuffer contents as BMP files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use packfont_display::{Framebuffer, Ssd1306};
use packfont_hal::DisplayBus;

/// Write `framebuffer` to `path` as a 1bpp BMP
pub fn save_bmp(framebuffer: &Framebuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, framebuffer.to_bmp())
        .with_context(|| format!("writing screenshot {}", path.display()))?;
    log::debug!(
        "saved {}x{} screenshot to {}",
        framebuffer.width(),
        framebuffer.height(),
        path.display()
    );
    Ok(())
}

/// Save what the panel shows, if a panel is present
///
/// Returns `false` without touching the file system when it is not.
pub fn save_screenshot<B: DisplayBus>(
    display: &Ssd1306<B>,
    path: impl AsRef<Path>,
) -> Result<bool> {
    let Some(bmp) = display.screenshot() else {
        log::info!("no panel present, screenshot skipped");
        return Ok(false);
    };
    let path = path.as_ref();
    fs::write(path, bmp).with_context(|| format!("writing screenshot {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch;
    use packfont_display::{Color, DisplayConfig};

    struct Absent;

    impl DisplayBus for Absent {
        type Error = ();

        fn write_command(&mut self, _: &[u8]) -> Result<(), ()> {
            Err(())
        }

        fn write_data(&mut self, _: &[u8]) -> Result<(), ()> {
            Err(())
        }
    }

    #[test]
    fn test_save_bmp_is_readable() {
        let dir = scratch::dir("screenshot");
        let mut fb = Framebuffer::new(16, 8).unwrap();
        fb.pixel(3, 2, Color::On);
        let path = dir.join("shot.bmp");
        save_bmp(&fb, &path).unwrap();

        let image = image::open(&path).unwrap().to_luma8();
        assert_eq!(image.dimensions(), (16, 8));
        assert!(image.get_pixel(3, 2).0[0] > 0);
        assert_eq!(image.get_pixel(4, 2).0[0], 0);
    }

    #[test]
    fn test_absent_panel_writes_nothing() {
        let dir = scratch::dir("screenshot-absent");
        let display = Ssd1306::init(Absent, DisplayConfig::default()).unwrap();
        let path = dir.join("shot.bmp");
        assert!(!save_screenshot(&display, &path).unwrap());
        assert!(!path.exists());
    }
}
