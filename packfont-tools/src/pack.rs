//! Packing a font from a manifest and per-glyph images

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use packfont_format::{encode, Bitmap, FontManifest, FontSource, GlyphSource};

/// An encoded font ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFontFile {
    /// File name, taken verbatim from the manifest
    pub name: String,
    /// Encoded `.pf` contents
    pub bytes: Vec<u8>,
}

impl PackedFontFile {
    /// Write into `dir` under the font's name and return the path written
    pub fn write_packed(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.name);
        fs::write(&path, &self.bytes)
            .with_context(|| format!("writing packed font {}", path.display()))?;
        log::info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Parse a JSON manifest
pub fn read_manifest(path: impl AsRef<Path>) -> Result<FontManifest> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing manifest {}", path.display()))
}

/// Load an image as a bitmap; any non-zero luma is foreground
pub fn load_glyph_image(path: impl AsRef<Path>) -> Result<Bitmap> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("opening glyph image {}", path.display()))?
        .to_luma8();

    let (width, height) = image.dimensions();
    let width = u16::try_from(width)
        .with_context(|| format!("{} is {width} pixels wide", path.display()))?;
    let height = u16::try_from(height)
        .with_context(|| format!("{} is {height} pixels high", path.display()))?;

    Ok(Bitmap::from_fn(width, height, |x, y| {
        image.get_pixel(u32::from(x), u32::from(y)).0[0] > 0
    }))
}

/// Build the font described by the manifest at `path`
///
/// Glyph images are resolved relative to the manifest's directory and
/// cropped to each glyph's size.
pub fn pack_manifest(path: impl AsRef<Path>) -> Result<PackedFontFile> {
    let path = path.as_ref();
    let manifest = read_manifest(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let default_character = manifest
        .default_code()
        .with_context(|| format!("default character {:?}", manifest.default_character))?;

    let mut glyphs = Vec::with_capacity(manifest.characters.len());
    for character in &manifest.characters {
        let code = character
            .code_point()
            .with_context(|| format!("character {:?}", character.code))?;
        let (width, height) = character.size(&manifest);
        let image = load_glyph_image(base.join(character.image_filename()))?;
        glyphs.push(GlyphSource {
            code,
            width,
            height,
            image,
        });
    }

    let source = FontSource {
        name: manifest.name.clone(),
        default_character,
        glyphs,
    };
    let bytes = encode(&source).with_context(|| format!("encoding {}", manifest.name))?;
    log::info!(
        "packed {} glyphs of {} into {} bytes",
        source.glyphs.len(),
        manifest.name,
        bytes.len()
    );

    Ok(PackedFontFile {
        name: manifest.name,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch;
    use image::{GrayImage, Luma};
    use packfont_format::decode;

    fn write_glyph(dir: &Path, file: &str, width: u32, height: u32, on: impl Fn(u32, u32) -> bool) {
        GrayImage::from_fn(width, height, |x, y| Luma([if on(x, y) { 200 } else { 0 }]))
            .save(dir.join(file))
            .unwrap();
    }

    #[test]
    fn test_pack_manifest_round_trips() {
        let dir = scratch::dir("pack");
        // Wider than the glyph; the extra column must be dropped
        write_glyph(&dir, "L.png", 5, 4, |x, y| x == 0 || y == 3 || x == 4);
        write_glyph(&dir, "dot.png", 2, 2, |_, _| true);
        fs::write(
            dir.join("font.json"),
            r#"{
                "Name": "tiny.pf",
                "Width": 4, "Height": 4,
                "DefaultCharacter": ".",
                "Characters": [
                    { "Code": "L", "Filename": "L.png" },
                    { "Code": ".", "Width": 2, "Height": 2, "Filename": "dot.png" }
                ]
            }"#,
        )
        .unwrap();

        let packed = pack_manifest(dir.join("font.json")).unwrap();
        assert_eq!(packed.name, "tiny.pf");

        let font = decode("tiny", &packed.bytes).unwrap();
        assert_eq!(font.default_character(), b'.');
        assert_eq!(font.glyph_count(), 2);

        let record = font.glyph(b'L').unwrap();
        assert_eq!((record.width, record.height), (4, 4));
        let bitmap = font.bitmap(record).unwrap();
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(1, 0));
        assert!(bitmap.get(3, 3));
        assert_eq!(bitmap.pixels().count(), 4 + 3);

        let written = packed.write_packed(&dir).unwrap();
        assert_eq!(written, dir.join("tiny.pf"));
        assert_eq!(fs::read(written).unwrap(), packed.bytes);
    }

    #[test]
    fn test_missing_image_names_file() {
        let dir = scratch::dir("pack-missing");
        fs::write(
            dir.join("font.json"),
            r#"{ "Name": "x.pf", "Width": 4, "Height": 4,
                 "DefaultCharacter": "A", "Characters": [ { "Code": "A" } ] }"#,
        )
        .unwrap();

        let error = pack_manifest(dir.join("font.json")).unwrap_err();
        assert!(format!("{error:#}").contains("A.bmp"));
    }

    #[test]
    fn test_undersized_image_is_rejected() {
        let dir = scratch::dir("pack-small");
        write_glyph(&dir, "A.png", 2, 2, |_, _| false);
        fs::write(
            dir.join("font.json"),
            r#"{ "Name": "x.pf", "Width": 4, "Height": 4, "DefaultCharacter": "A",
                 "Characters": [ { "Code": "A", "Filename": "A.png" } ] }"#,
        )
        .unwrap();

        assert!(pack_manifest(dir.join("font.json")).is_err());
    }
}
