//! Sprite loading and sheet image output
//!
//! Thin wrappers around the `image` crate: scanning sprite directories into
//! `Sprite` items and writing finished sheets out as 8-bit RGBA PNGs.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::color::Rgba;
use crate::error::{AtlasError, AtlasResult};
use crate::packer::Sheet;
use crate::pixbuf::PixelBuffer;
use crate::sprite::Sprite;

/// Load every `.png` in a directory as a named image sprite.
///
/// Entries are visited in name order so repeated runs produce identical
/// sheets regardless of directory enumeration order.
pub fn load_sprite_dir(dir: &Path) -> AtlasResult<Vec<Sprite>> {
    let entries = fs::read_dir(dir).map_err(|e| AtlasError::ResourceLoad {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AtlasError::ResourceLoad {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let path = entry.path();
        let is_png = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("png"))
            .unwrap_or(false);

        if is_png {
            paths.push(path);
        }
    }
    paths.sort();

    let mut sprites = Vec::with_capacity(paths.len());

    for path in paths {
        let img = image::open(&path)
            .map_err(|e| AtlasError::ResourceLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!("loaded sprite '{}' ({}x{})", name, img.width(), img.height());
        sprites.push(Sprite::image(name, image_to_buffer(&img)));
    }

    if sprites.is_empty() {
        log::warn!("no .png sprites found in {}", dir.display());
    }

    Ok(sprites)
}

/// Sheet image path: `<texture_dir>/<sheet_name>.<index>.png`
///
/// Built as a string with forward slashes because the same value is written
/// into the descriptor's `path` attribute.
pub fn texture_path(texture_dir: &str, sheet_name: &str, index: usize) -> String {
    format!("{texture_dir}/{sheet_name}.{index}.png")
}

/// Write every sheet as an RGBA PNG, returning the paths in sheet order
pub fn save_sheets(
    sheets: &[Sheet],
    sheet_name: &str,
    texture_dir: &str,
) -> AtlasResult<Vec<String>> {
    let mut paths = Vec::with_capacity(sheets.len());

    for (index, sheet) in sheets.iter().enumerate() {
        let path = texture_path(texture_dir, sheet_name, index);

        buffer_to_image(&sheet.pixels)
            .save(&path)
            .map_err(|e| AtlasError::Io {
                path: PathBuf::from(&path),
                reason: e.to_string(),
            })?;

        log::info!(
            "wrote {} ({}x{}, {} sprites)",
            path,
            sheet.pixels.width(),
            sheet.pixels.height(),
            sheet.placements.len()
        );
        paths.push(path);
    }

    Ok(paths)
}

/// Decode an `image` crate RGBA image into a pixel buffer
pub fn image_to_buffer(img: &RgbaImage) -> PixelBuffer<Rgba<u8>> {
    let pixels = img
        .pixels()
        .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
        .collect();

    PixelBuffer::from_pixels(img.width() as usize, img.height() as usize, pixels)
}

/// Wrap a pixel buffer as an `image` crate RGBA image for encoding
pub fn buffer_to_image(buf: &PixelBuffer<Rgba<u8>>) -> RgbaImage {
    RgbaImage::from_fn(buf.width() as u32, buf.height() as u32, |x, y| {
        let c = buf[(y as usize, x as usize)];
        image::Rgba([c.r, c.g, c.b, c.a])
    })
}
