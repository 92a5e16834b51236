//! I/O helpers for colour frames, masks and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned `RgbImage`.
//! - `save_rgb_image`: write an `RgbImage` to disk (format from the extension).
//! - `save_mask`: write a `BinaryMask` as a black/white grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BinaryMask, RgbImage};
use image::{GrayImage, ImageBuffer, Luma, Rgb};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let raw = img.into_raw();
    RgbImage::from_interleaved(width, height, &raw)
        .ok_or_else(|| format!("Unexpected pixel layout in {}", path.display()))
}

/// Save an RGB image, creating parent directories as needed.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(image.w as u32, image.h as u32, image.to_interleaved())
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask as a grayscale PNG (set pixels become 255).
pub fn save_mask(mask: &BinaryMask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for y in 0..mask.h {
        for x in 0..mask.w {
            let v = if mask.is_set(x, y) { 255 } else { 0 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
