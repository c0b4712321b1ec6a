//! Shared fixtures for integration tests.
//!
//! Writes small synthetic images with the `image` crate so the tests need no
//! checked-in binaries and no external tools.

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Light studio backdrop, keyed out by the `color-key` backend.
pub const BACKDROP: Rgba<u8> = Rgba([245, 245, 245, 255]);

/// Card colour, far from the backdrop.
pub const INK: Rgba<u8> = Rgba([20, 40, 160, 255]);

/// Write a PNG with a flat backdrop and a solid card at `(x, y, w, h)`.
pub fn write_card_png(path: &Path, size: (u32, u32), card: (u32, u32, u32, u32)) {
    let mut img = RgbaImage::from_pixel(size.0, size.1, BACKDROP);
    let (x0, y0, w, h) = card;
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, INK);
        }
    }
    img.save_with_format(path, ImageFormat::Png)
        .expect("failed to write card fixture");
}

/// Write an opaque template of the given size.
pub fn write_template(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create template folder");
    }
    RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]))
        .save_with_format(path, ImageFormat::Png)
        .expect("failed to write template fixture");
}

/// Write an RGB image whose format follows the file extension.
pub fn write_photo(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([90, 120, 30]))
        .save(path)
        .expect("failed to write photo fixture");
}

/// Dimensions of the image at `path`.
pub fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).expect("failed to open image");
    (img.width(), img.height())
}
