//! Crop a background-removed image down to its visible content.

use crate::{Error, Result};
use image::imageops::crop_imm;
use image::RgbaImage;
use serde::Serialize;
use std::path::Path;

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CardBounds {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Smallest rectangle enclosing every pixel whose alpha is non-zero.
///
/// # Errors
///
/// Returns [`Error::NoOpaquePixels`] when the image is fully transparent.
pub fn card_bounds(image: &RgbaImage) -> Result<CardBounds> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if !found {
        return Err(Error::NoOpaquePixels);
    }

    Ok(CardBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Crop an image to [`card_bounds`].
pub fn crop_to_card(image: &RgbaImage) -> Result<RgbaImage> {
    let bounds = card_bounds(image)?;

    #[cfg(feature = "tracing")]
    tracing::debug!("Cropping to {:?}", bounds);

    Ok(crop_imm(image, bounds.x, bounds.y, bounds.width, bounds.height).to_image())
}

/// Open an image file as RGBA and crop it to its visible content.
pub fn crop_file(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .map_err(|e| Error::decode(path.display().to_string(), e))?
        .to_rgba8();
    crop_to_card(&image)
}
