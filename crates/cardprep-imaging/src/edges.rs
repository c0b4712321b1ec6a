//! Edge hint: a binary outline of the card against a light backdrop.
//!
//! Grayscale, inverse binary threshold, then Canny. The result is diagnostic
//! only; no remover consumes it.

use crate::{Error, Result};
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::edges::canny;
use std::path::Path;

/// Pixels above this level count as backdrop.
pub const BACKDROP_LEVEL: u8 = 240;

/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 100.0;
pub const CANNY_HIGH: f32 = 200.0;

/// Foreground mask: 255 where the level is at most [`BACKDROP_LEVEL`], 0 above.
pub fn foreground_mask(gray: &GrayImage) -> GrayImage {
    threshold(gray, BACKDROP_LEVEL, ThresholdType::BinaryInverted)
}

/// Compute the edge map of a decoded image.
///
/// Grayscale conversion is the `image` crate's `to_luma8`, which weights the
/// channels with Rec. 709 coefficients rather than the Rec. 601 ones OpenCV
/// uses. Colour pixels close to the threshold may therefore land on the other
/// side of it than in OpenCV-based tooling.
pub fn edge_hint(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    canny(&foreground_mask(&gray), CANNY_LOW, CANNY_HIGH)
}

/// Compute the edge map of an image file.
pub fn edge_hint_file(path: &Path) -> Result<GrayImage> {
    let image = image::open(path).map_err(|e| Error::decode(path.display().to_string(), e))?;
    Ok(edge_hint(&image))
}

/// Number of edge pixels in an edge map.
pub fn edge_pixel_count(edges: &GrayImage) -> usize {
    edges.pixels().filter(|p| p[0] > 0).count()
}
