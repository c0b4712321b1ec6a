//! Fixed-width resizing that keeps the aspect ratio.

use crate::{Error, Result};
use image::imageops::FilterType;
use image::DynamicImage;

/// Default output width of the resizer.
pub const DEFAULT_TARGET_WIDTH: u32 = 500;

/// Output dimensions for scaling `width × height` to `target_width`.
///
/// The height is `round(height * target_width / width)`, never below one
/// pixel.
///
/// # Errors
///
/// Returns an error if the source width or the target width is zero, or if
/// the scaled height does not fit in a `u32`.
pub fn fit_width(width: u32, height: u32, target_width: u32) -> Result<(u32, u32)> {
    if width == 0 || target_width == 0 {
        return Err(Error::InvalidInput(format!(
            "cannot scale width {width} to {target_width}"
        )));
    }
    let scale = f64::from(target_width) / f64::from(width);
    let new_height = (f64::from(height) * scale).round().max(1.0);
    if new_height > f64::from(u32::MAX) {
        return Err(Error::InvalidInput(format!(
            "scaling {width}x{height} to width {target_width} gives a height of {new_height}"
        )));
    }
    Ok((target_width, new_height as u32))
}

/// Resize an image to `target_width`, preserving aspect ratio, with Lanczos3.
pub fn resize_to_width(image: &DynamicImage, target_width: u32) -> Result<DynamicImage> {
    let (width, height) = fit_width(image.width(), image.height(), target_width)?;
    if (width, height) == (image.width(), image.height()) {
        return Ok(image.clone());
    }
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}
