//! Path utilities for selecting batch inputs by extension and naming outputs.
//!
//! Every pipeline scans a single folder and decides per entry whether it is an
//! input. Extension checks are case-insensitive.

use std::path::{Path, PathBuf};

use crate::types::Variant;
use crate::{Error, Result};

/// Extensions accepted by the HEIC converter.
const HEIC_EXTENSIONS: &[&str] = &["heic"];

/// Extensions accepted by the card (background removal) pipeline.
const CARD_EXTENSIONS: &[&str] = &["png"];

/// Extensions accepted by the resizer.
const RESIZE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a path has a HEIC extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use cardprep_common::paths::is_heic_file;
///
/// assert!(is_heic_file(Path::new("IMG_0001.HEIC")));
/// assert!(!is_heic_file(Path::new("IMG_0001.png")));
/// ```
pub fn is_heic_file(path: &Path) -> bool {
    has_extension(path, HEIC_EXTENSIONS)
}

/// Check if a path is a PNG the card pipeline should pick up.
///
/// Files carrying a derived-output prefix (`removed_`, `cropped_`,
/// `composited_`) are excluded so a rerun never feeds outputs back in.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use cardprep_common::paths::is_card_source;
///
/// assert!(is_card_source(Path::new("card.png")));
/// assert!(!is_card_source(Path::new("removed_card.png")));
/// ```
pub fn is_card_source(path: &Path) -> bool {
    if !has_extension(path, CARD_EXTENSIONS) {
        return false;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| Variant::from_file_name(name).is_none())
        .unwrap_or(false)
}

/// Check if a path has an extension the resizer supports.
pub fn is_resizable_file(path: &Path) -> bool {
    has_extension(path, RESIZE_EXTENSIONS)
}

/// Path of the PNG a HEIC file converts to: `<output_dir>/<stem>.png`.
pub fn png_output_path(heic: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = heic
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::invalid_file_name(heic.display().to_string()))?;
    Ok(output_dir.join(format!("{stem}.png")))
}

/// Path of a derived output: `<output_dir>/<prefix><file name>`.
pub fn variant_path(source: &Path, output_dir: &Path, variant: Variant) -> Result<PathBuf> {
    let name = source
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::invalid_file_name(source.display().to_string()))?;
    Ok(output_dir.join(variant.file_name(name)))
}
