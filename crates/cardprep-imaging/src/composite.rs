//! Paste a card onto a fixed-size template.

use crate::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::Serialize;
use std::path::Path;

/// Size of the card slot on the template.
///
/// `radius` is the declared corner radius of the slot. It is carried for
/// reporting but cards are not masked to rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardSlot {
    pub width: u32,
    pub height: u32,
    pub radius: u32,
}

impl Default for CardSlot {
    fn default() -> Self {
        Self {
            width: 310,
            height: 430,
            radius: 20,
        }
    }
}

/// A background template with a centered card slot.
#[derive(Debug, Clone)]
pub struct Template {
    image: RgbaImage,
    slot: CardSlot,
}

impl Template {
    pub fn new(image: RgbaImage, slot: CardSlot) -> Self {
        Self { image, slot }
    }

    /// Load the template image from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] if the file does not exist and
    /// [`Error::Decode`] if it is not a readable image.
    pub fn open(path: &Path, slot: CardSlot) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }
        let image = image::open(path)
            .map_err(|e| Error::decode(path.display().to_string(), e))?
            .to_rgba8();
        Ok(Self::new(image, slot))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn slot(&self) -> CardSlot {
        self.slot
    }

    /// Top-left corner of the slot: the slot is centered, rounding toward the
    /// top-left. Negative when the slot is larger than the template.
    pub fn slot_origin(&self) -> (i64, i64) {
        let (tw, th) = self.dimensions();
        let x = (i64::from(tw) - i64::from(self.slot.width)).div_euclid(2);
        let y = (i64::from(th) - i64::from(self.slot.height)).div_euclid(2);
        (x, y)
    }

    /// Resize `card` to the slot and blend it over a copy of the template
    /// using the card's alpha channel.
    ///
    /// Blending is Porter-Duff "over", so the template's own alpha takes part.
    /// Over an opaque template this equals a linear mask paste; over a
    /// translucent one the result alpha differs from a plain per-channel
    /// interpolation.
    pub fn composite(&self, card: &RgbaImage) -> RgbaImage {
        let resized = imageops::resize(
            card,
            self.slot.width,
            self.slot.height,
            FilterType::Lanczos3,
        );
        let (x, y) = self.slot_origin();
        let mut canvas = self.image.clone();
        imageops::overlay(&mut canvas, &resized, x, y);
        canvas
    }
}
